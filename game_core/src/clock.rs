use crate::types::DateTimeUtc;
use chrono::{Duration, Utc};
use std::fmt::Debug;
use std::sync::Mutex;

/// Source of "now" for lockout checks.
pub trait Clock: Debug + Send + Sync {
  fn now(&self) -> DateTimeUtc;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTimeUtc {
    Utc::now()
  }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
  now: Mutex<DateTimeUtc>,
}

impl ManualClock {
  pub fn new(start: DateTimeUtc) -> Self {
    Self { now: Mutex::new(start) }
  }

  pub fn advance(&self, by: Duration) {
    let mut now = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    *now += by;
  }
}

impl Clock for ManualClock {
  fn now(&self) -> DateTimeUtc {
    *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }
}
