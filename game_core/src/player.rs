use crate::questions::Question;
use crate::types::{CellId, Color, DateTimeUtc, PlayerId};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Expiring token set by a wrong answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lockout {
  pub until: DateTimeUtc,
}

impl Lockout {
  pub fn starting_at(now: DateTimeUtc, duration: Duration) -> Self {
    Self { until: now + duration }
  }

  pub fn is_active_at(&self, now: DateTimeUtc) -> bool {
    now < self.until
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingQuestion {
  pub cell: CellId,
  pub question: Question,
}

/// Transient per-player state driven by the command handlers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerSessionState {
  pending: Option<PendingQuestion>,
  lockout: Option<Lockout>,
  consecutive_correct: u32,
}

impl PlayerSessionState {
  pub fn is_locked_out(&self, now: DateTimeUtc) -> bool {
    self.lockout.is_some_and(|lockout| lockout.is_active_at(now))
  }

  pub fn lockout(&self) -> Option<Lockout> {
    self.lockout
  }

  pub fn pending(&self) -> Option<&PendingQuestion> {
    self.pending.as_ref()
  }

  pub fn selected_cell(&self) -> Option<CellId> {
    self.pending.as_ref().map(|pending| pending.cell)
  }

  /// Replaces whatever question was outstanding.
  pub fn begin_question(&mut self, cell: CellId, question: Question) {
    self.pending = Some(PendingQuestion { cell, question });
  }

  pub fn clear_pending(&mut self) {
    self.pending = None;
  }

  pub fn record_wrong_answer(&mut self, now: DateTimeUtc, duration: Duration) -> Lockout {
    let lockout = Lockout::starting_at(now, duration);
    self.consecutive_correct = 0;
    self.lockout = Some(lockout);
    lockout
  }

  pub fn increment_contested_streak(&mut self) -> u32 {
    self.consecutive_correct += 1;
    self.consecutive_correct
  }

  pub fn reset_contested_streak(&mut self) {
    self.consecutive_correct = 0;
  }

  pub fn contested_streak(&self) -> u32 {
    self.consecutive_correct
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
  pub id: PlayerId,
  pub display_name: String,
  /// Assigned on the first capture, then stable.
  pub color: Option<Color>,
  pub score: u64,
  pub session: PlayerSessionState,
}

impl Player {
  pub fn new(id: PlayerId, display_name: impl Into<String>) -> Self {
    Self {
      id,
      display_name: display_name.into(),
      color: None,
      score: 0,
      session: PlayerSessionState::default(),
    }
  }

  pub fn color_or_assign(&mut self, allocate: impl FnOnce() -> Color) -> Color {
    *self.color.get_or_insert_with(allocate)
  }

  pub fn award(&mut self, points: u64) -> u64 {
    self.score = self.score.saturating_add(points);
    self.score
  }
}
