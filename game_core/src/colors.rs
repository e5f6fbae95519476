use crate::types::Color;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::sync::Mutex;

// Redraws before accepting a duplicate. Only reachable once a large share of
// the 24-bit space is taken.
const MAX_DRAWS: usize = 64;

#[derive(Debug)]
struct Palette {
  rng: StdRng,
  issued: HashSet<Color>,
}

/// Hands out random 24-bit colors, avoiding ones already issued.
#[derive(Debug)]
pub struct ColorAllocator {
  palette: Mutex<Palette>,
}

impl ColorAllocator {
  pub fn new(seed: Option<u64>) -> Self {
    let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    Self {
      palette: Mutex::new(Palette {
        rng,
        issued: HashSet::new(),
      }),
    }
  }

  pub fn allocate(&self) -> Color {
    let mut palette = self.palette.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    let mut color = Color::from_rgb(palette.rng.gen());
    for _ in 1..MAX_DRAWS {
      if !palette.issued.contains(&color) {
        break;
      }
      color = Color::from_rgb(palette.rng.gen());
    }

    palette.issued.insert(color);
    color
  }

  pub fn issued(&self) -> usize {
    self.palette.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).issued.len()
  }
}

impl Default for ColorAllocator {
  fn default() -> Self {
    Self::new(None)
  }
}
