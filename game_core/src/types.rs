use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use strum_macros::IntoStaticStr;

pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::colors::ColorAllocator;
pub use crate::commands::{Command, CommandResponse};
pub use crate::commands::{QueryGridResponse, QueryScoresResponse};
pub use crate::commands::{RegisterRequest, RegisterResponse};
pub use crate::commands::{SelectCellRequest, SelectCellResponse};
pub use crate::commands::{SubmitAnswerRequest, SubmitAnswerResponse};
pub use crate::config::{GameConfig, QuestionConfig};
pub use crate::error::{Error, Result};
pub use crate::grid::{Cell, CellSnapshot, Grid, GridSnapshot};
pub use crate::notify::{ChannelNotifier, Notice, Notifier, Outbound, ScoreEntry, Scoreboard};
pub use crate::player::{Lockout, PendingQuestion, Player, PlayerSessionState};
pub use crate::questions::{Question, QuestionBank};
pub use crate::session::GameSession;

pub type DateTimeUtc = DateTime<Utc>;

pub const MAX_ROWS: usize = 26;
pub const MAX_COLUMNS: usize = 99;

/// Opaque player identifier handed to us by the transport.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerId(pub i64);

impl fmt::Display for PlayerId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Grid coordinate, displayed as row letter + 1-based column, e.g. `C3`.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Copy, Serialize, Deserialize)]
pub struct CellId {
  pub row: usize,
  pub column: usize,
}

fn cell_pattern() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| Regex::new(r"^([A-Z])([1-9][0-9]?)$").expect("cell pattern is a valid regex"))
}

impl CellId {
  pub fn new(row: usize, column: usize) -> Self {
    Self { row, column }
  }

  /// Parses the textual form. Lowercase input and surrounding whitespace are
  /// accepted; bounds against a concrete grid are checked by [`crate::grid::Grid`].
  pub fn parse(text: &str) -> Result<Self> {
    let normalized = text.trim().to_uppercase();

    let captures = cell_pattern().captures(&normalized).ok_or_else(|| Error::InvalidCell {
      cell: text.trim().to_string(),
    })?;

    let row = captures[1]
      .bytes()
      .next()
      .map(|letter| usize::from(letter - b'A'))
      .ok_or(Error::Unexpected {
        message: "cell pattern matched without a row letter",
      })?;

    let column = captures[2].parse::<usize>().map_err(|_| Error::InvalidCell {
      cell: text.trim().to_string(),
    })?;

    Ok(Self { row, column: column - 1 })
  }
}

impl fmt::Display for CellId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let letter = (b'A'..=b'Z').nth(self.row).map_or('?', char::from);
    write!(f, "{letter}{}", self.column + 1)
  }
}

impl std::str::FromStr for CellId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Self::parse(s)
  }
}

/// 24-bit RGB color, displayed as `#RRGGBB`.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
  pub const MASK: u32 = 0x00FF_FFFF;

  pub fn from_rgb(value: u32) -> Self {
    Self(value & Self::MASK)
  }
}

impl fmt::Display for Color {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{:06X}", self.0 & Self::MASK)
  }
}

#[derive(Debug, PartialEq, Clone, Copy, IntoStaticStr, Serialize, Deserialize)]
pub enum CaptureKind {
  Free,
  Contested,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_and_displays_cell_ids() {
    let cell = CellId::parse(" c3 ").unwrap();
    assert_eq!(cell, CellId::new(2, 2));
    assert_eq!(cell.to_string(), "C3");
    assert_eq!(CellId::parse("A1").unwrap(), CellId::new(0, 0));
    assert_eq!(CellId::parse("F12").unwrap(), CellId::new(5, 11));
  }

  #[test]
  fn rejects_malformed_cell_ids() {
    for text in ["", "3C", "A0", "AA1", "A100", "hello", "A-1"] {
      assert!(matches!(CellId::parse(text), Err(Error::InvalidCell { .. })), "{text}");
    }
  }

  #[test]
  fn formats_colors_as_hex() {
    assert_eq!(Color::from_rgb(0x0A0B0C).to_string(), "#0A0B0C");
    assert_eq!(Color::from_rgb(0xFF_123456).to_string(), "#123456");
  }
}
