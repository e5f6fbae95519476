use crate::types::{CellId, DateTimeUtc, PlayerId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum Error {
  #[error("Invalid cell selection \"{cell}\".")]
  InvalidCell { cell: String },

  #[error("Cell {cell} is already captured by you.")]
  AlreadyOwnedBySelf { cell: CellId },

  #[error("You are locked out after a wrong answer until {until}.")]
  LockedOut { until: DateTimeUtc },

  #[error("There is no question waiting for an answer, please select a cell first.")]
  NoPendingQuestion,

  #[error("Player {player_id} is not registered, please send /start first.")]
  UnknownPlayer { player_id: PlayerId },

  #[error("Invalid grid dimensions rows = {rows}, columns = {columns}")]
  InvalidGridDimensions { rows: usize, columns: usize },

  #[error("Question bank must contain at least one question.")]
  EmptyQuestionBank,

  #[error("Invalid configuration: {cause}")]
  InvalidConfig { cause: String },

  #[error("Failed to read configuration {cause}")]
  FailedToReadConfig { cause: String },

  #[error("An unexpected error occurred: {message}")]
  Unexpected { message: &'static str },
}

impl Error {
  /// Errors that only happen while building a session. Everything else is a
  /// player mistake that leaves the session running.
  pub fn is_fatal(&self) -> bool {
    matches!(
      self,
      Self::InvalidGridDimensions { .. } | Self::EmptyQuestionBank | Self::InvalidConfig { .. } | Self::FailedToReadConfig { .. }
    )
  }
}

impl std::convert::From<toml::de::Error> for Error {
  fn from(value: toml::de::Error) -> Self {
    Self::InvalidConfig {
      cause: value.to_string(),
    }
  }
}

impl std::convert::From<std::io::Error> for Error {
  fn from(value: std::io::Error) -> Self {
    Self::FailedToReadConfig {
      cause: value.to_string(),
    }
  }
}

pub type Result<T> = core::result::Result<T, Error>;
