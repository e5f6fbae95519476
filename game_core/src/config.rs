use crate::types::{Error, Result, MAX_COLUMNS, MAX_ROWS};
use chrono::Duration;
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_COLUMNS: usize = 6;
pub const DEFAULT_LOCKOUT_SECONDS: u32 = 15;
pub const FREE_CAPTURE_POINTS: u64 = 100;
pub const CONTESTED_CAPTURE_POINTS: u64 = 300;
pub const CONTESTED_STREAK_REQUIRED: u32 = 2;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuestionConfig {
  pub prompt: String,
  pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
  pub rows: usize,
  pub columns: usize,
  pub lockout_seconds: u32,
  pub free_capture_points: u64,
  pub contested_capture_points: u64,
  pub contested_streak_required: u32,
  /// When false, the question stays pending after a wrong answer and can
  /// still be answered once the lockout expires.
  pub clear_pending_on_wrong_answer: bool,
  pub seed: Option<u64>,
  pub questions: Vec<QuestionConfig>,
}

impl Default for GameConfig {
  fn default() -> Self {
    Self {
      rows: DEFAULT_ROWS,
      columns: DEFAULT_COLUMNS,
      lockout_seconds: DEFAULT_LOCKOUT_SECONDS,
      free_capture_points: FREE_CAPTURE_POINTS,
      contested_capture_points: CONTESTED_CAPTURE_POINTS,
      contested_streak_required: CONTESTED_STREAK_REQUIRED,
      clear_pending_on_wrong_answer: false,
      seed: None,
      questions: Vec::new(),
    }
  }
}

impl GameConfig {
  pub fn from_toml_str(text: &str) -> Result<Self> {
    let config: Self = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
  }

  pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path)
      .await
      .map_err(|e| Error::FailedToReadConfig {
        cause: format!("{}: {e}", path.display()),
      })?;

    let config = Self::from_toml_str(&text)?;
    tracing::info!(path = %path.display(), rows = config.rows, columns = config.columns, "loaded game config");
    Ok(config)
  }

  pub fn validate(&self) -> Result<()> {
    Some((self.rows, self.columns))
      .filter(|(rows, columns)| (1..=MAX_ROWS).contains(rows) && (1..=MAX_COLUMNS).contains(columns))
      .ok_or(Error::InvalidGridDimensions {
        rows: self.rows,
        columns: self.columns,
      })?;

    Some(self.contested_streak_required)
      .filter(|required| *required > 0)
      .ok_or_else(|| Error::InvalidConfig {
        cause: "contested_streak_required must be at least 1".to_string(),
      })?;

    if let Some(index) = self
      .questions
      .iter()
      .position(|question| question.prompt.trim().is_empty() || question.answer.trim().is_empty())
    {
      return Err(Error::InvalidConfig {
        cause: format!("question #{} has an empty prompt or answer", index + 1),
      });
    }

    Ok(())
  }

  pub fn lockout(&self) -> Duration {
    Duration::seconds(i64::from(self.lockout_seconds))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_document_gives_reference_rules() {
    let config = GameConfig::from_toml_str("").unwrap();
    assert_eq!(config, GameConfig::default());
    assert_eq!(config.lockout(), Duration::seconds(15));
  }

  #[test]
  fn reads_overrides_and_questions() {
    let config = GameConfig::from_toml_str(
      r#"
        rows = 3
        columns = 4
        lockout_seconds = 5
        seed = 7

        [[questions]]
        prompt = "2 + 2?"
        answer = "4"
      "#,
    )
    .unwrap();

    assert_eq!((config.rows, config.columns), (3, 4));
    assert_eq!(config.lockout(), Duration::seconds(5));
    assert_eq!(config.seed, Some(7));
    assert_eq!(config.questions.len(), 1);
  }

  #[test]
  fn rejects_bad_dimensions_and_unknown_keys() {
    assert_eq!(
      GameConfig::from_toml_str("rows = 0").unwrap_err(),
      Error::InvalidGridDimensions { rows: 0, columns: 6 }
    );
    assert_eq!(
      GameConfig::from_toml_str("columns = 100").unwrap_err(),
      Error::InvalidGridDimensions { rows: 6, columns: 100 }
    );
    assert!(matches!(
      GameConfig::from_toml_str("colour = 1").unwrap_err(),
      Error::InvalidConfig { .. }
    ));
  }
}
