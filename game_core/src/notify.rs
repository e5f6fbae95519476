use crate::grid::GridSnapshot;
use crate::types::{CaptureKind, CellId, DateTimeUtc, PlayerId};
use serde::Serialize;
use std::fmt;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreEntry {
  pub player_id: PlayerId,
  pub display_name: String,
  pub score: u64,
}

/// Scores in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
  pub entries: Vec<ScoreEntry>,
}

impl Scoreboard {
  pub fn score_of(&self, player_id: PlayerId) -> Option<u64> {
    self
      .entries
      .iter()
      .find(|entry| entry.player_id == player_id)
      .map(|entry| entry.score)
  }
}

impl fmt::Display for Scoreboard {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "Current scores:")?;
    for entry in &self.entries {
      writeln!(f, "{}: {}", entry.display_name, entry.score)?;
    }
    Ok(())
  }
}

/// Textual feedback for a single player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Notice {
  Welcome { display_name: String },
  Question { cell: CellId, prompt: String },
  CorrectAnswerOnceMore { cell: CellId, streak: u32, required: u32 },
  Incorrect { locked_until: DateTimeUtc },
  Captured { cell: CellId, kind: CaptureKind, points: u64 },
  Rejected { reason: String },
}

impl fmt::Display for Notice {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Welcome { display_name } => write!(f, "Welcome, {display_name}! Let the quiz begin!"),
      Self::Question { prompt, .. } => write!(f, "Question: {prompt}"),
      Self::CorrectAnswerOnceMore { streak, required, .. } => write!(
        f,
        "Correct! Answer {} more time(s) in a row to capture the cell.",
        required.saturating_sub(*streak)
      ),
      Self::Incorrect { .. } => write!(f, "Wrong! Try again after the lockout."),
      Self::Captured { cell, .. } => write!(f, "You captured cell {cell}!"),
      Self::Rejected { reason } => write!(f, "{reason}"),
    }
  }
}

/// Outbound half of the transport. Implementations must not block; the
/// session calls these while serving other players.
pub trait Notifier: fmt::Debug + Send + Sync {
  fn notify(&self, player_id: PlayerId, notice: Notice);

  fn broadcast_grid(&self, player_id: PlayerId, snapshot: &GridSnapshot, scores: &Scoreboard);
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
  Notice {
    player_id: PlayerId,
    notice: Notice,
  },
  Grid {
    player_id: PlayerId,
    snapshot: GridSnapshot,
    scores: Scoreboard,
  },
}

impl Outbound {
  pub fn player_id(&self) -> PlayerId {
    match self {
      Self::Notice { player_id, .. } | Self::Grid { player_id, .. } => *player_id,
    }
  }
}

/// Forwards everything into an unbounded channel drained by the transport.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
  sender: UnboundedSender<Outbound>,
}

impl ChannelNotifier {
  pub fn channel() -> (Self, UnboundedReceiver<Outbound>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (Self { sender }, receiver)
  }

  fn send(&self, message: Outbound) {
    if self.sender.send(message).is_err() {
      tracing::warn!("outbound receiver dropped, message discarded");
    }
  }
}

impl Notifier for ChannelNotifier {
  fn notify(&self, player_id: PlayerId, notice: Notice) {
    self.send(Outbound::Notice { player_id, notice });
  }

  fn broadcast_grid(&self, player_id: PlayerId, snapshot: &GridSnapshot, scores: &Scoreboard) {
    self.send(Outbound::Grid {
      player_id,
      snapshot: snapshot.clone(),
      scores: scores.clone(),
    });
  }
}
