mod render;

use game_core::commands::Command;
use game_core::types::{ChannelNotifier, GameConfig, GameSession, Outbound, PlayerId};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const CONFIG_ENV: &str = "QUIZ_CONQUER_CONFIG";

async fn load_config() -> Result<GameConfig, Box<dyn std::error::Error>> {
  let path = std::env::args().nth(1).or_else(|| std::env::var(CONFIG_ENV).ok());

  match path {
    Some(path) => Ok(GameConfig::load(path).await?),
    None => Ok(GameConfig::default()),
  }
}

/// Console stand-in for the chat transport. Each line is
/// `<player id> <text>`; `/start` registers, a cell id selects it and
/// anything else answers the pending question.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(EnvFilter::from_default_env())
    .init();

  let config = load_config().await?;
  let (notifier, mut outbound) = ChannelNotifier::channel();
  let session = Arc::new(GameSession::try_new(config, Arc::new(notifier))?);

  let printer = tokio::spawn(async move {
    while let Some(message) = outbound.recv().await {
      match message {
        Outbound::Notice { player_id, notice } => println!("[to {player_id}] {notice}"),
        Outbound::Grid {
          player_id,
          snapshot,
          scores,
        } => {
          println!("[to {player_id}]\n{}", render::render_grid(&snapshot));
          println!("[to {player_id}] {}", render::render_scores(&scores));
        }
      }
    }
  });

  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  while let Some(line) = lines.next_line().await? {
    let Some((id, text)) = line.trim().split_once(char::is_whitespace) else {
      eprintln!("expected `<player id> <text>`");
      continue;
    };

    let Ok(id) = id.parse::<i64>() else {
      eprintln!("player id must be an integer, got {id:?}");
      continue;
    };

    let player_id = PlayerId(id);
    let command = Command::from_message(session.grid(), player_id, &format!("player-{id}"), text);

    // player-facing errors were already sent through the notifier
    if let Err(error) = session.try_process_command(command).await {
      tracing::debug!(player = %player_id, %error, "command failed");
    }
  }

  drop(session);
  printer.await?;
  Ok(())
}
