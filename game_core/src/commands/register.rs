use crate::session::GameSession;
use crate::types::{Notice, Player, PlayerId, Result};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug)]
pub struct RegisterRequest {
  pub player_id: PlayerId,
  pub display_name: String,
}

#[derive(Debug)]
pub struct RegisterResponse {
  pub player_id: PlayerId,
  pub display_name: String,
  /// False when the player had already joined.
  pub newly_registered: bool,
}

pub async fn try_register(session: &GameSession, request: RegisterRequest) -> Result<RegisterResponse> {
  let existing = {
    let mut roster = session.roster.write().await;

    match roster.players.get(&request.player_id) {
      Some(existing) => Some(existing.clone()),
      None => {
        let player = Player::new(request.player_id, request.display_name.trim());
        roster.players.insert(request.player_id, Arc::new(Mutex::new(player)));
        roster.order.push(request.player_id);
        None
      }
    }
  };

  // The roster guard is gone before waiting on a player that may be mid-event.
  let (display_name, newly_registered) = match existing {
    Some(existing) => (existing.lock().await.display_name.clone(), false),
    None => (request.display_name.trim().to_string(), true),
  };

  if newly_registered {
    tracing::info!(player = %request.player_id, name = %display_name, "player registered");
  }

  session.notify(
    request.player_id,
    Notice::Welcome {
      display_name: display_name.clone(),
    },
  );
  session.send_grid_to(request.player_id).await;

  Ok(RegisterResponse {
    player_id: request.player_id,
    display_name,
    newly_registered,
  })
}
