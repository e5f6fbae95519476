use crate::session::GameSession;
use crate::types::{CellId, Error, Notice, PlayerId, Result};

#[derive(Debug)]
pub struct SelectCellRequest {
  pub player_id: PlayerId,
  /// Raw text from the transport, e.g. `"b3"`.
  pub cell: String,
}

#[derive(Debug)]
pub struct SelectCellResponse {
  pub cell: CellId,
  pub prompt: String,
  /// True when another player currently owns the cell.
  pub contested: bool,
}

pub async fn try_select_cell(session: &GameSession, request: SelectCellRequest) -> Result<SelectCellResponse> {
  let player_id = request.player_id;

  let cell_id = match session.grid.parse_cell(&request.cell) {
    Ok(cell_id) => cell_id,
    Err(error) => return session.reject(player_id, error),
  };

  let player = match session.player(player_id).await {
    Ok(player) => player,
    Err(error) => return session.reject(player_id, error),
  };
  let mut player = player.lock().await;

  let cell = session.grid.lookup(cell_id).await?;

  if cell.is_owned_by(player_id) {
    return session.reject(player_id, Error::AlreadyOwnedBySelf { cell: cell_id });
  }

  if let Some(lockout) = player.session.lockout().filter(|lockout| lockout.is_active_at(session.now())) {
    return session.reject(player_id, Error::LockedOut { until: lockout.until });
  }

  let question = session.draw_question();
  let prompt = question.prompt.clone();

  player.session.reset_contested_streak();
  player.session.begin_question(cell_id, question);
  drop(player);

  tracing::debug!(player = %player_id, cell = %cell_id, owner = ?cell.owner, "question issued");

  session.notify(
    player_id,
    Notice::Question {
      cell: cell_id,
      prompt: prompt.clone(),
    },
  );

  Ok(SelectCellResponse {
    cell: cell_id,
    prompt,
    contested: cell.owner.is_some(),
  })
}
