use crate::session::GameSession;
use crate::types::{GridSnapshot, Result, Scoreboard};

#[derive(Debug)]
pub struct QueryGridResponse {
  pub snapshot: GridSnapshot,
}

#[derive(Debug)]
pub struct QueryScoresResponse {
  pub scores: Scoreboard,
}

pub async fn try_query_grid(session: &GameSession) -> Result<QueryGridResponse> {
  let snapshot = session.grid.render_snapshot().await;
  Ok(QueryGridResponse { snapshot })
}

pub async fn try_query_scores(session: &GameSession) -> Result<QueryScoresResponse> {
  let scores = session.scoreboard().await;
  Ok(QueryScoresResponse { scores })
}
