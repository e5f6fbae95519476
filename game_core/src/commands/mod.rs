mod query;
mod register;
mod select_cell;
mod submit_answer;

pub use query::{try_query_grid, try_query_scores, QueryGridResponse, QueryScoresResponse};
pub use register::{try_register, RegisterRequest, RegisterResponse};
pub use select_cell::{try_select_cell, SelectCellRequest, SelectCellResponse};
pub use submit_answer::{try_submit_answer, SubmitAnswerRequest, SubmitAnswerResponse};

use crate::grid::Grid;
use crate::session::GameSession;
use crate::types::{PlayerId, Result};

pub const START_COMMAND: &str = "/start";

#[derive(Debug)]
pub enum Command {
  Register(RegisterRequest),
  SelectCell(SelectCellRequest),
  SubmitAnswer(SubmitAnswerRequest),
  QueryGrid,
  QueryScores,
}

#[derive(Debug)]
pub enum CommandResponse {
  Register(RegisterResponse),
  SelectCell(SelectCellResponse),
  SubmitAnswer(SubmitAnswerResponse),
  QueryGrid(QueryGridResponse),
  QueryScores(QueryScoresResponse),
}

impl Command {
  /// Routes one chat message: `/start` registers, a cell id inside `grid`
  /// selects that cell, every other text is an answer. Cell-shaped text
  /// outside the grid (`G1` on a 6x6 board, `B12`) is an answer too.
  pub fn from_message(grid: &Grid, player_id: PlayerId, display_name: &str, text: &str) -> Self {
    let trimmed = text.trim();

    if trimmed == START_COMMAND {
      return Self::Register(RegisterRequest {
        player_id,
        display_name: display_name.to_string(),
      });
    }

    if grid.parse_cell(trimmed).is_ok() {
      return Self::SelectCell(SelectCellRequest {
        player_id,
        cell: trimmed.to_string(),
      });
    }

    Self::SubmitAnswer(SubmitAnswerRequest {
      player_id,
      answer: text.to_string(),
    })
  }
}

pub async fn try_process_command(session: &GameSession, command: Command) -> Result<CommandResponse> {
  match command {
    Command::Register(request) => try_register(session, request).await.map(CommandResponse::Register),
    Command::SelectCell(request) => try_select_cell(session, request).await.map(CommandResponse::SelectCell),
    Command::SubmitAnswer(request) => try_submit_answer(session, request).await.map(CommandResponse::SubmitAnswer),
    Command::QueryGrid => try_query_grid(session).await.map(CommandResponse::QueryGrid),
    Command::QueryScores => try_query_scores(session).await.map(CommandResponse::QueryScores),
  }
}
