use crate::session::GameSession;
use crate::types::{CaptureKind, CellId, DateTimeUtc, Error, Notice, PlayerId, Result};

#[derive(Debug)]
pub struct SubmitAnswerRequest {
  pub player_id: PlayerId,
  pub answer: String,
}

#[derive(Debug, PartialEq)]
pub enum SubmitAnswerResponse {
  /// The player is locked out; nothing was evaluated and nothing was sent back.
  Dropped,
  Incorrect {
    cell: CellId,
    locked_until: DateTimeUtc,
  },
  /// Correct on a contested cell, but the streak is not long enough yet.
  AnswerOnceMore {
    cell: CellId,
    streak: u32,
    prompt: String,
  },
  Captured {
    cell: CellId,
    kind: CaptureKind,
    points: u64,
    score: u64,
  },
}

pub async fn try_submit_answer(session: &GameSession, request: SubmitAnswerRequest) -> Result<SubmitAnswerResponse> {
  let player_id = request.player_id;

  let player = match session.player(player_id).await {
    Ok(player) => player,
    Err(error) => return session.reject(player_id, error),
  };
  let mut player = player.lock().await;
  let now = session.now();

  if player.session.is_locked_out(now) {
    tracing::debug!(player = %player_id, "answer dropped during lockout");
    return Ok(SubmitAnswerResponse::Dropped);
  }

  let Some(pending) = player.session.pending().cloned() else {
    drop(player);
    return session.reject(player_id, Error::NoPendingQuestion);
  };
  let cell_id = pending.cell;

  if !pending.question.accepts(&request.answer) {
    let lockout = player.session.record_wrong_answer(now, session.config.lockout());
    if session.config.clear_pending_on_wrong_answer {
      player.session.clear_pending();
    }
    drop(player);

    tracing::debug!(player = %player_id, cell = %cell_id, until = %lockout.until, "wrong answer");
    session.notify(
      player_id,
      Notice::Incorrect {
        locked_until: lockout.until,
      },
    );

    return Ok(SubmitAnswerResponse::Incorrect {
      cell: cell_id,
      locked_until: lockout.until,
    });
  }

  // Owner check and ownership write share one cell guard, so two players
  // answering for the same cell are serialized and the later one sees the
  // new owner.
  let mut cell = session.grid.lock(cell_id).await?;

  let previous_owner = cell.owner;
  let (kind, points) = match previous_owner {
    // Not reachable today: select_cell refuses own cells and a capture clears
    // the pending question under the same player guard. A self-owned cell
    // must still never count as contested.
    Some(owner) if owner == player_id => {
      player.session.clear_pending();
      drop(cell);
      drop(player);
      return session.reject(player_id, Error::AlreadyOwnedBySelf { cell: cell_id });
    }
    None => (CaptureKind::Free, session.config.free_capture_points),
    Some(_) => {
      let streak = player.session.increment_contested_streak();

      if streak < session.config.contested_streak_required {
        drop(cell);

        let question = session.draw_question();
        let prompt = question.prompt.clone();
        player.session.begin_question(cell_id, question);
        drop(player);

        tracing::debug!(player = %player_id, cell = %cell_id, streak, "contested answer correct, asking again");
        session.notify(
          player_id,
          Notice::CorrectAnswerOnceMore {
            cell: cell_id,
            streak,
            required: session.config.contested_streak_required,
          },
        );
        session.notify(
          player_id,
          Notice::Question {
            cell: cell_id,
            prompt: prompt.clone(),
          },
        );

        return Ok(SubmitAnswerResponse::AnswerOnceMore {
          cell: cell_id,
          streak,
          prompt,
        });
      }

      (CaptureKind::Contested, session.config.contested_capture_points)
    }
  };

  let color = player.color_or_assign(|| session.colors.allocate());
  cell.set_owner(player_id, color);
  drop(cell);

  let score = player.award(points);
  player.session.clear_pending();
  player.session.reset_contested_streak();
  drop(player);

  let kind_name: &'static str = kind.into();
  tracing::info!(
    player = %player_id,
    cell = %cell_id,
    kind = kind_name,
    previous_owner = ?previous_owner,
    score,
    "cell captured"
  );

  session.notify(
    player_id,
    Notice::Captured {
      cell: cell_id,
      kind,
      points,
    },
  );
  session.broadcast_grid().await;

  Ok(SubmitAnswerResponse::Captured {
    cell: cell_id,
    kind,
    points,
    score,
  })
}
