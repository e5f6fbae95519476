use game_core::types::{CaptureKind, CellId, SubmitAnswerResponse};
use rstest::*;
use std::sync::Arc;
use tests_integration::setup_with_players;

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_should_let_exactly_one_player_win_a_race_for_the_same_cell(
  #[values("A1", "C4", "F6")] cell: &str,
  #[values(2, 5)] racers: usize,
) {
  let names = (0..racers).map(|i| format!("racer-{i}")).collect::<Vec<_>>();
  let names = names.iter().map(String::as_str).collect::<Vec<_>>();
  let setup = setup_with_players(&names).await.unwrap();

  let mut answers = Vec::new();
  for player_id in &setup.added {
    setup.select(*player_id, cell).await.unwrap();
    answers.push((*player_id, setup.expected_answer(*player_id).await));
  }

  let session = Arc::clone(&setup.session);
  let handles = answers
    .into_iter()
    .map(|(player_id, answer)| {
      let session = Arc::clone(&session);
      tokio::spawn(async move {
        session
          .try_submit_answer(game_core::types::SubmitAnswerRequest { player_id, answer })
          .await
          .map(|response| (player_id, response))
      })
    })
    .collect::<Vec<_>>();

  let mut outcomes = Vec::new();
  for handle in handles {
    outcomes.push(handle.await.unwrap().unwrap());
  }

  let winners = outcomes
    .iter()
    .filter(|(_, response)| matches!(response, SubmitAnswerResponse::Captured { kind: CaptureKind::Free, .. }))
    .map(|(player_id, _)| *player_id)
    .collect::<Vec<_>>();
  assert_eq!(winners.len(), 1, "{outcomes:?}");

  // everyone else saw the cell as already taken
  assert!(outcomes
    .iter()
    .filter(|(player_id, _)| *player_id != winners[0])
    .all(|(_, response)| matches!(response, SubmitAnswerResponse::AnswerOnceMore { streak: 1, .. })));

  let owner = setup.session.grid().lookup(CellId::parse(cell).unwrap()).await.unwrap().owner;
  assert_eq!(owner, Some(winners[0]));

  let scores = setup.session.try_query_scores().await.unwrap().scores;
  assert_eq!(scores.entries.iter().map(|entry| entry.score).sum::<u64>(), 100);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_should_capture_different_cells_in_parallel() {
  let names = ["p0", "p1", "p2", "p3", "p4", "p5"];
  let setup = setup_with_players(&names).await.unwrap();

  let mut answers = Vec::new();
  for (row, player_id) in setup.added.iter().enumerate() {
    let cell = CellId::new(row, row).to_string();
    setup.select(*player_id, &cell).await.unwrap();
    answers.push((*player_id, setup.expected_answer(*player_id).await));
  }

  let handles = answers
    .into_iter()
    .map(|(player_id, answer)| {
      let session = Arc::clone(&setup.session);
      tokio::spawn(async move {
        session
          .try_submit_answer(game_core::types::SubmitAnswerRequest { player_id, answer })
          .await
      })
    })
    .collect::<Vec<_>>();

  for handle in handles {
    assert!(matches!(
      handle.await.unwrap().unwrap(),
      SubmitAnswerResponse::Captured { score: 100, .. }
    ));
  }

  let snapshot = setup.session.try_query_grid().await.unwrap().snapshot;
  for (row, player_id) in setup.added.iter().enumerate() {
    assert_eq!(snapshot.cell(CellId::new(row, row)).unwrap().owner, Some(*player_id));
  }
}
