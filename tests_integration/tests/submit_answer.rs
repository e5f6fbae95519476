use game_core::types::{CaptureKind, CellId, Error, GameConfig, Notice, PlayerId, SubmitAnswerResponse};
use rstest::*;
use tests_integration::{seconds, setup_with_config, setup_with_players, start_time, test_config, TestSetup, WRONG_ANSWER};

#[rstest]
#[tokio::test]
async fn test_should_capture_an_unowned_cell_with_one_correct_answer() {
  let mut setup = setup_with_players(&["ann", "bob", "cid"]).await.unwrap();
  let ann = setup.added[0];

  setup.select(ann, "B3").await.unwrap();
  setup.drain();

  let response = setup.answer_correctly(ann).await.unwrap();

  assert_eq!(
    response,
    SubmitAnswerResponse::Captured {
      cell: CellId::new(1, 2),
      kind: CaptureKind::Free,
      points: 100,
      score: 100,
    }
  );

  let player = setup.session.player_state(ann).await.unwrap();
  assert_eq!(player.score, 100);
  assert!(player.session.pending().is_none());

  let cell = setup.session.grid().lookup(CellId::new(1, 2)).await.unwrap();
  assert_eq!(cell.owner, Some(ann));
  assert!(cell.revealed);
  assert_eq!(cell.color, player.color);
  assert!(cell.color.is_some());

  let messages = setup.drain();
  assert_eq!(TestSetup::grids_sent(&messages), setup.added);
  assert_eq!(
    TestSetup::notices_for(&messages, ann),
    vec![Notice::Captured {
      cell: CellId::new(1, 2),
      kind: CaptureKind::Free,
      points: 100
    }]
  );
}

#[rstest]
#[case::uppercase(str::to_uppercase)]
#[case::lowercase(str::to_lowercase)]
#[case::padded(|answer: &str| format!("  {answer}\n"))]
#[tokio::test]
async fn test_should_accept_answers_regardless_of_case_and_padding(#[case] transform: fn(&str) -> String) {
  let setup = setup_with_players(&["ann"]).await.unwrap();
  let ann = setup.added[0];

  setup.select(ann, "A2").await.unwrap();
  let answer = transform(&setup.expected_answer(ann).await);
  let response = setup.answer(ann, &answer).await.unwrap();

  assert!(matches!(response, SubmitAnswerResponse::Captured { .. }));
}

#[rstest]
#[tokio::test]
async fn test_should_report_missing_question_instead_of_failing() {
  let mut setup = setup_with_players(&["ann"]).await.unwrap();
  let ann = setup.added[0];

  let error = setup.answer(ann, "Paris").await.unwrap_err();

  assert_eq!(error, Error::NoPendingQuestion);
  let notices = TestSetup::notices_for(&setup.drain(), ann);
  assert!(matches!(notices.as_slice(), [Notice::Rejected { .. }]));

  setup.capture(ann, "A1").await;
  assert_eq!(setup.answer(ann, "Paris").await.unwrap_err(), Error::NoPendingQuestion);
}

#[rstest]
#[tokio::test]
async fn test_should_lock_out_after_wrong_answer_and_drop_answers_silently() {
  let mut setup = setup_with_players(&["ann"]).await.unwrap();
  let ann = setup.added[0];

  setup.select(ann, "C1").await.unwrap();
  let response = setup.answer(ann, WRONG_ANSWER).await.unwrap();

  assert_eq!(
    response,
    SubmitAnswerResponse::Incorrect {
      cell: CellId::new(2, 0),
      locked_until: start_time() + seconds(15),
    }
  );
  setup.drain();

  setup.clock.advance(seconds(5));
  let answer = setup.expected_answer(ann).await;
  assert_eq!(setup.answer(ann, &answer).await.unwrap(), SubmitAnswerResponse::Dropped);
  assert!(setup.drain().is_empty());

  let cell = setup.session.grid().lookup(CellId::new(2, 0)).await.unwrap();
  assert_eq!(cell.owner, None);
  assert!(!cell.revealed);
}

#[rstest]
#[tokio::test]
async fn test_should_keep_pending_question_answerable_after_lockout_expires() {
  let setup = setup_with_players(&["ann"]).await.unwrap();
  let ann = setup.added[0];

  setup.select(ann, "C1").await.unwrap();
  setup.answer(ann, WRONG_ANSWER).await.unwrap();
  setup.clock.advance(seconds(15));

  let response = setup.answer_correctly(ann).await.unwrap();

  assert!(matches!(
    response,
    SubmitAnswerResponse::Captured {
      kind: CaptureKind::Free,
      score: 100,
      ..
    }
  ));
}

#[rstest]
#[tokio::test]
async fn test_should_require_new_selection_when_configured_to_clear_on_wrong_answer() {
  let config = GameConfig {
    clear_pending_on_wrong_answer: true,
    ..test_config()
  };
  let setup = setup_with_config(config, &["ann"]).await.unwrap();
  let ann = setup.added[0];

  setup.select(ann, "C1").await.unwrap();
  setup.answer(ann, WRONG_ANSWER).await.unwrap();
  setup.clock.advance(seconds(16));

  assert_eq!(setup.answer(ann, "anything").await.unwrap_err(), Error::NoPendingQuestion);
  assert!(setup.select(ann, "C1").await.is_ok());
}

#[rstest]
#[tokio::test]
async fn test_should_reject_answers_from_unregistered_players() {
  let mut setup = setup_with_players(&["ann"]).await.unwrap();
  let stranger = PlayerId(7);

  let error = setup.answer(stranger, "Paris").await.unwrap_err();

  assert_eq!(error, Error::UnknownPlayer { player_id: stranger });
  let notices = TestSetup::notices_for(&setup.drain(), stranger);
  assert!(matches!(notices.as_slice(), [Notice::Rejected { .. }]));
  assert_eq!(setup.session.player_ids().await, setup.added);
}

#[rstest]
#[tokio::test]
async fn test_should_drop_answers_during_lockout_before_checking_for_a_question() {
  let config = GameConfig {
    clear_pending_on_wrong_answer: true,
    ..test_config()
  };
  let mut setup = setup_with_config(config, &["ann"]).await.unwrap();
  let ann = setup.added[0];

  setup.select(ann, "C1").await.unwrap();
  setup.answer(ann, WRONG_ANSWER).await.unwrap();
  assert!(setup.session.player_state(ann).await.unwrap().session.pending().is_none());
  setup.drain();

  setup.clock.advance(seconds(14));
  assert_eq!(setup.answer(ann, "anything").await.unwrap(), SubmitAnswerResponse::Dropped);
  assert!(setup.drain().is_empty());

  setup.clock.advance(seconds(1));
  assert_eq!(setup.answer(ann, "anything").await.unwrap_err(), Error::NoPendingQuestion);
}

#[rstest]
#[tokio::test]
async fn test_should_leave_no_question_pending_for_an_owned_cell() {
  let setup = setup_with_players(&["ann"]).await.unwrap();
  let ann = setup.added[0];
  setup.capture(ann, "D4").await;

  assert!(matches!(
    setup.select(ann, "D4").await.unwrap_err(),
    Error::AlreadyOwnedBySelf { .. }
  ));
  assert!(setup.session.player_state(ann).await.unwrap().session.pending().is_none());
  assert_eq!(setup.answer(ann, "anything").await.unwrap_err(), Error::NoPendingQuestion);
  assert_eq!(setup.session.player_state(ann).await.unwrap().score, 100);
}

#[rstest]
#[tokio::test]
async fn test_should_keep_the_same_color_for_every_capture() {
  let setup = setup_with_players(&["ann", "bob"]).await.unwrap();
  let (ann, bob) = (setup.added[0], setup.added[1]);

  for cell in ["A1", "A2", "B1"] {
    setup.capture(ann, cell).await;
  }
  setup.capture(bob, "F6").await;

  let snapshot = setup.session.try_query_grid().await.unwrap().snapshot;
  let ann_color = setup.session.player_state(ann).await.unwrap().color.unwrap();
  let bob_color = setup.session.player_state(bob).await.unwrap().color.unwrap();

  assert_ne!(ann_color, bob_color);
  assert_eq!(snapshot.owned_by(ann).count(), 3);
  assert!(snapshot.owned_by(ann).all(|cell| cell.color == Some(ann_color)));
  assert!(snapshot.owned_by(bob).all(|cell| cell.color == Some(bob_color)));
  assert!(snapshot
    .cells
    .iter()
    .all(|cell| cell.revealed == cell.owner.is_some() && cell.color.is_some() == cell.revealed));

  let scores = setup.session.try_query_scores().await.unwrap().scores;
  assert_eq!(scores.score_of(ann), Some(300));
  assert_eq!(scores.score_of(bob), Some(100));
}
