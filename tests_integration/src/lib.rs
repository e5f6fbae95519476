use chrono::{Duration, TimeZone, Utc};
use game_core::types::{
  DateTimeUtc, GameConfig, GameSession, ManualClock, Notice, Outbound, PlayerId, RegisterRequest, Result,
  SelectCellRequest, SelectCellResponse, SubmitAnswerRequest, SubmitAnswerResponse,
};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

pub const WRONG_ANSWER: &str = "certainly not the answer";

#[derive(Debug)]
pub struct TestSetup {
  pub session: Arc<GameSession>,
  pub clock: Arc<ManualClock>,
  pub outbound: UnboundedReceiver<Outbound>,
  pub added: Vec<PlayerId>,
}

pub fn start_time() -> DateTimeUtc {
  Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

pub fn seconds(count: i64) -> Duration {
  Duration::seconds(count)
}

pub fn test_config() -> GameConfig {
  GameConfig {
    seed: Some(42),
    ..GameConfig::default()
  }
}

pub async fn setup_with_players<'b, T>(players: impl IntoIterator<Item = T>) -> Result<TestSetup>
where
  T: core::borrow::Borrow<&'b str>,
{
  setup_with_config(test_config(), players).await
}

pub async fn setup_with_config<'b, T>(config: GameConfig, players: impl IntoIterator<Item = T>) -> Result<TestSetup>
where
  T: core::borrow::Borrow<&'b str>,
{
  let clock = Arc::new(ManualClock::new(start_time()));
  let (notifier, outbound) = game_core::types::ChannelNotifier::channel();
  let session = GameSession::try_with_clock(config, Arc::new(notifier), clock.clone())?;
  let session = Arc::new(session);

  let mut added = Vec::new();
  for (i, display_name) in players.into_iter().enumerate() {
    let player_id = PlayerId(1000 + i as i64);
    session
      .try_register(RegisterRequest {
        player_id,
        display_name: display_name.borrow().to_string(),
      })
      .await?;
    added.push(player_id);
  }

  let mut setup = TestSetup {
    session,
    clock,
    outbound,
    added,
  };
  setup.drain();
  Ok(setup)
}

impl TestSetup {
  /// Everything sent since the last drain.
  pub fn drain(&mut self) -> Vec<Outbound> {
    let mut messages = Vec::new();
    while let Ok(message) = self.outbound.try_recv() {
      messages.push(message);
    }
    messages
  }

  pub fn notices_for(messages: &[Outbound], player_id: PlayerId) -> Vec<Notice> {
    messages
      .iter()
      .filter_map(|message| match message {
        Outbound::Notice { player_id: to, notice } if *to == player_id => Some(notice.clone()),
        _ => None,
      })
      .collect()
  }

  pub fn grids_sent(messages: &[Outbound]) -> Vec<PlayerId> {
    messages
      .iter()
      .filter(|message| matches!(message, Outbound::Grid { .. }))
      .map(Outbound::player_id)
      .collect()
  }

  pub async fn select(&self, player_id: PlayerId, cell: &str) -> Result<SelectCellResponse> {
    self
      .session
      .try_select_cell(SelectCellRequest {
        player_id,
        cell: cell.to_string(),
      })
      .await
  }

  pub async fn answer(&self, player_id: PlayerId, answer: &str) -> Result<SubmitAnswerResponse> {
    self
      .session
      .try_submit_answer(SubmitAnswerRequest {
        player_id,
        answer: answer.to_string(),
      })
      .await
  }

  /// Expected answer of the player's pending question.
  pub async fn expected_answer(&self, player_id: PlayerId) -> String {
    let player = self.session.player_state(player_id).await.unwrap();
    player.session.pending().unwrap().question.answer().to_string()
  }

  pub async fn answer_correctly(&self, player_id: PlayerId) -> Result<SubmitAnswerResponse> {
    let answer = self.expected_answer(player_id).await;
    self.answer(player_id, &answer).await
  }

  /// Select then answer correctly; for cells nobody owns yet.
  pub async fn capture(&self, player_id: PlayerId, cell: &str) -> SubmitAnswerResponse {
    self.select(player_id, cell).await.unwrap();
    self.answer_correctly(player_id).await.unwrap()
  }
}
