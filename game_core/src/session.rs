use crate::commands::{
  try_process_command, try_query_grid, try_query_scores, try_register, try_select_cell, try_submit_answer,
};
use crate::types::{
  Clock, ColorAllocator, Command, CommandResponse, Error, GameConfig, Grid, GridSnapshot, Notice, Notifier, Player,
  PlayerId, Question, QuestionBank, QueryGridResponse, QueryScoresResponse, RegisterRequest, RegisterResponse, Result,
  ScoreEntry, Scoreboard, SelectCellRequest, SelectCellResponse, SubmitAnswerRequest, SubmitAnswerResponse, SystemClock,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

#[derive(Debug, Default)]
pub(crate) struct Roster {
  pub(crate) order: Vec<PlayerId>,
  pub(crate) players: HashMap<PlayerId, Arc<Mutex<Player>>>,
}

/// All state of one running game. Share it as `Arc<GameSession>`; every
/// command takes `&self`.
#[derive(Debug)]
pub struct GameSession {
  pub(crate) config: GameConfig,
  pub(crate) grid: Grid,
  pub(crate) questions: QuestionBank,
  pub(crate) colors: ColorAllocator,
  pub(crate) roster: RwLock<Roster>,
  rng: std::sync::Mutex<StdRng>,
  clock: Arc<dyn Clock>,
  notifier: Arc<dyn Notifier>,
}

impl GameSession {
  pub fn try_new(config: GameConfig, notifier: Arc<dyn Notifier>) -> Result<Self> {
    Self::try_with_clock(config, notifier, Arc::new(SystemClock))
  }

  pub fn try_with_clock(config: GameConfig, notifier: Arc<dyn Notifier>, clock: Arc<dyn Clock>) -> Result<Self> {
    config.validate()?;
    let questions = QuestionBank::from_config(&config.questions)?;
    Self::try_with_parts(config, questions, notifier, clock)
  }

  pub fn try_with_parts(
    config: GameConfig,
    questions: QuestionBank,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
  ) -> Result<Self> {
    config.validate()?;
    let grid = Grid::try_new(config.rows, config.columns)?;
    let rng = config.seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    let colors = ColorAllocator::new(config.seed.map(|seed| seed.wrapping_add(1)));

    tracing::info!(
      rows = config.rows,
      columns = config.columns,
      questions = questions.len(),
      "created game session"
    );

    Ok(Self {
      config,
      grid,
      questions,
      colors,
      roster: RwLock::new(Roster::default()),
      rng: std::sync::Mutex::new(rng),
      clock,
      notifier,
    })
  }

  pub fn config(&self) -> &GameConfig {
    &self.config
  }

  pub fn grid(&self) -> &Grid {
    &self.grid
  }

  pub fn questions(&self) -> &QuestionBank {
    &self.questions
  }

  pub(crate) fn now(&self) -> crate::types::DateTimeUtc {
    self.clock.now()
  }

  pub(crate) fn draw_question(&self) -> Question {
    let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    self.questions.sample(&mut *rng)
  }

  pub(crate) fn notify(&self, player_id: PlayerId, notice: Notice) {
    self.notifier.notify(player_id, notice);
  }

  /// Reports a failed command back to the player who sent it.
  pub(crate) fn reject<T>(&self, player_id: PlayerId, error: Error) -> Result<T> {
    tracing::warn!(player = %player_id, %error, "rejected command");
    self.notify(
      player_id,
      Notice::Rejected {
        reason: error.to_string(),
      },
    );
    Err(error)
  }

  pub(crate) async fn player(&self, player_id: PlayerId) -> Result<Arc<Mutex<Player>>> {
    self
      .roster
      .read()
      .await
      .players
      .get(&player_id)
      .cloned()
      .ok_or(Error::UnknownPlayer { player_id })
  }

  pub async fn player_ids(&self) -> Vec<PlayerId> {
    self.roster.read().await.order.clone()
  }

  /// Copy of a player's record, for inspection.
  pub async fn player_state(&self, player_id: PlayerId) -> Result<Player> {
    let player = self.player(player_id).await?;
    let player = player.lock().await;
    Ok(player.clone())
  }

  pub async fn scoreboard(&self) -> Scoreboard {
    let players = {
      let roster = self.roster.read().await;
      roster
        .order
        .iter()
        .filter_map(|id| roster.players.get(id).cloned())
        .collect::<Vec<_>>()
    };

    let mut entries = Vec::with_capacity(players.len());
    for player in players {
      let player = player.lock().await;
      entries.push(ScoreEntry {
        player_id: player.id,
        display_name: player.display_name.clone(),
        score: player.score,
      });
    }

    Scoreboard { entries }
  }

  /// Sends the grid and scores to one player.
  pub(crate) async fn send_grid_to(&self, player_id: PlayerId) {
    let snapshot = self.grid.render_snapshot().await;
    let scores = self.scoreboard().await;
    self.notifier.broadcast_grid(player_id, &snapshot, &scores);
  }

  /// Sends the grid and scores to every registered player. Must be called
  /// without any player or cell guard held.
  pub(crate) async fn broadcast_grid(&self) -> GridSnapshot {
    let snapshot = self.grid.render_snapshot().await;
    let scores = self.scoreboard().await;
    let recipients = self.player_ids().await;

    tracing::debug!(recipients = recipients.len(), "broadcasting grid");
    for player_id in recipients {
      self.notifier.broadcast_grid(player_id, &snapshot, &scores);
    }

    snapshot
  }

  pub async fn try_register(&self, request: RegisterRequest) -> Result<RegisterResponse> {
    try_register(self, request).await
  }

  pub async fn try_select_cell(&self, request: SelectCellRequest) -> Result<SelectCellResponse> {
    try_select_cell(self, request).await
  }

  pub async fn try_submit_answer(&self, request: SubmitAnswerRequest) -> Result<SubmitAnswerResponse> {
    try_submit_answer(self, request).await
  }

  pub async fn try_query_grid(&self) -> Result<QueryGridResponse> {
    try_query_grid(self).await
  }

  pub async fn try_query_scores(&self) -> Result<QueryScoresResponse> {
    try_query_scores(self).await
  }

  pub async fn try_process_command(&self, command: Command) -> Result<CommandResponse> {
    try_process_command(self, command).await
  }
}
