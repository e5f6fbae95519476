use crate::types::{CellId, Color, Error, PlayerId, Result, MAX_COLUMNS, MAX_ROWS};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
  pub id: CellId,
  pub owner: Option<PlayerId>,
  pub color: Option<Color>,
  /// Set on the first capture and never cleared.
  pub revealed: bool,
}

impl Cell {
  fn new(id: CellId) -> Self {
    Self {
      id,
      owner: None,
      color: None,
      revealed: false,
    }
  }

  /// Plain state write; the caller decides whether the capture is allowed.
  pub fn set_owner(&mut self, player: PlayerId, color: Color) {
    self.owner = Some(player);
    self.color = Some(color);
    self.revealed = true;
  }

  pub fn is_owned_by(&self, player: PlayerId) -> bool {
    self.owner == Some(player)
  }
}

pub type CellSnapshot = Cell;

/// Read-only copy of the grid handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
  pub rows: usize,
  pub columns: usize,
  pub cells: Vec<CellSnapshot>,
}

impl GridSnapshot {
  pub fn cell(&self, id: CellId) -> Option<&CellSnapshot> {
    (id.row < self.rows && id.column < self.columns)
      .then(|| self.cells.get(id.row * self.columns + id.column))
      .flatten()
  }

  pub fn owned_by(&self, player: PlayerId) -> impl Iterator<Item = &CellSnapshot> {
    self.cells.iter().filter(move |cell| cell.is_owned_by(player))
  }

  pub fn to_json(&self) -> Result<serde_json::Value> {
    serde_json::to_value(self).map_err(|_| Error::Unexpected {
      message: "failed to serialize grid snapshot",
    })
  }
}

/// Fixed topology; each cell is guarded on its own so captures of different
/// cells never wait on each other.
#[derive(Debug)]
pub struct Grid {
  rows: usize,
  columns: usize,
  cells: Vec<Mutex<Cell>>,
}

impl Grid {
  pub fn try_new(rows: usize, columns: usize) -> Result<Self> {
    Some((rows, columns))
      .filter(|(rows, columns)| (1..=MAX_ROWS).contains(rows) && (1..=MAX_COLUMNS).contains(columns))
      .ok_or(Error::InvalidGridDimensions { rows, columns })?;

    let cells = (0..rows)
      .flat_map(|row| (0..columns).map(move |column| Mutex::new(Cell::new(CellId::new(row, column)))))
      .collect();

    Ok(Self { rows, columns, cells })
  }

  pub fn rows(&self) -> usize {
    self.rows
  }

  pub fn columns(&self) -> usize {
    self.columns
  }

  pub fn contains(&self, id: CellId) -> bool {
    id.row < self.rows && id.column < self.columns
  }

  /// Parses the text and checks it against this grid's bounds.
  pub fn parse_cell(&self, text: &str) -> Result<CellId> {
    CellId::parse(text)
      .ok()
      .filter(|id| self.contains(*id))
      .ok_or_else(|| Error::InvalidCell {
        cell: text.trim().to_string(),
      })
  }

  fn slot(&self, id: CellId) -> Result<&Mutex<Cell>> {
    Some(id)
      .filter(|id| self.contains(*id))
      .and_then(|id| self.cells.get(id.row * self.columns + id.column))
      .ok_or_else(|| Error::InvalidCell { cell: id.to_string() })
  }

  pub async fn lookup(&self, id: CellId) -> Result<Cell> {
    Ok(self.slot(id)?.lock().await.clone())
  }

  /// Holds the cell for a check-then-set. Keep the guard short-lived.
  pub async fn lock(&self, id: CellId) -> Result<MutexGuard<'_, Cell>> {
    Ok(self.slot(id)?.lock().await)
  }

  pub async fn set_owner(&self, id: CellId, player: PlayerId, color: Color) -> Result<Cell> {
    let mut cell = self.lock(id).await?;
    cell.set_owner(player, color);
    Ok(cell.clone())
  }

  /// Copies the cells one guard at a time. Each cell is consistent, but the
  /// grid as a whole is not: a capture racing the copy may show up in some
  /// cells and not others. The broadcast after every capture corrects it.
  pub async fn render_snapshot(&self) -> GridSnapshot {
    let mut cells = Vec::with_capacity(self.cells.len());
    for slot in &self.cells {
      cells.push(slot.lock().await.clone());
    }

    GridSnapshot {
      rows: self.rows,
      columns: self.columns,
      cells,
    }
  }
}
