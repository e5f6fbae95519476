use game_core::types::{GridSnapshot, Scoreboard};
use std::fmt::Write;

const HIDDEN: &str = "   .    ";

/// Text stand-in for the image renderer: one row per line, owned cells show
/// their color, untouched cells a dot.
pub fn render_grid(snapshot: &GridSnapshot) -> String {
  let mut out = String::new();

  let _ = write!(out, "   ");
  for column in 0..snapshot.columns {
    let _ = write!(out, "{:^8}", column + 1);
  }
  out.push('\n');

  for row in snapshot.cells.chunks(snapshot.columns.max(1)) {
    if let Some(first) = row.first() {
      let label = first.id.to_string();
      let _ = write!(out, "{:<3}", label.chars().next().unwrap_or('?'));
    }
    for cell in row {
      match cell.color.filter(|_| cell.revealed) {
        Some(color) => {
          let _ = write!(out, "{color} ");
        }
        None => out.push_str(HIDDEN),
      }
    }
    out.push('\n');
  }

  out
}

pub fn render_scores(scores: &Scoreboard) -> String {
  scores.to_string()
}
