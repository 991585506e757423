//! Core domain types for the memory board.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a player.
pub type PlayerId = String;

/// A card symbol. Symbols are opaque strings (commonly a single emoji)
/// compared by exact equality.
pub type Symbol = String;

/// A position on the board. Stored positions are always in bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Row index, 0-based.
    pub row: usize,
    /// Column index, 0-based.
    pub col: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// One cell of the grid.
///
/// A cell loses its value exactly once, when a matched pair is removed.
/// The controller is a soft claim, cleared when the player relinquishes
/// the card or the card is removed.
#[derive(Debug, Clone)]
pub(crate) struct Cell {
    pub(crate) value: Option<Symbol>,
    pub(crate) face_up: bool,
    pub(crate) controller: Option<PlayerId>,
}

impl Cell {
    pub(crate) fn new(symbol: Symbol) -> Self {
        Self {
            value: Some(symbol),
            face_up: false,
            controller: None,
        }
    }

    /// Removes the card: no value, face-down, uncontrolled.
    pub(crate) fn clear(&mut self) {
        self.value = None;
        self.face_up = false;
        self.controller = None;
    }

    /// How this cell renders from `player`'s perspective.
    pub(crate) fn view_for(&self, player: &str) -> CellView {
        match (&self.value, self.face_up, &self.controller) {
            (None, _, _) => CellView::Empty,
            (Some(_), false, _) => CellView::Down,
            (Some(value), true, Some(owner)) if owner == player => CellView::Mine(value.clone()),
            (Some(value), true, _) => CellView::Up(value.clone()),
        }
    }
}

/// Per-player rendering of one cell, as carried by a snapshot.
///
/// The `Display` form is the wire token: `none`, `down`, `my <symbol>`
/// or `up <symbol>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    /// The cell is empty (its pair was removed).
    Empty,
    /// The cell holds a face-down card.
    Down,
    /// The cell is face-up and controlled by the viewing player.
    Mine(Symbol),
    /// The cell is face-up and controlled by someone else, or uncontrolled.
    Up(Symbol),
}

impl fmt::Display for CellView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellView::Empty => write!(f, "none"),
            CellView::Down => write!(f, "down"),
            CellView::Mine(symbol) => write!(f, "my {}", symbol),
            CellView::Up(symbol) => write!(f, "up {}", symbol),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_tokens() {
        let mut cell = Cell::new("🦄".to_string());
        assert_eq!(cell.view_for("alice").to_string(), "down");

        cell.face_up = true;
        assert_eq!(cell.view_for("alice").to_string(), "up 🦄");

        cell.controller = Some("alice".to_string());
        assert_eq!(cell.view_for("alice").to_string(), "my 🦄");
        assert_eq!(cell.view_for("bob").to_string(), "up 🦄");

        cell.clear();
        assert_eq!(cell.view_for("alice").to_string(), "none");
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut cell = Cell::new("🌈".to_string());
        cell.face_up = true;
        cell.controller = Some("bob".to_string());
        cell.clear();
        assert!(cell.value.is_none());
        assert!(!cell.face_up);
        assert!(cell.controller.is_none());
    }

    #[test]
    fn test_position_display() {
        let pos = Position { row: 2, col: 5 };
        assert_eq!(pos.to_string(), "(2,5)");
    }
}
