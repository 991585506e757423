//! Cell consistency: empty cells are dormant, controlled cards face up.

use super::super::state::BoardState;
use super::Invariant;

/// Invariant: an empty cell is face-down and uncontrolled; a controlled
/// cell is face-up and holds a card.
pub(crate) struct CellConsistencyInvariant;

impl Invariant<BoardState> for CellConsistencyInvariant {
    fn holds(state: &BoardState) -> bool {
        state.cells.iter().all(|cell| match &cell.value {
            None => !cell.face_up && cell.controller.is_none(),
            Some(_) => cell.controller.is_none() || cell.face_up,
        })
    }

    fn description() -> &'static str {
        "empty cells are face-down and uncontrolled; controlled cells are face-up cards"
    }
}
