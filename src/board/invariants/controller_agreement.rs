//! Controller agreement: control and turn records point at each other.

use super::super::state::BoardState;
use super::super::turn::Turn;
use super::Invariant;

/// Invariant: a controlled cell's controller is the player whose turn
/// record points at that cell.
pub(crate) struct ControllerAgreementInvariant;

impl Invariant<BoardState> for ControllerAgreementInvariant {
    fn holds(state: &BoardState) -> bool {
        state.cells.iter().enumerate().all(|(index, cell)| {
            let Some(owner) = &cell.controller else {
                return true;
            };
            let pos = state.position_of(index);
            match state.turn(owner) {
                Turn::Idle => false,
                Turn::OneCard { first } => first == pos,
                Turn::Finished { first, second, .. } => first == pos || second == Some(pos),
            }
        })
    }

    fn description() -> &'static str {
        "a controlled cell's controller has the cell recorded in its turn"
    }
}
