//! Control limit: a player holds at most two cards.

use std::collections::HashMap;

use super::super::state::BoardState;
use super::Invariant;

/// Invariant: each player controls at most two cells.
pub(crate) struct ControlLimitInvariant;

impl Invariant<BoardState> for ControlLimitInvariant {
    fn holds(state: &BoardState) -> bool {
        let mut held: HashMap<&str, usize> = HashMap::new();
        for cell in &state.cells {
            if let Some(owner) = &cell.controller {
                *held.entry(owner.as_str()).or_default() += 1;
            }
        }
        held.values().all(|&count| count <= 2)
    }

    fn description() -> &'static str {
        "each player controls at most two cells"
    }
}
