//! Turn positions: recorded flips refer to cells on the grid.

use super::super::state::BoardState;
use super::super::turn::Turn;
use super::Invariant;

/// Invariant: every position stored in a turn record is in bounds.
pub(crate) struct TurnPositionsInvariant;

impl Invariant<BoardState> for TurnPositionsInvariant {
    fn holds(state: &BoardState) -> bool {
        state.turns.values().all(|turn| match *turn {
            Turn::Idle => true,
            Turn::OneCard { first } => state.in_bounds(first),
            Turn::Finished { first, second, .. } => {
                state.in_bounds(first) && second.map_or(true, |pos| state.in_bounds(pos))
            }
        })
    }

    fn description() -> &'static str {
        "recorded turn positions are in bounds"
    }
}
