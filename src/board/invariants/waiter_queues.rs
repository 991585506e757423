//! Waiter queues: only live queues, only real cells.

use super::super::state::BoardState;
use super::Invariant;

/// Invariant: every waiter queue is keyed by a cell on the grid and is
/// non-empty (a drained queue is dropped, not kept around).
pub(crate) struct WaiterQueuesInvariant;

impl Invariant<BoardState> for WaiterQueuesInvariant {
    fn holds(state: &BoardState) -> bool {
        state
            .waiters
            .queues()
            .all(|(index, len)| index < state.cells.len() && len > 0)
    }

    fn description() -> &'static str {
        "waiter queues are keyed by grid cells and never kept empty"
    }
}
