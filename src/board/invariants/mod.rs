//! First-class invariants of the board.
//!
//! Invariants are logical properties that must hold before and after
//! every public operation. Each lives in its own module, is testable
//! independently, and is re-checked after every public mutation in
//! debug builds.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

mod cell_consistency;
mod control_limit;
mod controller_agreement;
mod turn_positions;
mod waiter_queues;

pub(crate) use cell_consistency::CellConsistencyInvariant;
pub(crate) use control_limit::ControlLimitInvariant;
pub(crate) use controller_agreement::ControllerAgreementInvariant;
pub(crate) use turn_positions::TurnPositionsInvariant;
pub(crate) use waiter_queues::WaiterQueuesInvariant;

use super::state::BoardState;

fn check<I: Invariant<BoardState>>(state: &BoardState) -> Result<(), &'static str> {
    if I::holds(state) {
        Ok(())
    } else {
        Err(I::description())
    }
}

/// Checks every board invariant, reporting the first violation.
pub(crate) fn verify_all(state: &BoardState) -> Result<(), &'static str> {
    check::<CellConsistencyInvariant>(state)?;
    check::<ControlLimitInvariant>(state)?;
    check::<ControllerAgreementInvariant>(state)?;
    check::<TurnPositionsInvariant>(state)?;
    check::<WaiterQueuesInvariant>(state)?;
    Ok(())
}
