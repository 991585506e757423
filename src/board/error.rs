//! Flip error types.

use derive_more::{Display, Error};

/// Failure modes of a flip.
///
/// A failed flip does not poison the board: the side effects dictated by
/// the flip rules (relinquishing the first card on a failed second flip)
/// take effect before the error is surfaced.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum FlipError {
    /// The flip referenced an empty or out-of-bounds cell.
    #[display("No card at position ({},{})", row, col)]
    NoCardHere {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },
    /// The second flip targeted a card controlled by some player.
    #[display("Card at ({},{}) is controlled by another player", row, col)]
    CardControlled {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_text_is_stable() {
        let no_card = FlipError::NoCardHere { row: 1, col: 2 };
        assert!(no_card.to_string().contains("No card at position"));

        let controlled = FlipError::CardControlled { row: 0, col: 0 };
        assert!(controlled.to_string().contains("controlled by"));
    }
}
