//! Error types for the game core.

use derive_more::{Display, Error};

/// Caller errors raised by the game core.
///
/// Rejected moves (occupied cell, decided game) are not errors; see
/// [`MoveOutcome`](crate::MoveOutcome).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GameError {
    /// A cell index outside 0-8.
    #[display("Cell index {} is out of bounds (must be 0-8)", index)]
    InvalidIndex {
        /// The offending index.
        index: usize,
    },
    /// A history step past the last recorded entry.
    #[display("Step {} is out of range (history has {} entries)", step, len)]
    IndexOutOfRange {
        /// The requested step.
        step: usize,
        /// Number of entries in the history.
        len: usize,
    },
    /// A recorded history entry that normal play cannot produce.
    #[display("History entry {} does not follow from the one before it", step)]
    InvalidHistory {
        /// First offending step.
        step: usize,
    },
}
