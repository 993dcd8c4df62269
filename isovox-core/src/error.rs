//! Error types for sculpture operations.

use thiserror::Error;

use crate::grid::GridCoord;

/// Result type for sculpture operations.
pub type SculptResult<T> = Result<T, SculptError>;

/// Errors that can occur in sculpture operations.
///
/// None of these are fatal; the editor stays interactive after any of
/// them. An unresolved pick and a no-op edit are ordinary states, not
/// errors, and are represented by `Option`/[`crate::EditOutcome`] instead.
#[derive(Debug, Error)]
pub enum SculptError {
    /// A proposed block set does not use the same per-color counts as the
    /// current sculpture.
    #[error("color inventory mismatch for {color}: expected {expected} blocks, got {actual}")]
    InventoryMismatch {
        /// The color whose count differs.
        color: String,
        /// Count in the current sculpture.
        expected: usize,
        /// Count in the proposed block set.
        actual: usize,
    },

    /// A proposed block set places two blocks on the same coordinate.
    #[error("overlapping blocks at {0}")]
    OverlappingBlock(GridCoord),

    /// An operation that requires at least one block was requested on an
    /// empty sculpture.
    #[error("sculpture is empty")]
    EmptySculpture,

    /// Block list serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
