//! Error types for the collaborator client.

use isovox_core::GridCoord;
use thiserror::Error;

/// Errors that can occur when talking to the AI collaborator.
#[derive(Debug, Error)]
pub enum CollabError {
    /// The collaborator base URL provided is invalid.
    #[error("invalid collaborator URL: {0}")]
    InvalidUrl(String),
    /// No API key was configured.
    #[error("collaborator API key missing")]
    MissingApiKey,
    /// HTTP layer failed (connection, timeout, etc.).
    #[error("collaborator HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// JSON parsing failed.
    #[error("failed to parse collaborator payload: {0}")]
    Json(#[from] serde_json::Error),
    /// The collaborator returned an application-level error.
    #[error("collaborator API error {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body.
        message: String,
    },
    /// The response did not match the expected structure.
    #[error("unexpected collaborator response: {0}")]
    UnexpectedResponse(String),
    /// Another request is already in flight.
    #[error("a collaborator request is already in flight")]
    Busy,
    /// The sculpture has no blocks, so there is nothing to send.
    #[error("the sculpture is empty")]
    EmptySculpture,
    /// A remix proposal changed the per-color block counts.
    #[error("remix changed the block inventory for {color}: expected {expected}, got {actual}")]
    InventoryMismatch {
        /// The color whose count changed.
        color: String,
        /// Count in the current sculpture.
        expected: usize,
        /// Count in the proposal.
        actual: usize,
    },
    /// A remix proposal placed two blocks on the same cell.
    #[error("remix placed two blocks at {0}")]
    OverlappingBlock(GridCoord),
}

/// Result alias for collaborator operations.
pub type CollabResult<T> = Result<T, CollabError>;
