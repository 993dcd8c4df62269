//! Error types for rendering operations.

use thiserror::Error;

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// GPU adapter/device initialization failed.
    #[error("GPU initialization failed: {0}")]
    GpuInit(String),

    /// The presentation surface was lost or could not be acquired.
    #[error("surface error: {0}")]
    Surface(String),

    /// A zero-sized or otherwise unusable viewport was requested.
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
}
