//! Rendering backend implementations.

pub mod software;
pub mod trace;
#[cfg(feature = "gpu")]
pub mod wgpu;

use crate::frame::Frame;
use crate::{BackendType, RenderResult};

/// Trait for rendering backends.
pub trait RenderBackend {
    /// Get the backend type.
    fn backend_type(&self) -> BackendType;

    /// Draw a built frame.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    fn render(&mut self, frame: &Frame) -> RenderResult<()>;

    /// Resize the rendering surface.
    ///
    /// # Errors
    ///
    /// Returns an error if resizing fails.
    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()>;
}
