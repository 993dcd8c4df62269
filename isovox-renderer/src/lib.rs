//! # Isovox Renderer
//!
//! Rendering layer for the isometric sculpture editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │              Renderer                      │
//! │  build_frame(session) -> Frame             │
//! └───────────────┬───────────────────────────┘
//!                 │
//!     ┌───────────┼───────────┐
//!     ▼           ▼           ▼
//! ┌────────┐ ┌─────────┐ ┌─────────┐
//! │ wgpu   │ │Software │ │ Trace   │
//! │(window)│ │ (RGBA8) │ │ (logs)  │
//! └────────┘ └─────────┘ └─────────┘
//! ```
//!
//! Frame building is backend-independent: [`build_frame`] turns a session
//! into depth-sorted, shaded cube sprites, and each backend only decides
//! how to put those sprites on screen. The software backend rasterizes to
//! a readable RGBA8 buffer; the wgpu backend reuses it as its pixel source
//! and blits the result to a window surface.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod error;
pub mod frame;

pub use backend::software::SoftwareBackend;
pub use backend::trace::TraceBackend;
pub use backend::RenderBackend;
pub use error::{RenderError, RenderResult};
pub use frame::{build_frame, face_polygon, CubeSprite, FacePaint, Frame, DEFAULT_BACKGROUND};

use isovox_core::EditorSession;
use serde::{Deserialize, Serialize};

/// Available rendering backend types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    /// GPU presentation through wgpu into a window.
    Gpu,
    /// CPU rasterizer writing an RGBA8 buffer.
    Software,
    /// Logging-only fallback.
    Trace,
}

/// Renderer configuration.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Preferred backend for windowless construction.
    pub preferred_backend: BackendType,
    /// Background clear color (RGBA).
    pub background: [u8; 4],
    /// Viewport width in pixels.
    pub width: u32,
    /// Viewport height in pixels.
    pub height: u32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            preferred_backend: BackendType::Software,
            background: DEFAULT_BACKGROUND,
            width: 800,
            height: 600,
        }
    }
}

/// The renderer: owns a backend and turns sessions into presented frames.
pub struct Renderer {
    config: RendererConfig,
    backend: Box<dyn RenderBackend>,
    frame_count: u64,
}

impl Renderer {
    /// Create a renderer with the configured backend.
    ///
    /// The GPU backend needs a window, so a `Gpu` preference here falls
    /// back to the software rasterizer; use [`Renderer::with_backend`] to
    /// attach a windowed backend.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidViewport`] if the configured viewport
    /// has a zero dimension.
    pub fn new(config: RendererConfig) -> RenderResult<Self> {
        let backend = Self::create_backend(&config)?;
        tracing::info!("renderer initialized with {:?} backend", backend.backend_type());
        Ok(Self {
            config,
            backend,
            frame_count: 0,
        })
    }

    /// Create a renderer driving an externally constructed backend.
    #[must_use]
    pub fn with_backend(config: RendererConfig, backend: Box<dyn RenderBackend>) -> Self {
        tracing::info!("renderer attached to {:?} backend", backend.backend_type());
        Self {
            config,
            backend,
            frame_count: 0,
        }
    }

    fn create_backend(config: &RendererConfig) -> RenderResult<Box<dyn RenderBackend>> {
        match config.preferred_backend {
            BackendType::Gpu => {
                tracing::warn!("gpu backend requires a window, falling back to software");
                Ok(Box::new(SoftwareBackend::new(config.width, config.height)?))
            }
            BackendType::Software => {
                Ok(Box::new(SoftwareBackend::new(config.width, config.height)?))
            }
            BackendType::Trace => Ok(Box::new(TraceBackend::new())),
        }
    }

    /// Build and draw one frame from the session's current state.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to draw.
    pub fn render(&mut self, session: &EditorSession) -> RenderResult<()> {
        let mut frame = build_frame(session);
        frame.background = self.config.background;
        self.backend.render(&frame)?;
        self.frame_count += 1;
        Ok(())
    }

    /// Resize the backend's surface.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the new size.
    pub fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        self.config.width = width;
        self.config.height = height;
        self.backend.resize(width, height)
    }

    /// The active backend type.
    #[must_use]
    pub fn backend_type(&self) -> BackendType {
        self.backend.backend_type()
    }

    /// Mutable access to the backend, for backend-specific operations.
    pub fn backend_mut(&mut self) -> &mut dyn RenderBackend {
        self.backend.as_mut()
    }

    /// Number of frames rendered so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderer_defaults_to_software() {
        let renderer = Renderer::new(RendererConfig::default()).expect("should create renderer");
        assert_eq!(renderer.backend_type(), BackendType::Software);
    }

    #[test]
    fn test_gpu_preference_falls_back_without_window() {
        let config = RendererConfig {
            preferred_backend: BackendType::Gpu,
            ..RendererConfig::default()
        };
        let renderer = Renderer::new(config).expect("should fall back");
        assert_eq!(renderer.backend_type(), BackendType::Software);
    }

    #[test]
    fn test_render_counts_frames() {
        let session = EditorSession::new(800.0, 600.0).with_seed_block();
        let mut renderer =
            Renderer::new(RendererConfig::default()).expect("should create renderer");
        renderer.render(&session).expect("should render");
        renderer.render(&session).expect("should render");
        assert_eq!(renderer.frame_count(), 2);
    }
}
