//! Trace-logging fallback backend.
//!
//! Draws nothing; logs the frame contents instead. Useful headless and as
//! the last resort when no other backend is available.

use crate::frame::{CubeSprite, Frame};
use crate::{BackendType, RenderResult};

use super::RenderBackend;

/// Backend that logs frames through `tracing` instead of drawing them.
pub struct TraceBackend {
    width: u32,
    height: u32,
}

impl TraceBackend {
    /// Create a new trace backend.
    #[must_use]
    pub fn new() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }

    fn log_sprite(sprite: &CubeSprite, role: &str) {
        tracing::trace!(
            "render {role} cube {} at ({}, {}) top={} hovered={} alpha={}",
            sprite.coord,
            sprite.anchor.x,
            sprite.anchor.y,
            sprite.faces[0].color,
            sprite.hovered,
            sprite.alpha
        );
    }
}

impl Default for TraceBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for TraceBackend {
    fn backend_type(&self) -> BackendType {
        BackendType::Trace
    }

    fn render(&mut self, frame: &Frame) -> RenderResult<()> {
        tracing::trace!(
            "trace render: {} cubes, viewport {}x{}",
            frame.cube_count(),
            self.width,
            self.height
        );

        for sprite in &frame.sprites {
            Self::log_sprite(sprite, "solid");
        }
        if let Some(ghost) = &frame.ghost {
            Self::log_sprite(ghost, "ghost");
        }

        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        self.width = width;
        self.height = height;
        tracing::debug!("trace backend resized to {}x{}", width, height);
        Ok(())
    }
}
