//! Software rasterizer backend.
//!
//! Fills the frame's face quads into an RGBA8 buffer with scanline
//! conversion and src-over blending. The buffer is readable, so this
//! backend serves both headless use and as the pixel source the GPU
//! backend uploads for presentation.

use isovox_core::parse_hex;

use crate::frame::{CubeSprite, Frame};
use crate::{BackendType, RenderError, RenderResult};

use super::RenderBackend;

/// Outline drawn around every cube, a faint black.
const OUTLINE: ([u8; 3], f32) = ([0, 0, 0], 0.1);

/// Outline drawn around the hovered cube, near-white.
const HOVER_OUTLINE: ([u8; 3], f32) = ([255, 255, 255], 0.8);

/// CPU rasterizer producing an RGBA8 framebuffer.
pub struct SoftwareBackend {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl SoftwareBackend {
    /// Create a rasterizer for the given viewport size.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidViewport`] for a zero-sized viewport.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidViewport { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        })
    }

    /// Viewport width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Viewport height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The rasterized frame as tightly packed RGBA8 rows.
    #[must_use]
    pub fn frame_data(&self) -> &[u8] {
        &self.pixels
    }

    /// Read one pixel as RGBA.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    fn clear(&mut self, rgba: [u8; 4]) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    fn blend_pixel(&mut self, x: i64, y: i64, rgb: [u8; 3], alpha: f32) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        #[allow(clippy::cast_sign_loss)]
        let i = (y as usize * self.width as usize + x as usize) * 4;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        for (c, &src) in rgb.iter().enumerate() {
            let dst = f32::from(self.pixels[i + c]);
            self.pixels[i + c] = (f32::from(src) * alpha + dst * (1.0 - alpha)).round() as u8;
        }
        self.pixels[i + 3] = 255;
    }

    /// Even-odd scanline fill of a convex quad, sampling pixel centers.
    fn fill_quad(&mut self, quad: &[(f32, f32); 4], rgb: [u8; 3], alpha: f32) {
        let min_y = quad.iter().map(|p| p.1).fold(f32::INFINITY, f32::min);
        let max_y = quad.iter().map(|p| p.1).fold(f32::NEG_INFINITY, f32::max);

        #[allow(clippy::cast_possible_truncation)]
        let row_start = (min_y - 0.5).ceil().max(0.0) as i64;
        #[allow(clippy::cast_possible_truncation)]
        let row_end = ((max_y - 0.5).floor() as i64).min(i64::from(self.height) - 1);

        for row in row_start..=row_end {
            #[allow(clippy::cast_precision_loss)]
            let yc = row as f32 + 0.5;

            let mut xs: Vec<f32> = Vec::with_capacity(2);
            for i in 0..4 {
                let (x0, y0) = quad[i];
                let (x1, y1) = quad[(i + 1) % 4];
                if (y0 <= yc) != (y1 <= yc) {
                    xs.push(x0 + (yc - y0) * (x1 - x0) / (y1 - y0));
                }
            }
            xs.sort_by(f32::total_cmp);

            for pair in xs.chunks_exact(2) {
                #[allow(clippy::cast_possible_truncation)]
                let col_start = (pair[0] - 0.5).ceil().max(0.0) as i64;
                #[allow(clippy::cast_possible_truncation)]
                let col_end = ((pair[1] - 0.5).floor() as i64).min(i64::from(self.width) - 1);
                for col in col_start..=col_end {
                    self.blend_pixel(col, row, rgb, alpha);
                }
            }
        }
    }

    /// Bresenham line with blending, for cube outlines.
    #[allow(clippy::cast_possible_truncation)]
    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), rgb: [u8; 3], alpha: f32) {
        let (mut x0, mut y0) = (from.0.round() as i64, from.1.round() as i64);
        let (x1, y1) = (to.0.round() as i64, to.1.round() as i64);

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.blend_pixel(x0, y0, rgb, alpha);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn draw_sprite(&mut self, sprite: &CubeSprite) {
        let (stroke, stroke_alpha) = if sprite.hovered { HOVER_OUTLINE } else { OUTLINE };

        for face in &sprite.faces {
            let Some(rgb) = parse_hex(&face.color) else {
                tracing::warn!(color = %face.color, "unparseable face color, skipping fill");
                continue;
            };
            let quad = [
                (face.polygon[0].x, face.polygon[0].y),
                (face.polygon[1].x, face.polygon[1].y),
                (face.polygon[2].x, face.polygon[2].y),
                (face.polygon[3].x, face.polygon[3].y),
            ];
            self.fill_quad(&quad, rgb, sprite.alpha);
            for i in 0..4 {
                self.draw_line(quad[i], quad[(i + 1) % 4], stroke, stroke_alpha * sprite.alpha);
            }
        }
    }
}

impl RenderBackend for SoftwareBackend {
    fn backend_type(&self) -> BackendType {
        BackendType::Software
    }

    fn render(&mut self, frame: &Frame) -> RenderResult<()> {
        self.clear(frame.background);

        for sprite in &frame.sprites {
            self.draw_sprite(sprite);
        }
        if let Some(ghost) = &frame.ghost {
            self.draw_sprite(ghost);
        }

        tracing::trace!(
            "software render: {} cubes into {}x{}",
            frame.cube_count(),
            self.width,
            self.height
        );
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidViewport { width, height });
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![0; width as usize * height as usize * 4];
        tracing::debug!("software backend resized to {}x{}", width, height);
        Ok(())
    }
}
