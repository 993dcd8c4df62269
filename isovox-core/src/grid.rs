//! Grid coordinates, cube faces, and the isometric projection.

use serde::{Deserialize, Serialize};

/// Half the screen width of an isometric tile, in pixels.
pub const TILE_HALF_WIDTH: f32 = 32.0;

/// Half the screen height of an isometric tile, in pixels.
pub const TILE_HALF_HEIGHT: f32 = 16.0;

/// Screen height of the vertical part of a cube, in pixels.
pub const BLOCK_HEIGHT: f32 = 24.0;

/// An integer grid coordinate identifying one potential unit cube.
///
/// The grid is unbounded; any integer triple is valid, including
/// negative components.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct GridCoord {
    /// Grid x (screen down-right under the projection).
    pub x: i32,
    /// Grid y (screen down-left under the projection).
    pub y: i32,
    /// Grid z (screen up).
    pub z: i32,
}

impl GridCoord {
    /// Create a new grid coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The origin cube, used to seed an empty sculpture.
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    /// Canonical composite key, e.g. `"1,-2,0"`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{},{},{}", self.x, self.y, self.z)
    }

    /// The coordinate one step along the axis a face points out of.
    #[must_use]
    pub const fn neighbor(&self, face: Face) -> Self {
        let (dx, dy, dz) = face.offset();
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

impl std::fmt::Display for GridCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{},{})", self.x, self.y, self.z)
    }
}

/// A position in screen space, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ScreenPoint {
    /// Pixels from the left edge.
    pub x: f32,
    /// Pixels from the top edge.
    pub y: f32,
}

impl ScreenPoint {
    /// Create a new screen point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// The three cube faces visible under the fixed isometric camera.
///
/// Bottom, back, and far faces are never visible and never picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    /// The rhombus on top of the cube.
    Top,
    /// The lower-left rectangle.
    Left,
    /// The lower-right rectangle.
    Right,
}

impl Face {
    /// Grid offset along the axis this face points out of.
    ///
    /// Fixed contract: Top is +z, Left is +y, Right is +x. Under the
    /// projection +x moves down-right and +y moves down-left on screen,
    /// which is what makes the left face the +y face.
    #[must_use]
    pub const fn offset(self) -> (i32, i32, i32) {
        match self {
            Self::Top => (0, 0, 1),
            Self::Left => (0, 1, 0),
            Self::Right => (1, 0, 0),
        }
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Top => "top",
            Self::Left => "left",
            Self::Right => "right",
        };
        write!(f, "{name}")
    }
}

/// The fixed isometric grid-to-screen transform.
///
/// Many distinct coordinates project onto overlapping screen regions;
/// disambiguating them is the job of depth ordering, not the projector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Screen x of the grid origin anchor.
    pub origin_x: f32,
    /// Screen y of the grid origin anchor.
    pub origin_y: f32,
}

impl Projection {
    /// Create a projection with an explicit origin.
    #[must_use]
    pub const fn new(origin_x: f32, origin_y: f32) -> Self {
        Self { origin_x, origin_y }
    }

    /// Projection centered on a viewport of the given pixel size.
    ///
    /// The anchor is shifted half a tile left so the origin cube sits
    /// visually centered.
    #[must_use]
    pub fn centered(viewport_width: f32, viewport_height: f32) -> Self {
        Self::new(
            viewport_width / 2.0 - TILE_HALF_WIDTH,
            viewport_height / 2.0,
        )
    }

    /// Project a grid coordinate to its screen anchor point.
    ///
    /// The anchor is the left vertex of the cube's top rhombus.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // grid coordinates stay far below f32 precision limits
    pub fn project(&self, coord: GridCoord) -> ScreenPoint {
        let x = coord.x as f32;
        let y = coord.y as f32;
        let z = coord.z as f32;
        ScreenPoint::new(
            self.origin_x + (x - y) * TILE_HALF_WIDTH,
            self.origin_y + (x + y) * TILE_HALF_HEIGHT - z * BLOCK_HEIGHT,
        )
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::centered(800.0, 600.0)
    }
}
