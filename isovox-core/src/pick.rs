//! Face hit-testing and cursor-to-block picking.

use crate::depth::front_to_back;
use crate::grid::{Face, GridCoord, Projection, ScreenPoint, BLOCK_HEIGHT, TILE_HALF_HEIGHT, TILE_HALF_WIDTH};
use crate::store::BlockStore;

/// The result of resolving a cursor position against the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    /// The cursor is over a face of an existing block.
    Block {
        /// The picked block's coordinate.
        coord: GridCoord,
        /// The face under the cursor.
        face: Face,
    },
    /// The cursor is over the hypothetical cube at the origin. Only
    /// produced while the store is empty, to seed the first block.
    Ground,
}

impl Pick {
    /// The grid coordinate this pick refers to.
    #[must_use]
    pub const fn coord(&self) -> GridCoord {
        match self {
            Self::Block { coord, .. } => *coord,
            Self::Ground => GridCoord::ORIGIN,
        }
    }

    /// The picked face. A ground pick always reads as the top face.
    #[must_use]
    pub const fn face(&self) -> Face {
        match self {
            Self::Block { face, .. } => *face,
            Self::Ground => Face::Top,
        }
    }

    /// Whether this is the empty-grid ground pick.
    #[must_use]
    pub const fn is_ground(&self) -> bool {
        matches!(self, Self::Ground)
    }
}

/// Which visible face of a cube, anchored at screen position
/// `(sx, sy)`, contains the point `(px, py)`.
///
/// The anchor is the left vertex of the top rhombus, as produced by
/// [`Projection::project`]. The top face is tested first: it spans the
/// full rhombus silhouette and must win over false positives on the side
/// rectangles beneath it. Side faces use the contracted axis-aligned
/// bounds, not exact parallelogram edges.
#[must_use]
pub fn hit_face(px: f32, py: f32, sx: f32, sy: f32) -> Option<Face> {
    // Coarse footprint rejection; never changes the result below.
    if px < sx
        || px > sx + TILE_HALF_WIDTH * 2.0
        || py < sy - TILE_HALF_HEIGHT
        || py > sy + TILE_HALF_HEIGHT + BLOCK_HEIGHT
    {
        return None;
    }

    // Top rhombus centered on (sx + W, sy): |dx|/W + |dy|/H <= 1.
    let dx = px - (sx + TILE_HALF_WIDTH);
    let dy = py - sy;
    if dx.abs() / TILE_HALF_WIDTH + dy.abs() / TILE_HALF_HEIGHT <= 1.0 {
        return Some(Face::Top);
    }

    let side_top = sy + TILE_HALF_HEIGHT;
    let side_bottom = side_top + BLOCK_HEIGHT;
    if py >= side_top && py <= side_bottom {
        if px <= sx + TILE_HALF_WIDTH {
            return Some(Face::Left);
        }
        return Some(Face::Right);
    }

    None
}

/// Resolve a cursor position to the visually nearest block face.
///
/// Walks blocks front to back, so the first face hit belongs to the
/// nearest block and further-back blocks can never override it. On an
/// empty store the hypothetical origin cube is tested instead, yielding
/// [`Pick::Ground`]. `None` is the ordinary "nothing hovered" state.
#[must_use]
pub fn resolve_pick(
    px: f32,
    py: f32,
    store: &BlockStore,
    projection: &Projection,
) -> Option<Pick> {
    for block in front_to_back(store) {
        let ScreenPoint { x: sx, y: sy } = projection.project(block.coord);
        if let Some(face) = hit_face(px, py, sx, sy) {
            return Some(Pick::Block {
                coord: block.coord,
                face,
            });
        }
    }

    if store.is_empty() {
        let ScreenPoint { x: sx, y: sy } = projection.project(GridCoord::ORIGIN);
        if hit_face(px, py, sx, sy).is_some() {
            return Some(Pick::Ground);
        }
    }

    None
}
