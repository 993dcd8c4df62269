//! Frame building: turning the current session into an ordered list of
//! shaded cube sprites ready for any backend to draw.

use isovox_core::{
    back_to_front, lighten, shade, EditorSession, Face, GridCoord, Pick, Projection, ScreenPoint,
};
use isovox_core::grid::{BLOCK_HEIGHT, TILE_HALF_HEIGHT, TILE_HALF_WIDTH};
use serde::Serialize;

/// Shading applied to the left face, in percent.
const LEFT_SHADE: i32 = -20;

/// Shading applied to the right face, in percent.
const RIGHT_SHADE: i32 = -40;

/// Lightening applied to a hovered face, in percent.
const HOVER_LIGHTEN: i32 = 20;

/// Opacity of the ghost preview cube.
const GHOST_ALPHA: f32 = 0.5;

/// Default background, a near-black slate.
pub const DEFAULT_BACKGROUND: [u8; 4] = [0x02, 0x06, 0x17, 0xff];

/// One filled cube face: its screen-space quad and resolved fill color.
#[derive(Debug, Clone, Serialize)]
pub struct FacePaint {
    /// Which face this is.
    pub face: Face,
    /// Resolved `#rrggbb` fill after shading/highlighting.
    pub color: String,
    /// Quad corners in screen space, wound clockwise.
    pub polygon: [ScreenPoint; 4],
}

/// A cube ready to draw: three shaded faces plus hover/ghost treatment.
#[derive(Debug, Clone, Serialize)]
pub struct CubeSprite {
    /// The grid coordinate this sprite draws.
    pub coord: GridCoord,
    /// Screen anchor (left vertex of the top rhombus).
    pub anchor: ScreenPoint,
    /// Top, left, and right faces in draw order.
    pub faces: [FacePaint; 3],
    /// Whether the cursor is over this cube (drawn with a bright outline).
    pub hovered: bool,
    /// Opacity; 1.0 for solid blocks, [`GHOST_ALPHA`] for the preview.
    pub alpha: f32,
}

/// A fully described frame: back-to-front sprites plus the optional ghost
/// preview, which always draws last.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    /// Solid cubes in painter's order (furthest first).
    pub sprites: Vec<CubeSprite>,
    /// Translucent preview of the next Add target, if any.
    pub ghost: Option<CubeSprite>,
    /// Background clear color (RGBA).
    pub background: [u8; 4],
}

impl Frame {
    /// Total number of cubes this frame draws, ghost included.
    #[must_use]
    pub fn cube_count(&self) -> usize {
        self.sprites.len() + usize::from(self.ghost.is_some())
    }
}

/// Screen-space quad for one face of a cube anchored at `anchor`.
#[must_use]
pub fn face_polygon(face: Face, anchor: ScreenPoint) -> [ScreenPoint; 4] {
    let (x, y) = (anchor.x, anchor.y);
    let w = TILE_HALF_WIDTH;
    let h = TILE_HALF_HEIGHT;
    let bh = BLOCK_HEIGHT;
    match face {
        Face::Top => [
            ScreenPoint::new(x, y),
            ScreenPoint::new(x + w, y - h),
            ScreenPoint::new(x + 2.0 * w, y),
            ScreenPoint::new(x + w, y + h),
        ],
        Face::Left => [
            ScreenPoint::new(x, y),
            ScreenPoint::new(x + w, y + h),
            ScreenPoint::new(x + w, y + h + bh),
            ScreenPoint::new(x, y + bh),
        ],
        Face::Right => [
            ScreenPoint::new(x + 2.0 * w, y),
            ScreenPoint::new(x + 2.0 * w, y + bh),
            ScreenPoint::new(x + w, y + h + bh),
            ScreenPoint::new(x + w, y + h),
        ],
    }
}

fn sprite(
    coord: GridCoord,
    base_color: &str,
    projection: &Projection,
    hover_face: Option<Face>,
    alpha: f32,
) -> CubeSprite {
    let anchor = projection.project(coord);
    let face_fill = |face: Face| {
        let shaded = match face {
            Face::Top => base_color.to_string(),
            Face::Left => shade(base_color, LEFT_SHADE),
            Face::Right => shade(base_color, RIGHT_SHADE),
        };
        let color = if hover_face == Some(face) {
            lighten(&shaded, HOVER_LIGHTEN)
        } else {
            shaded
        };
        FacePaint {
            face,
            color,
            polygon: face_polygon(face, anchor),
        }
    };

    CubeSprite {
        coord,
        anchor,
        faces: [
            face_fill(Face::Top),
            face_fill(Face::Left),
            face_fill(Face::Right),
        ],
        hovered: hover_face.is_some(),
        alpha,
    }
}

/// Build the frame for the session's current state.
///
/// Solid cubes come out in back-to-front order with per-face shading and
/// the hovered face lightened; the ghost preview is present only when the
/// session reports a valid Add target.
#[must_use]
pub fn build_frame(session: &EditorSession) -> Frame {
    let projection = session.projection();
    let hover = session.hover();

    let sprites = back_to_front(session.store())
        .into_iter()
        .map(|block| {
            let hover_face = match hover {
                Some(Pick::Block { coord, face }) if coord == block.coord => Some(face),
                _ => None,
            };
            sprite(block.coord, &block.color, projection, hover_face, 1.0)
        })
        .collect();

    let ghost = session.ghost_target().map(|target| {
        sprite(
            target,
            session.active_color(),
            projection,
            None,
            GHOST_ALPHA,
        )
    });

    Frame {
        sprites,
        ghost,
        background: DEFAULT_BACKGROUND,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isovox_core::ToolMode;

    fn hover_origin_top(session: &mut EditorSession) {
        let s = session.projection().project(GridCoord::ORIGIN);
        session.pointer_moved(s.x + TILE_HALF_WIDTH, s.y);
    }

    #[test]
    fn test_face_shading() {
        let session = EditorSession::new(800.0, 600.0).with_seed_block();
        let frame = build_frame(&session);

        assert_eq!(frame.sprites.len(), 1);
        let faces = &frame.sprites[0].faces;
        let base = &faces[0].color;
        assert_eq!(faces[1].color, shade(base, LEFT_SHADE));
        assert_eq!(faces[2].color, shade(base, RIGHT_SHADE));
    }

    #[test]
    fn test_hovered_face_lightens() {
        let mut session = EditorSession::new(800.0, 600.0).with_seed_block();
        hover_origin_top(&mut session);

        let frame = build_frame(&session);
        let cube = &frame.sprites[0];
        assert!(cube.hovered);

        let base = session.store().color(GridCoord::ORIGIN).expect("seeded");
        assert_eq!(cube.faces[0].color, lighten(base, HOVER_LIGHTEN));
        // Non-hovered faces keep plain shading.
        assert_eq!(cube.faces[1].color, shade(base, LEFT_SHADE));
    }

    #[test]
    fn test_ghost_only_in_add_mode() {
        let mut session = EditorSession::new(800.0, 600.0).with_seed_block();
        hover_origin_top(&mut session);

        let frame = build_frame(&session);
        let ghost = frame.ghost.as_ref().expect("add mode hover has a ghost");
        assert_eq!(ghost.coord, GridCoord::new(0, 0, 1));
        assert!((ghost.alpha - GHOST_ALPHA).abs() < f32::EPSILON);

        session.set_tool(ToolMode::Paint);
        assert!(build_frame(&session).ghost.is_none());
    }

    #[test]
    fn test_sprites_ordered_back_to_front() {
        let mut session = EditorSession::new(800.0, 600.0);
        // Seed a few blocks through ground + top adds.
        let s = session.projection().project(GridCoord::ORIGIN);
        session.pointer_moved(s.x + TILE_HALF_WIDTH, s.y);
        session.pointer_down();
        for _ in 0..2 {
            let top = session
                .store()
                .blocks()
                .last()
                .map(|b| session.projection().project(b.coord))
                .expect("non-empty");
            session.pointer_moved(top.x + TILE_HALF_WIDTH, top.y);
            session.pointer_down();
        }

        let frame = build_frame(&session);
        let zs: Vec<i32> = frame.sprites.iter().map(|c| c.coord.z).collect();
        assert_eq!(zs, vec![0, 1, 2]);
    }

    #[test]
    fn test_top_polygon_is_the_pick_rhombus() {
        let poly = face_polygon(Face::Top, ScreenPoint::new(0.0, 0.0));
        // Left, top, right, bottom vertices of the rhombus.
        assert_eq!(poly[0], ScreenPoint::new(0.0, 0.0));
        assert_eq!(poly[1], ScreenPoint::new(TILE_HALF_WIDTH, -TILE_HALF_HEIGHT));
        assert_eq!(poly[2], ScreenPoint::new(2.0 * TILE_HALF_WIDTH, 0.0));
        assert_eq!(poly[3], ScreenPoint::new(TILE_HALF_WIDTH, TILE_HALF_HEIGHT));
    }
}
