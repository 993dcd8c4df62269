//! Top-level editor session: store, undo history, tool state, and hover
//! tracking for a single sculpture.

use crate::color::PALETTE;
use crate::edit::{add_target, apply, EditOutcome, ToolMode};
use crate::error::{SculptError, SculptResult};
use crate::grid::{GridCoord, Projection, ScreenPoint};
use crate::history::UndoHistory;
use crate::pick::{resolve_pick, Pick};
use crate::store::{Block, BlockStore};

/// Owns the sculpture state and applies pointer interactions to it.
///
/// Picking is synchronous: every pointer move re-resolves the hovered
/// face immediately so hover state is current before the next draw, and
/// every store mutation re-resolves it again since the scene changed
/// under the cursor.
#[derive(Debug, Clone)]
pub struct EditorSession {
    store: BlockStore,
    history: UndoHistory,
    tool: ToolMode,
    active_color: String,
    projection: Projection,
    cursor: Option<ScreenPoint>,
    hover: Option<Pick>,
}

impl EditorSession {
    /// Create an empty session for a viewport of the given pixel size.
    #[must_use]
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            store: BlockStore::new(),
            history: UndoHistory::new(),
            tool: ToolMode::Add,
            active_color: PALETTE[0].to_string(),
            projection: Projection::centered(viewport_width, viewport_height),
            cursor: None,
            hover: None,
        }
    }

    /// Seed the sculpture with a single blue block at the origin, the
    /// traditional starting point for a fresh canvas.
    #[must_use]
    pub fn with_seed_block(mut self) -> Self {
        self.store.insert(GridCoord::ORIGIN, PALETTE[4]);
        self
    }

    /// Read-only view of the current sculpture.
    #[must_use]
    pub fn store(&self) -> &BlockStore {
        &self.store
    }

    /// The currently hovered pick, if any.
    #[must_use]
    pub fn hover(&self) -> Option<Pick> {
        self.hover
    }

    /// The active tool mode.
    #[must_use]
    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    /// Switch the active tool mode.
    pub fn set_tool(&mut self, tool: ToolMode) {
        self.tool = tool;
        tracing::debug!(?tool, "tool changed");
    }

    /// The active color token.
    #[must_use]
    pub fn active_color(&self) -> &str {
        &self.active_color
    }

    /// Switch the active color.
    pub fn set_active_color(&mut self, color: impl Into<String>) {
        self.active_color = color.into();
        tracing::debug!(color = %self.active_color, "color changed");
    }

    /// The projection in use for picking and rendering.
    #[must_use]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Number of undo snapshots currently available.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// Recenter the projection for a resized viewport and re-resolve the
    /// hover under the new transform.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.projection = Projection::centered(width, height);
        self.refresh_hover();
    }

    /// Track a pointer move and synchronously re-resolve the pick.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.cursor = Some(ScreenPoint::new(x, y));
        self.refresh_hover();
    }

    /// The pointer left the editing surface; nothing is hovered.
    pub fn pointer_left(&mut self) {
        self.cursor = None;
        self.hover = None;
    }

    /// Apply the active tool at the current hover.
    ///
    /// Returns [`EditOutcome::NoOp`] when nothing is hovered or the edit
    /// would not change the store.
    pub fn pointer_down(&mut self) -> EditOutcome {
        let Some(pick) = self.hover else {
            return EditOutcome::NoOp;
        };
        let color = self.active_color.clone();
        let outcome = apply(pick, self.tool, &color, &mut self.store, &mut self.history);
        if outcome.is_applied() {
            self.refresh_hover();
        }
        outcome
    }

    /// Restore the previous snapshot, if any.
    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo(&mut self.store);
        if undone {
            tracing::debug!(blocks = self.store.len(), "undo applied");
            self.refresh_hover();
        }
        undone
    }

    /// Remove every block, recording one undo snapshot. No-op when the
    /// sculpture is already empty.
    pub fn clear(&mut self) -> EditOutcome {
        if self.store.is_empty() {
            return EditOutcome::NoOp;
        }
        self.history.record(&self.store);
        self.store.clear();
        tracing::debug!("sculpture cleared");
        self.refresh_hover();
        EditOutcome::Applied
    }

    /// Where the ghost preview cube should be drawn, if anywhere.
    ///
    /// Only in Add mode, only for a non-ground hover, and suppressed when
    /// the would-be target is already occupied.
    #[must_use]
    pub fn ghost_target(&self) -> Option<GridCoord> {
        if self.tool != ToolMode::Add {
            return None;
        }
        let pick = self.hover?;
        if pick.is_ground() {
            return None;
        }
        let target = add_target(pick);
        if self.store.contains(target) {
            return None;
        }
        Some(target)
    }

    /// Wholesale-replace the sculpture with a collaborator-proposed block
    /// set, recording one undo snapshot.
    ///
    /// The proposal must use exactly the current sculpture's per-color
    /// counts. Validating against the store as it is *now* (not as it was
    /// when the request went out) doubles as the stale-response guard: a
    /// remix computed against an outdated sculpture no longer matches and
    /// is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`SculptError::OverlappingBlock`] if the proposal stacks
    /// two blocks, or [`SculptError::InventoryMismatch`] if the color
    /// counts differ from the current sculpture.
    pub fn apply_remix(&mut self, blocks: Vec<Block>) -> SculptResult<()> {
        let proposed = BlockStore::from_blocks(blocks)?;

        let expected = self.store.color_inventory();
        let actual = proposed.color_inventory();
        for (color, &count) in &expected {
            let got = actual.get(color).copied().unwrap_or(0);
            if got != count {
                return Err(SculptError::InventoryMismatch {
                    color: color.clone(),
                    expected: count,
                    actual: got,
                });
            }
        }
        for (color, &count) in &actual {
            if !expected.contains_key(color) {
                return Err(SculptError::InventoryMismatch {
                    color: color.clone(),
                    expected: 0,
                    actual: count,
                });
            }
        }

        self.history.record(&self.store);
        self.store = proposed;
        tracing::info!(blocks = self.store.len(), "remix applied");
        self.refresh_hover();
        Ok(())
    }

    fn refresh_hover(&mut self) {
        self.hover = self
            .cursor
            .and_then(|c| resolve_pick(c.x, c.y, &self.store, &self.projection));
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Face, TILE_HALF_WIDTH};

    /// Cursor position over the top-face center of a coordinate.
    fn top_center(session: &EditorSession, coord: GridCoord) -> (f32, f32) {
        let s = session.projection().project(coord);
        (s.x + TILE_HALF_WIDTH, s.y)
    }

    #[test]
    fn test_hover_tracks_pointer() {
        let mut session = EditorSession::new(800.0, 600.0).with_seed_block();
        let (px, py) = top_center(&session, GridCoord::ORIGIN);

        session.pointer_moved(px, py);
        assert_eq!(
            session.hover(),
            Some(Pick::Block {
                coord: GridCoord::ORIGIN,
                face: Face::Top
            })
        );

        session.pointer_left();
        assert_eq!(session.hover(), None);
    }

    #[test]
    fn test_click_add_on_hovered_top() {
        let mut session = EditorSession::new(800.0, 600.0).with_seed_block();
        session.set_active_color("#ef4444");
        let (px, py) = top_center(&session, GridCoord::ORIGIN);
        session.pointer_moved(px, py);

        assert!(session.pointer_down().is_applied());
        assert_eq!(session.store().len(), 2);
        assert_eq!(session.store().color(GridCoord::new(0, 0, 1)), Some("#ef4444"));
    }

    #[test]
    fn test_hover_reresolves_after_edit() {
        let mut session = EditorSession::new(800.0, 600.0).with_seed_block();
        let (px, py) = top_center(&session, GridCoord::ORIGIN);
        session.pointer_moved(px, py);
        session.pointer_down();

        // The new block at (0,0,1) now owns the cursor position: its left
        // rectangle spans the old top-face center.
        let hover = session.hover().expect("should still hover");
        assert_eq!(hover.coord(), GridCoord::new(0, 0, 1));
    }

    #[test]
    fn test_ghost_suppressed_on_occupied_target() {
        let mut session = EditorSession::new(800.0, 600.0).with_seed_block();
        let (px, py) = top_center(&session, GridCoord::ORIGIN);
        session.pointer_moved(px, py);
        assert_eq!(session.ghost_target(), Some(GridCoord::new(0, 0, 1)));

        session.pointer_down();
        // Hover moved onto (0,0,1); its left-face ghost target is free.
        assert_eq!(session.ghost_target(), Some(GridCoord::new(0, 1, 1)));

        session.set_tool(ToolMode::Remove);
        assert_eq!(session.ghost_target(), None);
    }

    #[test]
    fn test_ghost_suppressed_for_ground_pick() {
        let mut session = EditorSession::new(800.0, 600.0);
        let (px, py) = top_center(&session, GridCoord::ORIGIN);
        session.pointer_moved(px, py);

        assert_eq!(session.hover(), Some(Pick::Ground));
        assert_eq!(session.ghost_target(), None);
    }

    #[test]
    fn test_clear_records_one_undo() {
        let mut session = EditorSession::new(800.0, 600.0).with_seed_block();
        assert!(session.clear().is_applied());
        assert!(session.store().is_empty());

        assert!(session.undo());
        assert_eq!(session.store().len(), 1);

        // Clearing an empty sculpture is a dead click.
        session.clear();
        assert!(session.undo());
        assert_eq!(session.clear(), EditOutcome::NoOp);
    }

    #[test]
    fn test_remix_requires_matching_inventory() {
        let mut session = EditorSession::new(800.0, 600.0).with_seed_block();

        let bad = vec![Block::new(GridCoord::new(1, 1, 0), "#000000")];
        assert!(matches!(
            session.apply_remix(bad),
            Err(SculptError::InventoryMismatch { .. })
        ));

        let good = vec![Block::new(GridCoord::new(3, 3, 3), PALETTE[4])];
        session.apply_remix(good).expect("inventory matches");
        assert_eq!(session.store().color(GridCoord::new(3, 3, 3)), Some(PALETTE[4]));

        // One undo restores the pre-remix sculpture.
        assert!(session.undo());
        assert_eq!(session.store().color(GridCoord::ORIGIN), Some(PALETTE[4]));
    }

    #[test]
    fn test_remix_rejects_extra_color() {
        let mut session = EditorSession::new(800.0, 600.0).with_seed_block();
        let proposal = vec![
            Block::new(GridCoord::new(0, 0, 0), PALETTE[4]),
            Block::new(GridCoord::new(1, 0, 0), "#123456"),
        ];
        assert!(matches!(
            session.apply_remix(proposal),
            Err(SculptError::InventoryMismatch { color, .. }) if color == "#123456"
        ));
    }
}
