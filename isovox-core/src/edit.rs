//! The edit engine: translating picks into store mutations.
//!
//! The engine itself is stateless; the store and undo history are passed
//! in by the session controller. A snapshot is recorded only when the
//! store is actually about to change, so no-op clicks never corrupt undo
//! granularity.

use crate::grid::GridCoord;
use crate::history::UndoHistory;
use crate::pick::Pick;
use crate::store::BlockStore;

use serde::{Deserialize, Serialize};

/// The active edit tool, supplied by the surrounding UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolMode {
    /// Place a block against the picked face.
    Add,
    /// Delete the picked block.
    Remove,
    /// Recolor the picked block.
    Paint,
}

/// Whether an edit changed the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The store was mutated and a snapshot recorded.
    Applied,
    /// The store was already consistent with the request; nothing
    /// happened, including no undo push.
    NoOp,
}

impl EditOutcome {
    /// Whether the store was mutated.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// The coordinate an Add against this pick would fill: one step out
/// along the picked face's axis, or the origin for a ground pick.
#[must_use]
pub const fn add_target(pick: Pick) -> GridCoord {
    match pick {
        Pick::Block { coord, face } => coord.neighbor(face),
        Pick::Ground => GridCoord::ORIGIN,
    }
}

/// Apply an edit for the given pick, tool, and active color.
///
/// Rules per mode:
/// - Add: insert `active_color` at [`add_target`]; no-op if occupied.
/// - Remove: delete the picked block; no-op if it no longer exists.
/// - Paint: overwrite the picked block's color; no-op if missing or
///   already `active_color`.
///
/// Remove and Paint against a ground pick are no-ops; there is no block
/// there to touch.
pub fn apply(
    pick: Pick,
    mode: ToolMode,
    active_color: &str,
    store: &mut BlockStore,
    history: &mut UndoHistory,
) -> EditOutcome {
    match mode {
        ToolMode::Add => {
            let target = add_target(pick);
            if store.contains(target) {
                return EditOutcome::NoOp;
            }
            history.record(store);
            store.insert(target, active_color);
            tracing::debug!(target = %target, color = active_color, "block added");
            EditOutcome::Applied
        }
        ToolMode::Remove => {
            if pick.is_ground() {
                return EditOutcome::NoOp;
            }
            let target = pick.coord();
            if !store.contains(target) {
                return EditOutcome::NoOp;
            }
            history.record(store);
            store.remove(target);
            tracing::debug!(target = %target, "block removed");
            EditOutcome::Applied
        }
        ToolMode::Paint => {
            if pick.is_ground() {
                return EditOutcome::NoOp;
            }
            let target = pick.coord();
            match store.color(target) {
                None => EditOutcome::NoOp,
                Some(existing) if existing == active_color => EditOutcome::NoOp,
                Some(_) => {
                    history.record(store);
                    store.insert(target, active_color);
                    tracing::debug!(target = %target, color = active_color, "block painted");
                    EditOutcome::Applied
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Face;

    fn pick_top(x: i32, y: i32, z: i32) -> Pick {
        Pick::Block {
            coord: GridCoord::new(x, y, z),
            face: Face::Top,
        }
    }

    #[test]
    fn test_ground_add_seeds_origin() {
        let mut store = BlockStore::new();
        let mut history = UndoHistory::new();

        let outcome = apply(Pick::Ground, ToolMode::Add, "#3b82f6", &mut store, &mut history);
        assert!(outcome.is_applied());
        assert_eq!(store.len(), 1);
        assert_eq!(store.color(GridCoord::ORIGIN), Some("#3b82f6"));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_add_offsets_along_face_axis() {
        let mut store = BlockStore::new();
        let mut history = UndoHistory::new();
        store.insert(GridCoord::ORIGIN, "#ffffff");

        apply(pick_top(0, 0, 0), ToolMode::Add, "#ef4444", &mut store, &mut history);
        assert_eq!(store.color(GridCoord::new(0, 0, 1)), Some("#ef4444"));

        let left = Pick::Block {
            coord: GridCoord::ORIGIN,
            face: Face::Left,
        };
        apply(left, ToolMode::Add, "#22c55e", &mut store, &mut history);
        assert_eq!(store.color(GridCoord::new(0, 1, 0)), Some("#22c55e"));

        let right = Pick::Block {
            coord: GridCoord::ORIGIN,
            face: Face::Right,
        };
        apply(right, ToolMode::Add, "#eab308", &mut store, &mut history);
        assert_eq!(store.color(GridCoord::new(1, 0, 0)), Some("#eab308"));
    }

    #[test]
    fn test_add_onto_occupied_is_noop() {
        let mut store = BlockStore::new();
        let mut history = UndoHistory::new();
        store.insert(GridCoord::ORIGIN, "#ffffff");
        store.insert(GridCoord::new(0, 0, 1), "#ef4444");
        let before = store.clone();

        let outcome = apply(pick_top(0, 0, 0), ToolMode::Add, "#22c55e", &mut store, &mut history);
        assert_eq!(outcome, EditOutcome::NoOp);
        assert_eq!(store, before);
        assert!(history.is_empty());
    }

    #[test]
    fn test_remove_targets_picked_coord() {
        let mut store = BlockStore::new();
        let mut history = UndoHistory::new();
        store.insert(GridCoord::ORIGIN, "#ffffff");

        let outcome = apply(pick_top(0, 0, 0), ToolMode::Remove, "#ef4444", &mut store, &mut history);
        assert!(outcome.is_applied());
        assert!(store.is_empty());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_remove_missing_block_rejected_gracefully() {
        let mut store = BlockStore::new();
        let mut history = UndoHistory::new();

        let outcome = apply(pick_top(4, 4, 4), ToolMode::Remove, "#ef4444", &mut store, &mut history);
        assert_eq!(outcome, EditOutcome::NoOp);
        assert!(history.is_empty());
    }

    #[test]
    fn test_paint_overwrites_color() {
        let mut store = BlockStore::new();
        let mut history = UndoHistory::new();
        store.insert(GridCoord::ORIGIN, "#ffffff");

        let outcome = apply(pick_top(0, 0, 0), ToolMode::Paint, "#ef4444", &mut store, &mut history);
        assert!(outcome.is_applied());
        assert_eq!(store.color(GridCoord::ORIGIN), Some("#ef4444"));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_paint_same_color_never_touches_history() {
        let mut store = BlockStore::new();
        let mut history = UndoHistory::new();
        store.insert(GridCoord::ORIGIN, "#ffffff");

        let outcome = apply(pick_top(0, 0, 0), ToolMode::Paint, "#ffffff", &mut store, &mut history);
        assert_eq!(outcome, EditOutcome::NoOp);
        assert!(history.is_empty());
    }

    #[test]
    fn test_ground_remove_and_paint_are_noops() {
        let mut store = BlockStore::new();
        let mut history = UndoHistory::new();

        assert_eq!(
            apply(Pick::Ground, ToolMode::Remove, "#ffffff", &mut store, &mut history),
            EditOutcome::NoOp
        );
        assert_eq!(
            apply(Pick::Ground, ToolMode::Paint, "#ffffff", &mut store, &mut history),
            EditOutcome::NoOp
        );
        assert!(history.is_empty());
    }
}
