//! Bounded undo history over block-store snapshots.

use std::collections::VecDeque;

use crate::store::BlockStore;

/// Default number of snapshots retained.
pub const DEFAULT_CAPACITY: usize = 20;

/// A bounded stack of prior sculpture states.
///
/// Owned by the session controller, not the edit engine: the engine
/// records a snapshot immediately before any mutation that actually
/// changes store contents, and never on a no-op. When full, the oldest
/// snapshot is evicted first.
#[derive(Debug, Clone, Default)]
pub struct UndoHistory {
    snapshots: VecDeque<BlockStore>,
    capacity: usize,
}

impl UndoHistory {
    /// Create a history with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a history retaining at most `capacity` snapshots.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(capacity.max(1)),
            capacity: capacity.max(1),
        }
    }

    /// Record a pre-edit snapshot, evicting the oldest entry when full.
    pub fn record(&mut self, store: &BlockStore) {
        if self.snapshots.len() == self.capacity {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(store.clone());
    }

    /// Restore the most recent snapshot into `store`, discarding it.
    ///
    /// Returns `false` when the history is empty; undo underflow is a
    /// no-op, not an error.
    pub fn undo(&mut self, store: &mut BlockStore) -> bool {
        match self.snapshots.pop_back() {
            Some(snapshot) => {
                *store = snapshot;
                true
            }
            None => false,
        }
    }

    /// Number of snapshots currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether the history holds no snapshots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// The configured snapshot limit.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every snapshot.
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridCoord;

    #[test]
    fn test_undo_restores_exact_state() {
        let mut history = UndoHistory::new();
        let mut store = BlockStore::new();
        store.insert(GridCoord::ORIGIN, "#ffffff");

        let before = store.clone();
        history.record(&store);
        store.insert(GridCoord::new(0, 0, 1), "#ef4444");

        assert!(history.undo(&mut store));
        assert_eq!(store, before);
    }

    #[test]
    fn test_underflow_is_noop() {
        let mut history = UndoHistory::new();
        let mut store = BlockStore::new();
        store.insert(GridCoord::ORIGIN, "#ffffff");
        let before = store.clone();

        assert!(!history.undo(&mut store));
        assert_eq!(store, before);
    }

    #[test]
    fn test_oldest_snapshot_evicted() {
        let mut history = UndoHistory::with_capacity(2);
        let mut store = BlockStore::new();

        for i in 0..3 {
            history.record(&store);
            store.insert(GridCoord::new(i, 0, 0), "#ffffff");
        }
        assert_eq!(history.len(), 2);

        // Two undos land on the state after the first insert; the empty
        // snapshot was evicted.
        history.undo(&mut store);
        history.undo(&mut store);
        assert_eq!(store.len(), 1);
        assert!(store.contains(GridCoord::new(0, 0, 0)));
        assert!(history.is_empty());
    }

    #[test]
    fn test_zero_capacity_clamped_to_one() {
        let history = UndoHistory::with_capacity(0);
        assert_eq!(history.capacity(), 1);
    }
}
