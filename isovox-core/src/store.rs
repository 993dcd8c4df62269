//! Sparse block storage, the single source of truth for sculpture state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{SculptError, SculptResult};
use crate::grid::GridCoord;

/// One block on the wire: a grid coordinate plus its color token.
///
/// Serializes flat as `{"x": .., "y": .., "z": .., "color": ".."}`, the
/// shape the collaborator contract exchanges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Where the block sits on the grid.
    #[serde(flatten)]
    pub coord: GridCoord,
    /// Opaque color token, e.g. `"#3b82f6"`.
    pub color: String,
}

impl Block {
    /// Create a new block.
    #[must_use]
    pub fn new(coord: GridCoord, color: impl Into<String>) -> Self {
        Self {
            coord,
            color: color.into(),
        }
    }
}

/// Sparse mapping from grid coordinate to color.
///
/// Invariant: at most one color per coordinate. Iteration order is
/// arbitrary and must never be relied upon; rendering and picking sort
/// explicitly through [`crate::depth`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockStore {
    blocks: HashMap<GridCoord, String>,
}

impl BlockStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blocks in the sculpture.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the sculpture has no blocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Whether a block exists at the coordinate.
    #[must_use]
    pub fn contains(&self, coord: GridCoord) -> bool {
        self.blocks.contains_key(&coord)
    }

    /// The color at a coordinate, if occupied.
    #[must_use]
    pub fn color(&self, coord: GridCoord) -> Option<&str> {
        self.blocks.get(&coord).map(String::as_str)
    }

    /// Insert or overwrite the block at a coordinate.
    ///
    /// Returns the previous color if the coordinate was occupied.
    pub fn insert(&mut self, coord: GridCoord, color: impl Into<String>) -> Option<String> {
        self.blocks.insert(coord, color.into())
    }

    /// Remove the block at a coordinate, returning its color.
    pub fn remove(&mut self, coord: GridCoord) -> Option<String> {
        self.blocks.remove(&coord)
    }

    /// Remove every block.
    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    /// Iterate over occupied coordinates and their colors.
    ///
    /// Order is arbitrary; sort through [`crate::depth`] before drawing.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, &str)> {
        self.blocks.iter().map(|(c, color)| (*c, color.as_str()))
    }

    /// Snapshot the sculpture as a block list, sorted by coordinate for a
    /// deterministic wire representation.
    #[must_use]
    pub fn blocks(&self) -> Vec<Block> {
        let mut out: Vec<Block> = self
            .blocks
            .iter()
            .map(|(coord, color)| Block::new(*coord, color.clone()))
            .collect();
        out.sort_by_key(|b| b.coord);
        out
    }

    /// Build a store from a block list.
    ///
    /// # Errors
    ///
    /// Returns [`SculptError::OverlappingBlock`] if two blocks share a
    /// coordinate.
    pub fn from_blocks(blocks: impl IntoIterator<Item = Block>) -> SculptResult<Self> {
        let mut store = Self::new();
        for block in blocks {
            if store.insert(block.coord, block.color).is_some() {
                return Err(SculptError::OverlappingBlock(block.coord));
            }
        }
        Ok(store)
    }

    /// Count blocks per color token.
    #[must_use]
    pub fn color_inventory(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for color in self.blocks.values() {
            *counts.entry(color.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Serialize the sculpture to a JSON block list.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> SculptResult<String> {
        serde_json::to_string(&self.blocks()).map_err(SculptError::Serialization)
    }

    /// Deserialize a sculpture from a JSON block list.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or blocks overlap.
    pub fn from_json(json: &str) -> SculptResult<Self> {
        let blocks: Vec<Block> = serde_json::from_str(json)?;
        Self::from_blocks(blocks)
    }
}
