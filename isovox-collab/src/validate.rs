//! Remix proposal validation.
//!
//! A remix must rearrange the sculpture without changing it as an
//! inventory: every color keeps its exact block count, and no two
//! proposed blocks may share a cell.

use std::collections::{HashMap, HashSet};

use isovox_core::Block;

use crate::error::{CollabError, CollabResult};

/// Per-color block counts for a list of blocks.
#[must_use]
pub fn color_counts(blocks: &[Block]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for block in blocks {
        *counts.entry(block.color.clone()).or_insert(0) += 1;
    }
    counts
}

/// Check a proposal against the current inventory.
///
/// # Errors
///
/// Returns [`CollabError::OverlappingBlock`] if two proposed blocks share
/// a cell, or [`CollabError::InventoryMismatch`] for the first color whose
/// count differs between `current` and the proposal.
pub fn check_proposal(current: &HashMap<String, usize>, proposal: &[Block]) -> CollabResult<()> {
    let mut seen = HashSet::with_capacity(proposal.len());
    for block in proposal {
        if !seen.insert(block.coord) {
            return Err(CollabError::OverlappingBlock(block.coord));
        }
    }

    let proposed = color_counts(proposal);
    for (color, &expected) in current {
        let actual = proposed.get(color).copied().unwrap_or(0);
        if actual != expected {
            return Err(CollabError::InventoryMismatch {
                color: color.clone(),
                expected,
                actual,
            });
        }
    }
    for (color, &actual) in &proposed {
        if !current.contains_key(color) {
            return Err(CollabError::InventoryMismatch {
                color: color.clone(),
                expected: 0,
                actual,
            });
        }
    }

    Ok(())
}
