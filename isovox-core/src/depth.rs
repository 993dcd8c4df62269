//! Painter's-algorithm depth ordering over the block store.
//!
//! Drawing walks blocks back to front so occluders land last; picking
//! walks the exact reverse so the first face hit is the visually nearest
//! one.

use crate::grid::GridCoord;
use crate::store::{Block, BlockStore};

/// Total ordering key: lower `x + y` is further back, then lower `z` is
/// lower down. The tertiary `x` key never matters for correctness
/// (distinct coordinates with equal `x + y` and `z` also differ in `x`)
/// but makes the order total, so frames are stable regardless of hash-map
/// iteration order.
fn depth_key(coord: GridCoord) -> (i32, i32, i32) {
    (coord.x + coord.y, coord.z, coord.x)
}

/// Blocks in drawing order, furthest first.
#[must_use]
pub fn back_to_front(store: &BlockStore) -> Vec<Block> {
    let mut blocks: Vec<Block> = store
        .iter()
        .map(|(coord, color)| Block::new(coord, color))
        .collect();
    blocks.sort_by_key(|b| depth_key(b.coord));
    blocks
}

/// Blocks in picking order, nearest first: the exact reverse of
/// [`back_to_front`].
#[must_use]
pub fn front_to_back(store: &BlockStore) -> Vec<Block> {
    let mut blocks = back_to_front(store);
    blocks.reverse();
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_of(coords: &[(i32, i32, i32)]) -> BlockStore {
        let mut store = BlockStore::new();
        for &(x, y, z) in coords {
            store.insert(GridCoord::new(x, y, z), "#ffffff");
        }
        store
    }

    #[test]
    fn test_lower_row_sum_is_further_back() {
        let store = store_of(&[(2, 2, 0), (0, 0, 0), (1, 1, 0)]);
        let order: Vec<i32> = back_to_front(&store)
            .iter()
            .map(|b| b.coord.x + b.coord.y)
            .collect();
        assert_eq!(order, vec![0, 2, 4]);
    }

    #[test]
    fn test_lower_z_is_further_back_within_row() {
        let store = store_of(&[(0, 0, 2), (0, 0, 0), (0, 0, 1)]);
        let order: Vec<i32> = back_to_front(&store).iter().map(|b| b.coord.z).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_front_to_back_is_exact_reverse() {
        let store = store_of(&[(0, 0, 0), (1, 0, 0), (0, 1, 0), (1, 1, 2), (-3, 2, 1)]);
        let mut reversed = back_to_front(&store);
        reversed.reverse();
        assert_eq!(front_to_back(&store), reversed);
    }

    #[test]
    fn test_order_is_deterministic() {
        // Same x+y and z, differing x: the tertiary key pins the order.
        let store = store_of(&[(3, -1, 0), (0, 2, 0), (1, 1, 0)]);
        let first = back_to_front(&store);
        for _ in 0..10 {
            assert_eq!(back_to_front(&store), first);
        }
        let order: Vec<i32> = first.iter().map(|b| b.coord.x).collect();
        assert_eq!(order, vec![0, 1, 3]);
    }
}
