//! Numbered image blocks.

use super::ImageId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Blocks keyed by their numeric label.
///
/// Labels iterate and serialize in ascending order. Blocks built by the
/// extractor are never empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockMap {
    blocks: BTreeMap<u32, Vec<ImageId>>,
}

impl BlockMap {
    /// Create an empty block map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from finalized blocks, dropping the empty ones.
    pub fn from_blocks(blocks: BTreeMap<u32, Vec<ImageId>>) -> Self {
        let blocks = blocks
            .into_iter()
            .filter(|(_, images)| !images.is_empty())
            .collect();
        Self { blocks }
    }

    /// Images of the block with the given label.
    pub fn get(&self, label: u32) -> Option<&[ImageId]> {
        self.blocks.get(&label).map(Vec::as_slice)
    }

    /// Labels in ascending order.
    pub fn labels(&self) -> Vec<u32> {
        self.blocks.keys().copied().collect()
    }

    /// Iterate `(label, images)` in ascending label order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[ImageId])> {
        self.blocks.iter().map(|(l, imgs)| (*l, imgs.as_slice()))
    }

    /// Number of blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Number of distinct identifiers across all blocks.
    pub fn image_count(&self) -> usize {
        self.blocks
            .values()
            .flatten()
            .collect::<HashSet<_>>()
            .len()
    }

    /// Whether there are no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
