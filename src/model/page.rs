//! Page-level types.

use super::{Block, BlockId};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single notebook page: an ordered sequence of blocks plus a reference
/// to the rendered source bitmap.
///
/// Pages are immutable once produced by the OCR step; the layout core only
/// reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page index (0-based, unique within the document)
    pub index: usize,

    /// Path to the rendered page bitmap, if available. Used only by the
    /// debug overlay renderer.
    #[serde(default)]
    pub source_image: Option<PathBuf>,

    /// Blocks in reading order (top-to-bottom, left-to-right)
    pub blocks: Vec<Block>,
}

impl Page {
    /// Create an empty page.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            source_image: None,
            blocks: Vec::new(),
        }
    }

    /// Create a page from blocks, sorting them into reading order.
    pub fn from_blocks(index: usize, mut blocks: Vec<Block>) -> Self {
        sort_reading_order(&mut blocks);
        Self {
            index,
            source_image: None,
            blocks,
        }
    }

    /// Attach the source bitmap path.
    pub fn with_source_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_image = Some(path.into());
        self
    }

    /// Look up a block by id.
    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Whether the page has a block with the given id.
    pub fn contains(&self, id: &str) -> bool {
        self.block(id).is_some()
    }

    /// Ids of all blocks on this page, in reading order.
    pub fn block_ids(&self) -> impl Iterator<Item = &BlockId> {
        self.blocks.iter().map(|b| &b.id)
    }

    /// Check if the page has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of blocks on the page.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

/// Sort blocks top-to-bottom, then left-to-right. Ties keep input order.
pub(crate) fn sort_reading_order(blocks: &mut [Block]) {
    blocks.sort_by(|a, b| {
        a.y_ratio
            .partial_cmp(&b.y_ratio)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(
                a.x_ratio
                    .partial_cmp(&b.x_ratio)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
    });
}
