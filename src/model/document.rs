//! Document-level types.

use super::{Block, Page};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// An ordered sequence of pages for one notebook or project.
///
/// Invariant: page indices are unique and form a contiguous 0-based range.
/// [`Document::validate_page_indices`] checks this; the assembler rejects
/// documents that violate it rather than guessing a repair ordering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Pages in index order
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self { pages: Vec::new() }
    }

    /// Create a document from pages, sorting them by index.
    pub fn from_pages(mut pages: Vec<Page>) -> Self {
        pages.sort_by_key(|p| p.index);
        Self { pages }
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Find the page holding a block id, searching in page order.
    pub fn page_of(&self, block_id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.contains(block_id))
    }

    /// Find a block anywhere in the document.
    pub fn block(&self, block_id: &str) -> Option<(&Page, &Block)> {
        self.pages
            .iter()
            .find_map(|p| p.block(block_id).map(|b| (p, b)))
    }

    /// Verify that page indices are unique and form 0..N.
    ///
    /// Returns a descriptive error naming the first violation found.
    pub fn validate_page_indices(&self) -> Result<()> {
        let mut seen = vec![false; self.pages.len()];
        for page in &self.pages {
            match seen.get_mut(page.index) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(Error::NonContiguousPages(format!(
                        "duplicate page index {}",
                        page.index
                    )))
                }
                None => {
                    return Err(Error::NonContiguousPages(format!(
                        "page index {} out of range for {} pages",
                        page.index,
                        self.pages.len()
                    )))
                }
            }
        }
        // Every slot filled implies 0..N with no gaps.
        Ok(())
    }
}
