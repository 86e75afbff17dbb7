//! # notelayout
//!
//! Reconstructs handwriting OCR results into an editable HTML layout.
//!
//! The input is the OCR cache produced for each notebook page: a JSON file
//! of recognized blocks with normalized positions, sizes, shapes, colors,
//! and links. The output is a single HTML document where every block is a
//! draggable element with alignment-guide snapping and live connector
//! arrows, plus per-page debug overlays for visual QA.
//!
//! ## Quick Start
//!
//! ```no_run
//! use notelayout::{parse_document_dir, render, RenderOptions};
//!
//! fn main() -> notelayout::Result<()> {
//!     // Load the per-page OCR cache files (page_0.json, page_1.json, ...)
//!     let doc = parse_document_dir("cache/")?;
//!
//!     // Assemble the interactive layout document
//!     let options = RenderOptions::default();
//!     let html = render::assemble(&doc, &options)?;
//!     std::fs::write("layout.html", html)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Faithful placement**: exact linear scaling of OCR coordinates
//! - **Graceful degradation**: malformed blocks are clamped and flagged,
//!   dangling links become broken-link markers, nothing aborts a page
//! - **Overlap resolution**: ambiguous overlaps nudge the lower-confidence
//!   block aside, preserving reading order
//! - **Connectors**: same-page curves, cross-page jump markers
//! - **Outline export**: the link structure as a nested markdown list
//! - **Parallel processing**: pages are laid out with Rayon
//! - **Debug overlays**: bounding boxes and ids drawn on the source scans

pub mod error;
pub mod layout;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use layout::{AlignmentGuide, GuideAxis, LayoutOptions, PageLayout, PlacedBlock};
pub use model::{Block, BlockId, Document, Page, Shape};
pub use parser::{parse_document_dir, parse_page_file, parse_page_json, CacheRecord};
pub use render::{Connector, RenderOptions};

use std::path::Path;

/// Reconstruct one page's layout.
///
/// # Example
///
/// ```
/// use notelayout::{layout_page, Block, LayoutOptions, Page};
///
/// let page = Page::from_blocks(0, vec![Block::text_at("a", "Hello", 0.1, 0.2)]);
/// let layout = layout_page(&page, &LayoutOptions::default());
/// assert_eq!(layout.blocks.len(), 1);
/// ```
pub fn layout_page(page: &Page, options: &LayoutOptions) -> PageLayout {
    layout::reconstruct(page, options)
}

/// Assemble a document into an interactive HTML string.
pub fn to_html(document: &Document, options: &RenderOptions) -> Result<String> {
    render::assemble(document, options)
}

/// Assemble a document and write it to a file.
pub fn render_to_file<P: AsRef<Path>>(
    document: &Document,
    path: P,
    options: &RenderOptions,
) -> Result<()> {
    render::assemble_to_file(document, path, options)
}

/// Builder for loading and rendering note layouts.
///
/// # Example
///
/// ```no_run
/// use notelayout::NoteLayout;
///
/// let html = NoteLayout::new()
///     .with_title("Field notes")
///     .with_canvas(800.0, 1100.0)
///     .load_dir("cache/")?
///     .to_html()?;
/// # Ok::<(), notelayout::Error>(())
/// ```
pub struct NoteLayout {
    options: RenderOptions,
}

impl NoteLayout {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            options: RenderOptions::default(),
        }
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.options = self.options.with_title(title);
        self
    }

    /// Set the target canvas size in pixels.
    pub fn with_canvas(mut self, width: f32, height: f32) -> Self {
        self.options = self.options.with_canvas(width, height);
        self
    }

    /// Set the overlap-resolution threshold.
    pub fn with_overlap_threshold(mut self, threshold: f32) -> Self {
        self.options.layout = self.options.layout.with_overlap_threshold(threshold);
        self
    }

    /// Set the alignment-guide tolerance.
    pub fn with_guide_tolerance(mut self, tolerance: f32) -> Self {
        self.options.layout = self.options.layout.with_guide_tolerance(tolerance);
        self
    }

    /// Disable parallel page processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Load a cache directory and return a result wrapper.
    pub fn load_dir<P: AsRef<Path>>(self, dir: P) -> Result<NoteLayoutResult> {
        let document = parse_document_dir(dir)?;
        Ok(NoteLayoutResult {
            document,
            options: self.options,
        })
    }

    /// Wrap an already-loaded document.
    pub fn load(self, document: Document) -> NoteLayoutResult {
        NoteLayoutResult {
            document,
            options: self.options,
        }
    }
}

impl Default for NoteLayout {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded document paired with render options.
pub struct NoteLayoutResult {
    /// The loaded document
    pub document: Document,
    options: RenderOptions,
}

impl NoteLayoutResult {
    /// Assemble the interactive HTML document.
    pub fn to_html(&self) -> Result<String> {
        render::assemble(&self.document, &self.options)
    }

    /// Assemble and write the HTML document.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        render::assemble_to_file(&self.document, path, &self.options)
    }

    /// Write debug artifacts (overlays and preview) into a directory.
    pub fn debug_artifacts<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<std::path::PathBuf>> {
        render::render_debug_artifacts(&self.document, dir.as_ref())
    }

    /// Render the document's link structure as a markdown outline.
    pub fn to_outline(&self) -> String {
        render::render_outline(&self.document)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
