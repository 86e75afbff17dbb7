//! Data model for OCR recognition results.
//!
//! This module defines the immutable representation produced by the external
//! OCR step: blocks with normalized geometry, pages in reading order, and
//! documents with a contiguous page range. The layout core is a pure
//! read-to-render transform over these types and never mutates them.

mod block;
mod document;
mod page;

pub use block::{Block, BlockId, Shape};
pub use document::Document;
pub use page::Page;

pub(crate) use block::default_color;
pub(crate) use page::sort_reading_order;
