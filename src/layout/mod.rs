//! Layout reconstruction for OCR pages.
//!
//! Converts a page's block list into positioned canvas elements scaled to a
//! target size, with malformed geometry clamped and flagged, ambiguous
//! overlaps resolved, and alignment guides precomputed as snap targets.

mod guides;
mod options;
mod reconstruct;

pub use guides::{AlignmentGuide, GuideAxis};
pub use options::LayoutOptions;
pub use reconstruct::{reconstruct, PageLayout, PlacedBlock};
