//! Error types for the notelayout library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for notelayout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading OCR caches or rendering layouts.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A cache file is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A cache file parsed as JSON but does not have the expected layout.
    #[error("Malformed OCR cache: {0}")]
    MalformedCache(String),

    /// Document page indices are duplicated or do not form 0..N.
    #[error("Non-contiguous page set: {0}")]
    NonContiguousPages(String),

    /// The source image needed for a debug overlay does not exist.
    #[error("Missing source image: {0}")]
    MissingSourceImage(PathBuf),

    /// Error decoding or encoding a page image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Error during HTML or overlay rendering.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
