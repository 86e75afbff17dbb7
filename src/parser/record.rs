//! Raw OCR cache record, as written by the external OCR step.

use crate::model::{default_color, Block, BlockId, Shape};
use serde::Deserialize;
use serde_json::Value;

/// One block's entry in a page cache file.
///
/// This mirrors the boundary format exactly. Unknown extra fields are
/// ignored; missing optional fields take the documented defaults
/// (`links: []`, `confidence: 0.0`, `color: "default"`).
#[derive(Debug, Clone, Deserialize)]
pub struct CacheRecord {
    /// Recognized text (may be empty for pure shapes)
    #[serde(default)]
    pub text: String,

    /// Horizontal position, fraction of page width. The original engine
    /// falls back to the page midpoint when absent.
    #[serde(default = "default_ratio")]
    pub x_ratio: f32,

    /// Vertical position, fraction of page height
    #[serde(default = "default_ratio")]
    pub y_ratio: f32,

    /// Width, fraction of page width
    #[serde(default)]
    pub width_ratio: f32,

    /// Height, fraction of page height
    #[serde(default)]
    pub height_ratio: f32,

    /// Raw shape tag; unknown tags default to text
    #[serde(default)]
    pub shape: Option<String>,

    /// Ink color tag
    #[serde(default)]
    pub color: Option<String>,

    /// Link targets. Object-form caches use string ids; legacy array-form
    /// caches use zero-based line indices, so both are accepted here.
    #[serde(default)]
    pub links: Vec<Value>,

    /// Recognition confidence
    #[serde(default)]
    pub confidence: f32,
}

fn default_ratio() -> f32 {
    0.5
}

impl CacheRecord {
    /// Convert this record into a model [`Block`] with the given id.
    ///
    /// Unknown shape tags and non-string, non-integer link entries are
    /// dropped with a warning; a malformed field never rejects the record.
    pub fn into_block(self, id: impl Into<BlockId>) -> Block {
        let id = id.into();

        let shape = match self.shape.as_deref() {
            None => Shape::Text,
            Some(tag) => Shape::from_tag(tag).unwrap_or_else(|| {
                log::warn!("block {id}: unknown shape tag {tag:?}, defaulting to text");
                Shape::Text
            }),
        };

        let color = match self.color {
            Some(c) if !c.trim().is_empty() => c.trim().to_string(),
            _ => default_color(),
        };

        let links = self
            .links
            .iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => n.as_i64().map(|i| i.to_string()),
                other => {
                    log::warn!("block {id}: ignoring non-id link entry {other}");
                    None
                }
            })
            .collect();

        Block {
            id,
            text: self.text,
            x_ratio: self.x_ratio,
            y_ratio: self.y_ratio,
            width_ratio: self.width_ratio,
            height_ratio: self.height_ratio,
            shape,
            color,
            links,
            confidence: self.confidence,
        }
    }
}
