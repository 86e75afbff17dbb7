//! Block-level types.

use serde::{Deserialize, Serialize};

/// Identifier of a block, unique within its page.
pub type BlockId = String;

/// Shape variant recognized for a block.
///
/// The OCR vocabulary is closed; unknown tags from a cache file fall back
/// to [`Shape::Text`] at the parse boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// A recognized line of text with no surrounding stroke
    #[default]
    Text,

    /// Text enclosed in a rectangle
    Box,

    /// A straight stroke
    Line,

    /// A stroke with an arrowhead
    Arrow,

    /// Any other enclosing stroke (circles, clouds, ...)
    Freeform,
}

impl Shape {
    /// Parse a shape tag from a cache record.
    ///
    /// Tags are matched case-insensitively. The legacy `"circle"` tag used
    /// by older caches maps to [`Shape::Freeform`]. Returns `None` for
    /// unknown tags so the caller can log and default.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "text" | "" => Some(Shape::Text),
            "box" => Some(Shape::Box),
            "line" => Some(Shape::Line),
            "arrow" => Some(Shape::Arrow),
            "freeform" | "circle" => Some(Shape::Freeform),
            _ => None,
        }
    }

    /// The canonical tag for this shape.
    pub fn tag(&self) -> &'static str {
        match self {
            Shape::Text => "text",
            Shape::Box => "box",
            Shape::Line => "line",
            Shape::Arrow => "arrow",
            Shape::Freeform => "freeform",
        }
    }

    /// Whether the shape is an enclosing outline rather than plain text.
    pub fn is_outline(&self) -> bool {
        !matches!(self, Shape::Text)
    }
}

/// One recognized unit on a page.
///
/// Geometry is normalized to page dimensions: `x_ratio`/`y_ratio` is the
/// top-left corner and `width_ratio`/`height_ratio` the extent, all in
/// [0, 1]. Blocks are produced once by the OCR step and never mutated by
/// the layout core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Identifier, unique within the page
    pub id: BlockId,

    /// Recognized text (empty for pure shapes)
    #[serde(default)]
    pub text: String,

    /// Left edge, as a fraction of page width
    pub x_ratio: f32,

    /// Top edge, as a fraction of page height
    pub y_ratio: f32,

    /// Width, as a fraction of page width
    #[serde(default)]
    pub width_ratio: f32,

    /// Height, as a fraction of page height
    #[serde(default)]
    pub height_ratio: f32,

    /// Shape variant
    #[serde(default)]
    pub shape: Shape,

    /// Semantic ink color tag (CSS color name or hex)
    #[serde(default = "default_color")]
    pub color: String,

    /// Ids of blocks this block points to. Targets may live on another
    /// page or may not exist at all; existence is not guaranteed.
    #[serde(default)]
    pub links: Vec<BlockId>,

    /// Recognition confidence in [0, 1], informational only
    #[serde(default)]
    pub confidence: f32,
}

pub(crate) fn default_color() -> String {
    "default".to_string()
}

impl Block {
    /// Create a text block at the given normalized position.
    pub fn text_at(id: impl Into<BlockId>, text: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            x_ratio: x,
            y_ratio: y,
            width_ratio: 0.0,
            height_ratio: 0.0,
            shape: Shape::Text,
            color: default_color(),
            links: Vec::new(),
            confidence: 0.0,
        }
    }

    /// Whether every geometry field is already inside [0, 1].
    pub fn geometry_in_range(&self) -> bool {
        [
            self.x_ratio,
            self.y_ratio,
            self.width_ratio,
            self.height_ratio,
        ]
        .iter()
        .all(|v| (0.0..=1.0).contains(v))
    }

    /// Whether the block carries no recognized text.
    pub fn is_shape_only(&self) -> bool {
        self.text.trim().is_empty()
    }
}
