//! Rendering options and configuration.

use crate::layout::LayoutOptions;

/// Options for rendering a document to HTML.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Document title used in the HTML head and save bar
    pub title: String,

    /// Layout reconstruction options applied to every page
    pub layout: LayoutOptions,

    /// Lay out pages in parallel (pages are independent; output order is
    /// always preserved)
    pub parallel: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the layout options.
    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    /// Set the target canvas size in pixels.
    pub fn with_canvas(mut self, width: f32, height: f32) -> Self {
        self.layout = self.layout.with_canvas(width, height);
        self
    }

    /// Disable parallel page processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: "Note Layout".to_string(),
            layout: LayoutOptions::default(),
            parallel: true,
        }
    }
}
