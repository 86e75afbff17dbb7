//! Layout options and configuration.

/// Options controlling page layout reconstruction.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Target canvas width in pixels
    pub canvas_width: f32,

    /// Target canvas height in pixels
    pub canvas_height: f32,

    /// Overlap ratio (intersection area over the smaller rect's area)
    /// above which the lower-confidence block is nudged aside
    pub overlap_threshold: f32,

    /// Edge-alignment tolerance as a fraction of the page dimension
    pub guide_tolerance: f32,

    /// Upper bound on overlap-resolution passes over a page
    pub max_nudge_passes: usize,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target canvas size in pixels.
    pub fn with_canvas(mut self, width: f32, height: f32) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    /// Set the overlap ratio above which blocks are nudged apart.
    pub fn with_overlap_threshold(mut self, threshold: f32) -> Self {
        self.overlap_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Set the alignment-guide tolerance (fraction of page dimension).
    pub fn with_guide_tolerance(mut self, tolerance: f32) -> Self {
        self.guide_tolerance = tolerance.max(0.0);
        self
    }

    /// Set the overlap-resolution pass cap.
    pub fn with_max_nudge_passes(mut self, passes: usize) -> Self {
        self.max_nudge_passes = passes;
        self
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            // 3:4 page, matching the notebook aspect ratio
            canvas_width: 720.0,
            canvas_height: 960.0,
            overlap_threshold: 0.25,
            guide_tolerance: 0.01,
            max_nudge_passes: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let options = LayoutOptions::new()
            .with_canvas(1000.0, 1000.0)
            .with_overlap_threshold(0.5)
            .with_guide_tolerance(0.02);
        assert_eq!(options.canvas_width, 1000.0);
        assert_eq!(options.overlap_threshold, 0.5);
        assert_eq!(options.guide_tolerance, 0.02);
    }

    #[test]
    fn test_threshold_clamped() {
        let options = LayoutOptions::new().with_overlap_threshold(3.0);
        assert_eq!(options.overlap_threshold, 1.0);
    }
}
