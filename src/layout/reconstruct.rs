//! Layout reconstruction: OCR blocks to positioned canvas elements.
//!
//! The reconstructor is a pure function of a [`Page`] and the layout
//! options. It clamps malformed geometry, resolves ambiguous overlaps by
//! nudging the lower-confidence block, scales everything to the target
//! canvas, and precomputes alignment guides for interactive snapping.

use crate::layout::guides::{compute_guides, AlignmentGuide};
use crate::layout::LayoutOptions;
use crate::model::{Block, BlockId, Page};

/// An axis-aligned rectangle in normalized page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn area(&self) -> f32 {
        self.w * self.h
    }
}

/// A block positioned on the target canvas.
///
/// This is the session-local view of a block: it wraps the immutable OCR
/// data and carries presentation geometry the reconstructor may have
/// adjusted. The wrapped [`Block`] itself is never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBlock {
    /// The underlying OCR block
    pub block: Block,

    /// Left edge on the canvas, in pixels
    pub x: f32,

    /// Top edge on the canvas, in pixels
    pub y: f32,

    /// Width on the canvas, in pixels
    pub width: f32,

    /// Height on the canvas, in pixels
    pub height: f32,

    /// True when the OCR geometry was out of [0, 1] and had to be clamped
    pub flagged: bool,

    /// True when the block was moved to resolve an ambiguous overlap
    pub nudged: bool,
}

/// The reconstructed layout of one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    /// Index of the source page
    pub page_index: usize,

    /// Canvas width the layout was scaled to
    pub canvas_width: f32,

    /// Canvas height the layout was scaled to
    pub canvas_height: f32,

    /// Placed blocks, in the page's reading order
    pub blocks: Vec<PlacedBlock>,

    /// Alignment guides shared by two or more blocks
    pub guides: Vec<AlignmentGuide>,
}

impl PageLayout {
    /// Look up a placed block by id.
    pub fn placed(&self, id: &str) -> Option<&PlacedBlock> {
        self.blocks.iter().find(|p| p.block.id == id)
    }

    /// Guides that include the given block, i.e. its snap targets.
    pub fn guides_for(&self, id: &str) -> Vec<&AlignmentGuide> {
        self.guides
            .iter()
            .filter(|g| g.block_ids.iter().any(|b| b == id))
            .collect()
    }
}

/// Reconstruct one page's layout.
pub fn reconstruct(page: &Page, options: &LayoutOptions) -> PageLayout {
    let mut rects = Vec::with_capacity(page.blocks.len());
    let mut flags = Vec::with_capacity(page.blocks.len());

    for block in &page.blocks {
        let (rect, flagged) = clamp_geometry(block);
        rects.push(rect);
        flags.push(flagged);
    }

    let nudged = resolve_overlaps(&page.blocks, &mut rects, options);

    let guide_rects: Vec<(BlockId, Rect)> = page
        .blocks
        .iter()
        .zip(&rects)
        .map(|(b, r)| (b.id.clone(), *r))
        .collect();
    let guides = compute_guides(&guide_rects, options.guide_tolerance);

    let blocks = page
        .blocks
        .iter()
        .zip(rects.iter().zip(flags))
        .enumerate()
        .map(|(i, (block, (rect, flagged)))| PlacedBlock {
            block: block.clone(),
            x: rect.x * options.canvas_width,
            y: rect.y * options.canvas_height,
            width: rect.w * options.canvas_width,
            height: rect.h * options.canvas_height,
            flagged,
            nudged: nudged[i],
        })
        .collect();

    PageLayout {
        page_index: page.index,
        canvas_width: options.canvas_width,
        canvas_height: options.canvas_height,
        blocks,
        guides,
    }
}

/// Clamp a block's geometry into [0, 1], reporting whether anything moved.
///
/// Non-finite values are replaced (position to the page midpoint, size to
/// zero) so a single corrupt record cannot poison the rest of the page.
fn clamp_geometry(block: &Block) -> (Rect, bool) {
    let fix = |v: f32, fallback: f32| -> (f32, bool) {
        if !v.is_finite() {
            (fallback, true)
        } else if !(0.0..=1.0).contains(&v) {
            (v.clamp(0.0, 1.0), true)
        } else {
            (v, false)
        }
    };

    let (x, fx) = fix(block.x_ratio, 0.5);
    let (y, fy) = fix(block.y_ratio, 0.5);
    let (w, fw) = fix(block.width_ratio, 0.0);
    let (h, fh) = fix(block.height_ratio, 0.0);

    (Rect { x, y, w, h }, fx || fy || fw || fh)
}

/// Intersection area over the smaller rect's area.
///
/// A zero-area rect counts as fully overlapping when its center lies
/// inside the other rect, so degenerate text points swallowed by a box
/// still get separated.
fn overlap_ratio(a: &Rect, b: &Rect) -> f32 {
    let iw = a.right().min(b.right()) - a.x.max(b.x);
    let ih = a.bottom().min(b.bottom()) - a.y.max(b.y);
    let min_area = a.area().min(b.area());

    if min_area > 0.0 {
        if iw <= 0.0 || ih <= 0.0 {
            return 0.0;
        }
        (iw * ih) / min_area
    } else {
        let (degenerate, other) = if a.area() == 0.0 { (a, b) } else { (b, a) };
        if other.area() == 0.0 {
            return 0.0;
        }
        let (cx, cy) = degenerate.center();
        if cx > other.x && cx < other.right() && cy > other.y && cy < other.bottom() {
            1.0
        } else {
            0.0
        }
    }
}

/// Nudge lower-confidence blocks until no pair overlaps beyond the
/// threshold, capped at `max_nudge_passes` passes. Returns which blocks
/// moved.
fn resolve_overlaps(blocks: &[Block], rects: &mut [Rect], options: &LayoutOptions) -> Vec<bool> {
    let mut nudged = vec![false; rects.len()];
    if rects.len() < 2 || options.overlap_threshold >= 1.0 {
        return nudged;
    }

    // Pairs are visited in reading order so resolution is deterministic.
    let mut order: Vec<usize> = (0..rects.len()).collect();
    order.sort_by(|&a, &b| {
        rects[a]
            .y
            .partial_cmp(&rects[b].y)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(
                rects[a]
                    .x
                    .partial_cmp(&rects[b].x)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
            .then(a.cmp(&b))
    });

    for _ in 0..options.max_nudge_passes {
        let mut changed = false;
        for oi in 0..order.len() {
            for oj in (oi + 1)..order.len() {
                let (first, second) = (order[oi], order[oj]);
                if overlap_ratio(&rects[first], &rects[second]) <= options.overlap_threshold {
                    continue;
                }

                // Lower confidence moves; ties move the later block in
                // reading order so the earlier block keeps its place.
                let mover = if blocks[first].confidence < blocks[second].confidence {
                    first
                } else if blocks[second].confidence < blocks[first].confidence {
                    second
                } else {
                    second
                };
                let anchor = if mover == first { second } else { first };

                nudge_apart(rects, mover, anchor);
                nudged[mover] = true;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    nudged
}

/// Move `mover` down or right, whichever clears its overlap with `anchor`
/// in the smaller displacement. Movement never goes up or left, so a
/// nudged block cannot end up ahead of its anchor in reading order. Equal
/// costs move down, and the result is clamped to keep the block on the
/// page.
fn nudge_apart(rects: &mut [Rect], mover: usize, anchor: usize) {
    let m = rects[mover];
    let a = rects[anchor];

    let right = a.right() - m.x; // move right by this to clear
    let down = a.bottom() - m.y; // move down

    if right < down {
        rects[mover].x = (m.x + right).clamp(0.0, 1.0 - m.w);
    } else {
        rects[mover].y = (m.y + down).clamp(0.0, 1.0 - m.h);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sized(id: &str, x: f32, y: f32, w: f32, h: f32, confidence: f32) -> Block {
        let mut block = Block::text_at(id, id, x, y);
        block.width_ratio = w;
        block.height_ratio = h;
        block.confidence = confidence;
        block
    }

    #[test]
    fn test_exact_scaling_in_range() {
        let page = Page::from_blocks(
            0,
            vec![
                sized("a", 0.1, 0.1, 0.2, 0.05, 0.9),
                sized("b", 0.5, 0.7, 0.3, 0.1, 0.9),
            ],
        );
        let options = LayoutOptions::new().with_canvas(1000.0, 2000.0);
        let layout = reconstruct(&page, &options);

        let a = layout.placed("a").unwrap();
        assert_eq!(a.x, 100.0);
        assert_eq!(a.y, 200.0);
        assert_eq!(a.width, 200.0);
        assert_eq!(a.height, 100.0);
        assert!(!a.flagged);
        assert!(!a.nudged);
    }

    #[test]
    fn test_out_of_range_clamped_and_flagged() {
        let page = Page::from_blocks(0, vec![sized("bad", 1.4, -0.2, 0.1, 0.1, 0.5)]);
        let layout = reconstruct(&page, &LayoutOptions::default());

        let bad = layout.placed("bad").unwrap();
        assert!(bad.flagged);
        assert_eq!(bad.x, layout.canvas_width);
        assert_eq!(bad.y, 0.0);
    }

    #[test]
    fn test_nan_geometry_recovered() {
        let page = Page::from_blocks(0, vec![sized("n", f32::NAN, 0.3, 0.1, 0.1, 0.5)]);
        let layout = reconstruct(&page, &LayoutOptions::default());

        let n = layout.placed("n").unwrap();
        assert!(n.flagged);
        assert_eq!(n.x, 0.5 * layout.canvas_width);
    }

    #[test]
    fn test_full_overlap_nudges_second_down() {
        // A and B fully overlapping, equal confidence.
        let page = Page::from_blocks(
            0,
            vec![
                sized("a", 0.1, 0.1, 0.2, 0.05, 0.0),
                sized("b", 0.1, 0.1, 0.2, 0.05, 0.0),
            ],
        );
        let options = LayoutOptions::new().with_canvas(100.0, 100.0);
        let layout = reconstruct(&page, &options);

        let a = layout.placed("a").unwrap();
        let b = layout.placed("b").unwrap();
        assert!(!a.nudged);
        assert!(b.nudged);
        assert_eq!(a.x, b.x);
        // Moved down by at least one block-height (0.05 of the page).
        assert!(b.y - a.y >= 0.05 * layout.canvas_height - f32::EPSILON);
    }

    #[test]
    fn test_lower_confidence_moves() {
        let page = Page::from_blocks(
            0,
            vec![
                sized("strong", 0.3, 0.3, 0.2, 0.1, 0.9),
                sized("weak", 0.32, 0.31, 0.2, 0.1, 0.2),
            ],
        );
        let layout = reconstruct(&page, &LayoutOptions::default());

        assert!(!layout.placed("strong").unwrap().nudged);
        assert!(layout.placed("weak").unwrap().nudged);
    }

    #[test]
    fn test_nudge_never_moves_against_reading_order() {
        // A small low-confidence block near the top of a tall box must not
        // end up above the box, even though up is the shortest way out.
        let page = Page::from_blocks(
            0,
            vec![
                sized("box", 0.10, 0.10, 0.30, 0.50, 0.9),
                sized("small", 0.15, 0.12, 0.10, 0.05, 0.1),
            ],
        );
        let options = LayoutOptions::new().with_canvas(100.0, 100.0);
        let layout = reconstruct(&page, &options);

        let anchor = layout.placed("box").unwrap();
        let small = layout.placed("small").unwrap();
        assert!(small.nudged);
        assert!(!anchor.nudged);
        // Cleared to the right, keeping its vertical position.
        assert!((small.x - 40.0).abs() < 1e-3);
        assert!((small.y - 12.0).abs() < 1e-3);
        assert!(small.y >= anchor.y);
    }

    #[test]
    fn test_slight_overlap_below_threshold_untouched() {
        let page = Page::from_blocks(
            0,
            vec![
                sized("a", 0.10, 0.10, 0.20, 0.10, 0.5),
                sized("b", 0.28, 0.19, 0.20, 0.10, 0.5),
            ],
        );
        let layout = reconstruct(&page, &LayoutOptions::default());

        assert!(!layout.placed("a").unwrap().nudged);
        assert!(!layout.placed("b").unwrap().nudged);
    }

    #[test]
    fn test_reconstruct_is_deterministic() {
        let page = Page::from_blocks(
            0,
            vec![
                sized("a", 0.1, 0.1, 0.2, 0.05, 0.4),
                sized("b", 0.1, 0.1, 0.2, 0.05, 0.4),
                sized("c", 0.12, 0.11, 0.2, 0.05, 0.8),
            ],
        );
        let options = LayoutOptions::default();
        assert_eq!(reconstruct(&page, &options), reconstruct(&page, &options));
    }

    #[test]
    fn test_overlap_ratio_degenerate_rect() {
        let point = Rect {
            x: 0.5,
            y: 0.5,
            w: 0.0,
            h: 0.0,
        };
        let boxed = Rect {
            x: 0.4,
            y: 0.4,
            w: 0.3,
            h: 0.3,
        };
        assert_eq!(overlap_ratio(&point, &boxed), 1.0);

        let outside = Rect {
            x: 0.9,
            y: 0.9,
            w: 0.0,
            h: 0.0,
        };
        assert_eq!(overlap_ratio(&outside, &boxed), 0.0);
    }
}
