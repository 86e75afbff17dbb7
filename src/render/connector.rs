//! Connector computation: directed links between blocks.
//!
//! Same-page links become curves between the facing edges of the two
//! blocks. Cross-page links become jump markers anchored at the source
//! block, since pages are laid out sequentially and a literal line across
//! pages is not meaningful. Links whose target exists nowhere in the
//! document become broken-link markers instead of failing the render.

use crate::layout::{PageLayout, PlacedBlock};
use crate::model::{BlockId, Document};

/// A cubic Bezier path in page-percent coordinates (0..100 on both axes).
#[derive(Debug, Clone, PartialEq)]
pub struct CurvePath {
    pub x1: f32,
    pub y1: f32,
    pub cx1: f32,
    pub cy1: f32,
    pub cx2: f32,
    pub cy2: f32,
    pub x2: f32,
    pub y2: f32,
}

impl CurvePath {
    /// The SVG path data for this curve.
    pub fn to_svg(&self) -> String {
        format!(
            "M {:.2} {:.2} C {:.2} {:.2}, {:.2} {:.2}, {:.2} {:.2}",
            self.x1, self.y1, self.cx1, self.cy1, self.cx2, self.cy2, self.x2, self.y2
        )
    }
}

/// A directed connector derived from a block's link set.
#[derive(Debug, Clone, PartialEq)]
pub enum Connector {
    /// Both endpoints live on the same page; drawn as an immediate curve.
    SamePage {
        page: usize,
        from: BlockId,
        to: BlockId,
        path: CurvePath,
    },

    /// The target lives on another page; drawn as a scroll-target marker.
    CrossPage {
        from_page: usize,
        from: BlockId,
        to_page: usize,
        to: BlockId,
    },

    /// The target id exists nowhere in the document.
    Broken {
        page: usize,
        from: BlockId,
        target: BlockId,
    },
}

impl Connector {
    /// The page the connector is rendered on (always the source page).
    pub fn source_page(&self) -> usize {
        match self {
            Connector::SamePage { page, .. } => *page,
            Connector::CrossPage { from_page, .. } => *from_page,
            Connector::Broken { page, .. } => *page,
        }
    }
}

/// Compute every connector in the document.
///
/// `layouts` must hold one layout per document page; connectors are
/// emitted in page order, then block reading order, then link order, so
/// the result is deterministic.
pub fn compute_connectors(document: &Document, layouts: &[PageLayout]) -> Vec<Connector> {
    let mut connectors = Vec::new();

    for layout in layouts {
        for placed in &layout.blocks {
            for target in &placed.block.links {
                connectors.push(classify_link(document, layout, placed, target));
            }
        }
    }

    connectors
}

fn classify_link(
    document: &Document,
    layout: &PageLayout,
    from: &PlacedBlock,
    target: &BlockId,
) -> Connector {
    if let Some(to) = layout.placed(target) {
        return Connector::SamePage {
            page: layout.page_index,
            from: from.block.id.clone(),
            to: to.block.id.clone(),
            path: curve_between(from, to, layout),
        };
    }

    if let Some(page) = document.page_of(target) {
        return Connector::CrossPage {
            from_page: layout.page_index,
            from: from.block.id.clone(),
            to_page: page.index,
            to: target.clone(),
        };
    }

    log::warn!(
        "page {}: block {} links to missing target {:?}",
        layout.page_index,
        from.block.id,
        target
    );
    Connector::Broken {
        page: layout.page_index,
        from: from.block.id.clone(),
        target: target.clone(),
    }
}

/// Percent-space bounds of a placed block.
struct PctRect {
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
}

impl PctRect {
    fn of(placed: &PlacedBlock, layout: &PageLayout) -> Self {
        Self {
            left: placed.x / layout.canvas_width * 100.0,
            top: placed.y / layout.canvas_height * 100.0,
            right: (placed.x + placed.width) / layout.canvas_width * 100.0,
            bottom: (placed.y + placed.height) / layout.canvas_height * 100.0,
        }
    }

    fn cx(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    fn cy(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }

    /// Midpoint of the edge facing `other`: the dominant axis of the
    /// center-to-center vector picks left/right vs top/bottom edges.
    fn facing_edge(&self, other: &PctRect) -> (f32, f32) {
        let dx = other.cx() - self.cx();
        let dy = other.cy() - self.cy();
        if dx.abs() >= dy.abs() {
            if dx > 0.0 {
                (self.right, self.cy())
            } else {
                (self.left, self.cy())
            }
        } else if dy > 0.0 {
            (self.cx(), self.bottom)
        } else {
            (self.cx(), self.top)
        }
    }
}

/// Build the curve between two placed blocks, clamped to the viewport.
fn curve_between(from: &PlacedBlock, to: &PlacedBlock, layout: &PageLayout) -> CurvePath {
    let a = PctRect::of(from, layout);
    let b = PctRect::of(to, layout);

    let (x1, y1) = a.facing_edge(&b);
    let (x2, y2) = b.facing_edge(&a);

    let clamp = |v: f32| v.clamp(0.0, 100.0);
    let (x1, y1, x2, y2) = (clamp(x1), clamp(y1), clamp(x2), clamp(y2));

    CurvePath {
        x1,
        y1,
        cx1: x1 + (x2 - x1) * 0.4,
        cy1: y1,
        cx2: x2 - (x2 - x1) * 0.4,
        cy2: y2,
        x2,
        y2,
    }
}
