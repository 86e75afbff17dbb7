//! Alignment guides: shared edges and center lines between blocks.

use crate::layout::reconstruct::Rect;
use crate::model::BlockId;

/// Orientation of an alignment guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideAxis {
    /// A vertical line at a shared x position
    Vertical,
    /// A horizontal line at a shared y position
    Horizontal,
}

/// A line shared by two or more blocks, usable as a snap target while
/// dragging.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentGuide {
    /// Guide orientation
    pub axis: GuideAxis,

    /// Position of the line in normalized page coordinates
    pub position: f32,

    /// Ids of the blocks sharing this line, sorted for determinism
    pub block_ids: Vec<BlockId>,
}

/// Compute alignment guides for a set of placed rects.
///
/// For each block the left/center/right x lines and top/center/bottom y
/// lines are collected; lines from different blocks lying within
/// `tolerance` of each other form one guide. The result is a deterministic
/// function of the input set.
pub(crate) fn compute_guides(rects: &[(BlockId, Rect)], tolerance: f32) -> Vec<AlignmentGuide> {
    let mut guides = Vec::new();

    let vertical: Vec<(f32, &BlockId)> = rects
        .iter()
        .flat_map(|(id, r)| {
            [
                (r.x, id),
                (r.x + r.w / 2.0, id),
                (r.right(), id),
            ]
        })
        .collect();
    cluster_lines(vertical, tolerance, GuideAxis::Vertical, &mut guides);

    let horizontal: Vec<(f32, &BlockId)> = rects
        .iter()
        .flat_map(|(id, r)| {
            [
                (r.y, id),
                (r.y + r.h / 2.0, id),
                (r.bottom(), id),
            ]
        })
        .collect();
    cluster_lines(horizontal, tolerance, GuideAxis::Horizontal, &mut guides);

    guides
}

/// Group nearby lines into guides, keeping only groups that span at least
/// two distinct blocks.
fn cluster_lines(
    mut lines: Vec<(f32, &BlockId)>,
    tolerance: f32,
    axis: GuideAxis,
    out: &mut Vec<AlignmentGuide>,
) {
    lines.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.1.cmp(b.1))
    });

    let mut start = 0;
    while start < lines.len() {
        let anchor = lines[start].0;
        let mut end = start + 1;
        while end < lines.len() && lines[end].0 - anchor <= tolerance {
            end += 1;
        }

        let cluster = &lines[start..end];
        let mut ids: Vec<BlockId> = cluster.iter().map(|(_, id)| (*id).clone()).collect();
        ids.sort();
        ids.dedup();

        if ids.len() >= 2 {
            let position = cluster.iter().map(|(p, _)| p).sum::<f32>() / cluster.len() as f32;
            out.push(AlignmentGuide {
                axis,
                position,
                block_ids: ids,
            });
        }
        start = end;
    }
}
