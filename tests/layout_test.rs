//! Integration tests for layout reconstruction.

use notelayout::{layout_page, Block, GuideAxis, LayoutOptions, Page, Shape};

fn sized(id: &str, x: f32, y: f32, w: f32, h: f32) -> Block {
    let mut block = Block::text_at(id, id, x, y);
    block.width_ratio = w;
    block.height_ratio = h;
    block
}

#[test]
fn scaling_is_linear_and_exact() {
    let page = Page::from_blocks(
        0,
        vec![
            sized("a", 0.0, 0.0, 0.5, 0.25),
            sized("b", 0.75, 0.5, 0.25, 0.5),
        ],
    );
    let options = LayoutOptions::new().with_canvas(800.0, 400.0);
    let layout = layout_page(&page, &options);

    let a = layout.placed("a").unwrap();
    assert_eq!((a.x, a.y, a.width, a.height), (0.0, 0.0, 400.0, 100.0));

    let b = layout.placed("b").unwrap();
    assert_eq!((b.x, b.y, b.width, b.height), (600.0, 200.0, 200.0, 200.0));
}

#[test]
fn out_of_range_blocks_are_clamped_and_flagged() {
    let page = Page::from_blocks(
        0,
        vec![
            sized("ok", 0.2, 0.2, 0.1, 0.1),
            sized("hot", 1.7, 0.5, 0.1, 0.1),
            sized("cold", 0.5, -3.0, 0.1, 0.1),
        ],
    );
    let layout = layout_page(&page, &LayoutOptions::new().with_canvas(100.0, 100.0));

    assert!(!layout.placed("ok").unwrap().flagged);

    let hot = layout.placed("hot").unwrap();
    assert!(hot.flagged);
    assert_eq!(hot.x, 100.0);

    let cold = layout.placed("cold").unwrap();
    assert!(cold.flagged);
    assert_eq!(cold.y, 0.0);
}

#[test]
fn one_malformed_block_does_not_abort_the_page() {
    let mut blocks = vec![sized("bad", f32::INFINITY, f32::NAN, -2.0, 9.0)];
    for i in 0..5 {
        blocks.push(sized(&format!("b{i}"), 0.1, 0.1 + i as f32 * 0.15, 0.2, 0.05));
    }
    let layout = layout_page(
        &Page::from_blocks(0, blocks),
        &LayoutOptions::default(),
    );

    assert_eq!(layout.blocks.len(), 6);
    assert!(layout.placed("bad").unwrap().flagged);
    assert!(!layout.placed("b3").unwrap().flagged);
}

#[test]
fn fully_overlapping_blocks_separate_along_y() {
    // A and B are identical rects at (0.1, 0.1), 0.2 x 0.05.
    let page = Page::from_blocks(
        0,
        vec![
            sized("A", 0.1, 0.1, 0.2, 0.05),
            sized("B", 0.1, 0.1, 0.2, 0.05),
        ],
    );
    let layout = layout_page(&page, &LayoutOptions::new().with_canvas(1000.0, 1000.0));

    let a = layout.placed("A").unwrap();
    let b = layout.placed("B").unwrap();

    // A keeps its top-left position, B moves down at least one height.
    assert_eq!((a.x, a.y), (100.0, 100.0));
    assert_eq!(b.x, a.x);
    assert!(b.y >= a.y + a.height);
}

#[test]
fn shape_blocks_keep_their_variant() {
    let mut box_block = sized("frame", 0.1, 0.1, 0.4, 0.3);
    box_block.shape = Shape::Box;
    box_block.text = String::new();

    let layout = layout_page(
        &Page::from_blocks(0, vec![box_block]),
        &LayoutOptions::default(),
    );
    let placed = layout.placed("frame").unwrap();
    assert_eq!(placed.block.shape, Shape::Box);
    assert!(placed.block.is_shape_only());
}

#[test]
fn aligned_blocks_share_snap_guides() {
    let page = Page::from_blocks(
        0,
        vec![
            sized("top", 0.10, 0.10, 0.2, 0.05),
            sized("mid", 0.10, 0.40, 0.2, 0.05),
            sized("off", 0.55, 0.70, 0.2, 0.05),
        ],
    );
    let layout = layout_page(&page, &LayoutOptions::default());

    let top_guides = layout.guides_for("top");
    assert!(!top_guides.is_empty());
    // "top" and "mid" share left, center, and right vertical lines.
    assert!(top_guides.iter().any(|g| {
        g.axis == GuideAxis::Vertical && g.block_ids == vec!["mid".to_string(), "top".to_string()]
    }));
    // "off" aligns with nothing.
    assert!(layout.guides_for("off").is_empty());
}

#[test]
fn guides_follow_nudged_positions() {
    // After resolution the nudged block's edges participate in guides
    // computed from live positions, not raw OCR positions.
    let page = Page::from_blocks(
        0,
        vec![
            sized("a", 0.1, 0.1, 0.2, 0.05),
            sized("b", 0.1, 0.1, 0.2, 0.05),
        ],
    );
    let layout = layout_page(&page, &LayoutOptions::default());
    let b = layout.placed("b").unwrap();
    assert!(b.nudged);

    // Vertical guides still exist (same x edges); horizontal top/bottom
    // alignment is gone because b moved down.
    assert!(layout
        .guides_for("b")
        .iter()
        .any(|g| g.axis == GuideAxis::Vertical));
}

#[test]
fn layout_is_idempotent() {
    let page = Page::from_blocks(
        0,
        vec![
            sized("a", 0.1, 0.1, 0.2, 0.05),
            sized("b", 0.1, 0.1, 0.2, 0.05),
            sized("c", 0.8, 0.9, 0.1, 0.05),
        ],
    );
    let options = LayoutOptions::default();
    assert_eq!(layout_page(&page, &options), layout_page(&page, &options));
}
