//! Link-tree outline export.
//!
//! Flattens the document's text blocks and follows their links as
//! parent-child edges, emitting a nested markdown list. The first parent
//! to claim a block wins, so shared targets appear once and cyclic links
//! cannot recurse. Blocks never reached through a link stay top-level
//! items in document order.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::model::{Block, Document};

/// Render the document's link structure as a markdown outline.
///
/// Shape-only blocks (no text) are left out; links to them or to missing
/// ids are silently dropped. Pages are flattened, so a cross-page link
/// nests its target like any other child.
pub fn render_outline(document: &Document) -> String {
    let blocks: Vec<&Block> = document
        .pages
        .iter()
        .flat_map(|p| p.blocks.iter())
        .filter(|b| !b.is_shape_only())
        .collect();

    if blocks.is_empty() {
        return "(no recognized content)\n".to_string();
    }

    let index_of: HashMap<&str, usize> = blocks
        .iter()
        .enumerate()
        .map(|(i, b)| (b.id.as_str(), i))
        .collect();
    let children: Vec<Vec<usize>> = blocks
        .iter()
        .map(|b| {
            b.links
                .iter()
                .filter_map(|id| index_of.get(id.as_str()).copied())
                .collect()
        })
        .collect();

    let mut out = String::new();
    let mut visited = vec![false; blocks.len()];
    for i in 0..blocks.len() {
        if !visited[i] {
            emit_item(&mut out, i, 0, &blocks, &children, &mut visited);
        }
    }
    out
}

/// Render the outline and write it to a file.
pub fn render_outline_to_file<P: AsRef<Path>>(document: &Document, path: P) -> Result<()> {
    let outline = render_outline(document);
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, outline)?;
    Ok(())
}

fn emit_item(
    out: &mut String,
    index: usize,
    depth: usize,
    blocks: &[&Block],
    children: &[Vec<usize>],
    visited: &mut [bool],
) {
    visited[index] = true;
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str("- ");
    out.push_str(blocks[index].text.trim());
    out.push('\n');

    for &child in &children[index] {
        if !visited[child] {
            emit_item(out, child, depth + 1, blocks, children, visited);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Page, Shape};

    fn linked(id: &str, text: &str, y: f32, links: &[&str]) -> Block {
        let mut block = Block::text_at(id, text, 0.1, y);
        block.links = links.iter().map(|s| s.to_string()).collect();
        block
    }

    #[test]
    fn test_links_nest_as_children() {
        let document = Document::from_pages(vec![Page::from_blocks(
            0,
            vec![
                linked("root", "Trip plan", 0.1, &["pack", "book"]),
                linked("pack", "Pack bags", 0.3, &["boots"]),
                linked("boots", "Boots", 0.5, &[]),
                linked("book", "Book hotel", 0.7, &[]),
            ],
        )]);

        let outline = render_outline(&document);
        assert_eq!(
            outline,
            "- Trip plan\n  - Pack bags\n    - Boots\n  - Book hotel\n"
        );
    }

    #[test]
    fn test_unlinked_blocks_stay_top_level() {
        let document = Document::from_pages(vec![Page::from_blocks(
            0,
            vec![
                linked("a", "First", 0.1, &["b"]),
                linked("b", "Second", 0.3, &[]),
                linked("c", "Stray note", 0.5, &[]),
            ],
        )]);

        let outline = render_outline(&document);
        assert_eq!(outline, "- First\n  - Second\n- Stray note\n");
    }

    #[test]
    fn test_cyclic_links_terminate() {
        let document = Document::from_pages(vec![Page::from_blocks(
            0,
            vec![
                linked("a", "Alpha", 0.1, &["b"]),
                linked("b", "Beta", 0.3, &["a"]),
            ],
        )]);

        let outline = render_outline(&document);
        assert_eq!(outline, "- Alpha\n  - Beta\n");
    }

    #[test]
    fn test_shape_only_and_dangling_links_dropped() {
        let mut frame = Block::text_at("frame", "", 0.2, 0.2);
        frame.shape = Shape::Box;
        let document = Document::from_pages(vec![Page::from_blocks(
            0,
            vec![
                linked("a", "Heading", 0.1, &["frame", "missing", "b"]),
                frame,
                linked("b", "Detail", 0.5, &[]),
            ],
        )]);

        let outline = render_outline(&document);
        assert_eq!(outline, "- Heading\n  - Detail\n");
    }

    #[test]
    fn test_cross_page_link_nests_target() {
        let document = Document::from_pages(vec![
            Page::from_blocks(0, vec![linked("a", "Overview", 0.1, &["far"])]),
            Page::from_blocks(1, vec![linked("far", "Appendix", 0.1, &[])]),
        ]);

        let outline = render_outline(&document);
        assert_eq!(outline, "- Overview\n  - Appendix\n");
    }

    #[test]
    fn test_empty_document_placeholder() {
        assert_eq!(render_outline(&Document::new()), "(no recognized content)\n");
    }
}
