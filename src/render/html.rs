//! HTML emission for reconstructed pages.

use crate::layout::{PageLayout, PlacedBlock};
use crate::render::connector::Connector;

/// Escape text for an HTML element or attribute value.
pub(crate) fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Format a canvas coordinate as a page percentage.
fn pct(value: f32, canvas: f32) -> String {
    format!("{:.2}%", value / canvas * 100.0)
}

/// Render one page as an HTML `<section>` with its connector layer.
///
/// `connectors` may span the whole document; only entries whose source
/// page matches are rendered here.
pub(crate) fn render_page_section(layout: &PageLayout, connectors: &[Connector]) -> String {
    let mut out = String::new();
    let index = layout.page_index;

    out.push_str(&format!(
        "<section class=\"page-section\" id=\"page-{index}\">\n  <h2 class=\"page-title\">Page {}</h2>\n  <div class=\"note-page-wrap\">\n    <div class=\"note-page\" data-page=\"{index}\">\n",
        index + 1
    ));

    for placed in &layout.blocks {
        out.push_str("      ");
        out.push_str(&render_block(placed, layout));
        out.push('\n');
    }

    for connector in connectors {
        if connector.source_page() != index {
            continue;
        }
        match connector {
            Connector::CrossPage {
                from, to_page, to, ..
            } => {
                if let Some(src) = layout.placed(from) {
                    out.push_str(&format!(
                        "      <a class=\"jump-marker\" href=\"#page-{to_page}\" title=\"to {} on page {}\" style=\"left:{};top:{};\">&#8674; p.{}</a>\n",
                        escape(to),
                        to_page + 1,
                        pct(src.x + src.width, layout.canvas_width),
                        pct(src.y, layout.canvas_height),
                        to_page + 1
                    ));
                }
            }
            Connector::Broken { from, target, .. } => {
                if let Some(src) = layout.placed(from) {
                    out.push_str(&format!(
                        "      <span class=\"broken-link\" title=\"link target {} not found\" style=\"left:{};top:{};\">&#9888; {}</span>\n",
                        escape(target),
                        pct(src.x + src.width, layout.canvas_width),
                        pct(src.y, layout.canvas_height),
                        escape(target)
                    ));
                }
            }
            Connector::SamePage { .. } => {}
        }
    }

    out.push_str("    </div>\n");
    out.push_str(&format!(
        "    <svg class=\"note-arrows\" id=\"arrows-{index}\" viewBox=\"0 0 100 100\" preserveAspectRatio=\"none\" xmlns=\"http://www.w3.org/2000/svg\">\n"
    ));
    for connector in connectors {
        if let Connector::SamePage {
            page,
            from,
            to,
            path,
        } = connector
        {
            if *page == index {
                out.push_str(&format!(
                    "      <path d=\"{}\" data-from=\"{}\" data-to=\"{}\"/>\n",
                    path.to_svg(),
                    escape(from),
                    escape(to)
                ));
            }
        }
    }
    out.push_str("    </svg>\n  </div>\n</section>");
    out
}

/// Render one placed block as a positioned div.
fn render_block(placed: &PlacedBlock, layout: &PageLayout) -> String {
    let block = &placed.block;

    let mut classes = format!("note-block shape-{}", block.shape.tag());
    if placed.flagged {
        classes.push_str(" flagged");
    }

    let mut style = format!(
        "left:{};top:{};",
        pct(placed.x, layout.canvas_width),
        pct(placed.y, layout.canvas_height)
    );
    // Zero-size blocks keep their natural content size.
    if placed.width > 0.0 {
        style.push_str(&format!("width:{};", pct(placed.width, layout.canvas_width)));
    }
    if placed.height > 0.0 {
        style.push_str(&format!(
            "height:{};",
            pct(placed.height, layout.canvas_height)
        ));
    }
    if block.color != "default" {
        style.push_str(&format!("color:{};", escape(&block.color)));
    }

    let links_json = serde_json::to_string(&block.links).unwrap_or_else(|_| "[]".to_string());
    let mut attrs = format!(
        " data-id=\"{}\" data-links=\"{}\"",
        escape(&block.id),
        escape(&links_json)
    );
    if placed.flagged {
        attrs.push_str(" data-flagged=\"true\"");
    }

    format!(
        "<div class=\"{classes}\"{attrs} style=\"{style}\" contenteditable=\"false\">{}</div>",
        escape(&block.text)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{reconstruct, LayoutOptions};
    use crate::model::{Block, Page, Shape};

    fn layout_of(page: &Page) -> PageLayout {
        reconstruct(page, &LayoutOptions::default())
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }

    #[test]
    fn test_block_markup() {
        let mut block = Block::text_at("b0", "Hello <world>", 0.1, 0.2);
        block.width_ratio = 0.2;
        block.height_ratio = 0.05;
        block.color = "#c00".to_string();
        block.links = vec!["b1".to_string()];

        let page = Page::from_blocks(0, vec![block]);
        let html = render_page_section(&layout_of(&page), &[]);

        assert!(html.contains("data-id=\"b0\""));
        assert!(html.contains("Hello &lt;world&gt;"));
        assert!(html.contains("left:10.00%;top:20.00%;"));
        assert!(html.contains("width:20.00%;"));
        assert!(html.contains("color:#c00;"));
        assert!(html.contains("data-links=\"[&quot;b1&quot;]\""));
    }

    #[test]
    fn test_shape_only_block_is_outline_container() {
        let mut block = Block::text_at("frame", "", 0.1, 0.1);
        block.shape = Shape::Box;
        block.width_ratio = 0.4;
        block.height_ratio = 0.3;

        let page = Page::from_blocks(0, vec![block]);
        let html = render_page_section(&layout_of(&page), &[]);

        assert!(html.contains("shape-box"));
        assert!(html.contains("contenteditable=\"false\"></div>"));
    }

    #[test]
    fn test_flagged_block_marked() {
        let block = Block::text_at("bad", "x", 1.5, 0.1);
        let page = Page::from_blocks(0, vec![block]);
        let html = render_page_section(&layout_of(&page), &[]);

        assert!(html.contains("data-flagged=\"true\""));
        assert!(html.contains(" flagged"));
    }

    #[test]
    fn test_section_anchor_and_title() {
        let page = Page::from_blocks(4, vec![Block::text_at("a", "x", 0.1, 0.1)]);
        let html = render_page_section(&layout_of(&page), &[]);

        assert!(html.contains("id=\"page-4\""));
        assert!(html.contains("Page 5"));
    }
}
