//! Debug artifacts for visual QA: bounding-box overlays and a per-page
//! preview table.
//!
//! Overlay rendering is read-only and independent of the layout pipeline.
//! When rendering a whole document, a page whose overlay cannot be drawn
//! (no source image, or one that fails to decode) is skipped with a
//! warning; a degenerate block is skipped the same way. Neither aborts the
//! remaining pages or blocks.

use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use image::Rgba;
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;

use crate::error::{Error, Result};
use crate::model::{Document, Page};
use crate::render::html::escape;

const BOX_COLOR: Rgba<u8> = Rgba([0, 160, 220, 255]);
const LABEL_SCALE: f32 = 18.0;

/// Marker size for blocks whose OCR geometry has no extent.
const POINT_MARKER: u32 = 6;

/// Draw each block's bounding rectangle and id over a copy of the page's
/// source image, writing a PNG to `out_path`.
pub fn render_overlay(page: &Page, source_image: &Path, out_path: &Path) -> Result<()> {
    if !source_image.is_file() {
        return Err(Error::MissingSourceImage(source_image.to_path_buf()));
    }

    let mut canvas = image::open(source_image)?.to_rgba8();
    let (w, h) = (canvas.width() as f32, canvas.height() as f32);
    let font = load_font();

    for block in &page.blocks {
        let x = block.x_ratio.clamp(0.0, 1.0) * w;
        let y = block.y_ratio.clamp(0.0, 1.0) * h;
        let bw = (block.width_ratio.clamp(0.0, 1.0) * w) as u32;
        let bh = (block.height_ratio.clamp(0.0, 1.0) * h) as u32;

        if !x.is_finite() || !y.is_finite() {
            log::warn!(
                "page {}: skipping block {} with non-finite geometry",
                page.index,
                block.id
            );
            continue;
        }

        let rect = Rect::at(x as i32, y as i32).of_size(bw.max(POINT_MARKER), bh.max(POINT_MARKER));
        draw_hollow_rect_mut(&mut canvas, rect, BOX_COLOR);

        if let Some(ref font) = font {
            let label_y = (y - LABEL_SCALE).max(0.0) as i32;
            draw_text_mut(
                &mut canvas,
                BOX_COLOR,
                x as i32,
                label_y,
                PxScale::from(LABEL_SCALE),
                font,
                &block.id,
            );
        }
    }

    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)?;
    }
    canvas.save(out_path)?;
    Ok(())
}

/// Render the overlay for a page using its own source image reference.
pub fn render_page_overlay(page: &Page, out_path: &Path) -> Result<()> {
    let source = page
        .source_image
        .as_deref()
        .ok_or_else(|| Error::MissingSourceImage(PathBuf::from(format!("page_{}", page.index))))?;
    render_overlay(page, source, out_path)
}

/// Write the per-page QA preview table: id, text, geometry, and confidence
/// of every block.
pub fn write_preview_html(pages: &[Page], out_path: &Path) -> Result<()> {
    let mut out = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\"/>\n\
         <title>OCR preview</title>\n<style>\n\
         body { font-family: sans-serif; margin: 1rem; background: #fafafa; }\n\
         h2 { font-size: 1rem; margin-top: 1.5rem; }\n\
         table { border-collapse: collapse; width: 100%; max-width: 960px; background: #fff; }\n\
         th, td { border: 1px solid #ddd; padding: 0.4rem 0.6rem; text-align: left; }\n\
         th { background: #333; color: #fff; }\n\
         tr:nth-child(even) { background: #f9f9f9; }\n\
         .num { font-variant-numeric: tabular-nums; }\n\
         </style>\n</head>\n<body>\n<h1>OCR preview</h1>\n",
    );

    for page in pages {
        out.push_str(&format!(
            "<h2>Page {} ({} blocks)</h2>\n<table>\n<thead><tr><th>id</th><th>text</th>\
             <th>x</th><th>y</th><th>w</th><th>h</th><th>confidence</th></tr></thead>\n<tbody>\n",
            page.index + 1,
            page.block_count()
        ));
        for block in &page.blocks {
            out.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td class=\"num\">{:.3}</td><td class=\"num\">{:.3}</td>\
                 <td class=\"num\">{:.3}</td><td class=\"num\">{:.3}</td><td class=\"num\">{:.2}</td></tr>\n",
                escape(&block.id),
                escape(&block.text),
                block.x_ratio,
                block.y_ratio,
                block.width_ratio,
                block.height_ratio,
                block.confidence
            ));
        }
        out.push_str("</tbody></table>\n");
    }
    out.push_str("</body></html>\n");

    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(out_path, out)?;
    Ok(())
}

/// Render the debug artifacts for a whole document into `out_dir`:
/// one overlay PNG per page plus the preview table. A page whose overlay
/// fails (missing or undecodable source image) is skipped with a warning;
/// only failures on `out_dir` itself or the preview are fatal. Returns the
/// paths written.
pub fn render_debug_artifacts(document: &Document, out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;
    let mut written = Vec::new();

    for page in &document.pages {
        let out = out_dir.join(format!("overlay_{}.png", page.index));
        match render_page_overlay(page, &out) {
            Ok(()) => written.push(out),
            Err(Error::MissingSourceImage(path)) => {
                log::warn!(
                    "page {}: no source image ({}), skipping overlay",
                    page.index,
                    path.display()
                );
            }
            Err(e) => {
                log::warn!("page {}: overlay failed ({e}), skipping", page.index);
            }
        }
    }

    let preview = out_dir.join("preview.html");
    write_preview_html(&document.pages, &preview)?;
    written.push(preview);

    Ok(written)
}

/// Probe common system font locations for the id labels. Overlays are
/// still drawn without labels when no font is found.
fn load_font() -> Option<FontVec> {
    let font_paths = [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ];

    for path in &font_paths {
        if let Ok(data) = fs::read(path) {
            if let Ok(font) = FontVec::try_from_vec(data) {
                return Some(font);
            }
        }
    }
    None
}
