//! Multi-page assembly: per-page layouts into one HTML document.

use std::fs;
use std::path::Path;

use rayon::prelude::*;

use crate::error::Result;
use crate::layout::{reconstruct, PageLayout};
use crate::model::Document;
use crate::render::connector::compute_connectors;
use crate::render::html::{escape, render_page_section};
use crate::render::RenderOptions;

const STYLESHEET: &str = include_str!("assets/style.css");
const SCRIPT: &str = include_str!("assets/script.js");

/// Assemble a whole document into one interactive HTML page.
///
/// The page set is validated first: a document with duplicated or
/// non-contiguous page indices is rejected outright and no partial output
/// is produced. Pages are laid out independently (in parallel unless
/// disabled) and concatenated in index order with page-boundary headings;
/// cross-page link markers point at the target page's section anchor.
pub fn assemble(document: &Document, options: &RenderOptions) -> Result<String> {
    document.validate_page_indices()?;

    let mut layouts: Vec<PageLayout> = if options.parallel {
        document
            .pages
            .par_iter()
            .map(|page| reconstruct(page, &options.layout))
            .collect()
    } else {
        document
            .pages
            .iter()
            .map(|page| reconstruct(page, &options.layout))
            .collect()
    };
    layouts.sort_by_key(|l| l.page_index);

    let connectors = compute_connectors(document, &layouts);

    let sections: Vec<String> = layouts
        .iter()
        .map(|layout| render_page_section(layout, &connectors))
        .collect();

    log::info!(
        "assembled {} pages, {} connectors",
        layouts.len(),
        connectors.len()
    );

    Ok(wrap_document(&options.title, &sections))
}

/// Assemble and write the document to a file.
pub fn assemble_to_file<P: AsRef<Path>>(
    document: &Document,
    path: P,
    options: &RenderOptions,
) -> Result<()> {
    let html = assemble(document, options)?;
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html)?;
    Ok(())
}

fn wrap_document(title: &str, sections: &[String]) -> String {
    let title = escape(title);
    let body = if sections.is_empty() {
        "<p class=\"empty-note\">No recognized content</p>".to_string()
    } else {
        sections.join("\n")
    };

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"UTF-8\"/>\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"/>\n\
         <title>{title}</title>\n\
         <style>\n{STYLESHEET}</style>\n\
         </head>\n\
         <body>\n\
         <div class=\"save-bar\"><span>{title}</span> <button type=\"button\" id=\"save-layout-btn\">Save positions and text to HTML</button></div>\n\
         <div class=\"save-bar-spacer\"></div>\n\
         {body}\n\
         <script>\n{SCRIPT}</script>\n\
         </body>\n\
         </html>\n"
    )
}
