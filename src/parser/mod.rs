//! Parsing of OCR cache files into the document model.
//!
//! A page cache file holds the OCR result for one page, either as a JSON
//! object mapping block id to record, or in the legacy array layout where
//! each element is a record and ids are the zero-based positions. Cache
//! directories use the `page_<N>.json` naming of the OCR pipeline, with an
//! optional sibling `page_<N>.png` source bitmap.

mod record;

pub use record::CacheRecord;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{sort_reading_order, Block, Document, Page};

/// Parse one page's OCR cache from a JSON string.
///
/// Accepts both the object form (`{"id": {record}, ...}`) and the legacy
/// array form (`[{record}, ...]`). Blocks are returned in reading order.
pub fn parse_page_json(json: &str, page_index: usize) -> Result<Page> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    let mut blocks: Vec<Block> = match value {
        serde_json::Value::Object(map) => {
            // BTreeMap gives a stable id order before the reading-order sort,
            // so parsing is deterministic regardless of file layout.
            let records: BTreeMap<String, CacheRecord> =
                serde_json::from_value(serde_json::Value::Object(map))?;
            records
                .into_iter()
                .map(|(id, record)| record.into_block(id))
                .collect()
        }
        serde_json::Value::Array(items) => {
            let records: Vec<CacheRecord> = serde_json::from_value(serde_json::Value::Array(items))?;
            records
                .into_iter()
                .enumerate()
                .map(|(i, record)| record.into_block(i.to_string()))
                .collect()
        }
        other => {
            return Err(Error::MalformedCache(format!(
                "page {page_index}: expected JSON object or array, got {}",
                value_kind(&other)
            )))
        }
    };

    sort_reading_order(&mut blocks);
    Ok(Page {
        index: page_index,
        source_image: None,
        blocks,
    })
}

/// Parse one page's OCR cache file.
pub fn parse_page_file<P: AsRef<Path>>(path: P, page_index: usize) -> Result<Page> {
    let json = fs::read_to_string(path.as_ref())?;
    let mut page = parse_page_json(&json, page_index)?;

    // A sibling page_<N>.png is the rendered source bitmap.
    let sibling = path.as_ref().with_extension("png");
    if sibling.is_file() {
        page.source_image = Some(sibling);
    }
    Ok(page)
}

/// Load every `page_<N>.json` in a cache directory into a document.
///
/// Pages are ordered by their cache index. No contiguity check happens
/// here; the assembler validates the final page set.
pub fn parse_document_dir<P: AsRef<Path>>(dir: P) -> Result<Document> {
    let dir = dir.as_ref();
    let mut indexed = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let Some(index) = page_index_of(&path) else {
            continue;
        };
        log::debug!("loading OCR cache {}", path.display());
        indexed.push(parse_page_file(&path, index)?);
    }

    if indexed.is_empty() {
        return Err(Error::MalformedCache(format!(
            "no page_<N>.json files found in {}",
            dir.display()
        )));
    }

    Ok(Document::from_pages(indexed))
}

/// Extract `N` from a `page_<N>.json` file name.
fn page_index_of(path: &Path) -> Option<usize> {
    if path.extension().and_then(|e| e.to_str()) != Some("json") {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    stem.strip_prefix("page_")?.parse().ok()
}

fn value_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Shape;

    #[test]
    fn test_parse_object_form() {
        let json = r#"{
            "title": {"text": "Plan", "x_ratio": 0.2, "y_ratio": 0.1, "shape": "box"},
            "step": {"text": "Do it", "x_ratio": 0.2, "y_ratio": 0.4, "links": ["title"]}
        }"#;
        let page = parse_page_json(json, 0).unwrap();
        assert_eq!(page.block_count(), 2);
        assert_eq!(page.blocks[0].id, "title");
        assert_eq!(page.blocks[0].shape, Shape::Box);
        assert_eq!(page.blocks[1].links, ["title"]);
    }

    #[test]
    fn test_parse_legacy_array_form() {
        let json = r#"[
            {"text": "first", "x_ratio": 0.3, "y_ratio": 0.2, "links": [1]},
            {"text": "second", "x_ratio": 0.3, "y_ratio": 0.6}
        ]"#;
        let page = parse_page_json(json, 3).unwrap();
        assert_eq!(page.index, 3);
        assert_eq!(page.blocks[0].id, "0");
        assert_eq!(page.blocks[0].links, ["1"]);
    }

    #[test]
    fn test_reading_order_applied() {
        let json = r#"{
            "b": {"text": "below", "x_ratio": 0.1, "y_ratio": 0.9},
            "a": {"text": "above", "x_ratio": 0.1, "y_ratio": 0.1}
        }"#;
        let page = parse_page_json(json, 0).unwrap();
        assert_eq!(page.blocks[0].id, "a");
        assert_eq!(page.blocks[1].id, "b");
    }

    #[test]
    fn test_scalar_cache_rejected() {
        let err = parse_page_json("42", 0).unwrap_err();
        assert!(matches!(err, Error::MalformedCache(_)));
        assert!(err.to_string().contains("number"));
    }

    #[test]
    fn test_page_index_of() {
        assert_eq!(page_index_of(Path::new("/tmp/page_7.json")), Some(7));
        assert_eq!(page_index_of(Path::new("/tmp/page_7.png")), None);
        assert_eq!(page_index_of(Path::new("/tmp/notes.json")), None);
    }
}
