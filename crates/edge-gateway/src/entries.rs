//! Node list configuration parsing.
//!
//! The node list is a JSON array whose items are either URL strings or
//! `{url, name?, description?, id?}` objects. When the value is not JSON at all it is
//! read as a comma-separated list of URLs.

use serde_json::Value;

use crate::types::NodeEntry;

/// Why a single configured item was skipped.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("node entry {index} has no url")]
    MissingUrl { index: usize },

    #[error("node entry {index} is not a string or object")]
    Unsupported { index: usize },

    #[error("node entry {index} is malformed: {reason}")]
    Malformed { index: usize, reason: String },
}

/// Parse the raw node list into ordered entries. Invalid items are skipped with a warning.
pub fn parse_node_entries(raw: &str) -> Vec<NodeEntry> {
    let raw = if raw.trim().is_empty() { "[]" } else { raw };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match entry_from_value(index, item) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping {e}");
                    None
                }
            })
            .collect(),
        Ok(_) => {
            tracing::warn!("Node list is valid JSON but not an array; no nodes configured");
            Vec::new()
        }
        Err(_) => raw
            .split(',')
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(NodeEntry::from_url)
            .collect(),
    }
}

fn entry_from_value(index: usize, item: Value) -> Result<NodeEntry, EntryError> {
    match item {
        Value::String(url) if !url.trim().is_empty() => Ok(NodeEntry::from_url(url.trim())),
        Value::String(_) => Err(EntryError::MissingUrl { index }),
        Value::Object(map) => {
            let has_url = map
                .get("url")
                .and_then(Value::as_str)
                .is_some_and(|url| !url.trim().is_empty());
            if !has_url {
                return Err(EntryError::MissingUrl { index });
            }
            serde_json::from_value(Value::Object(map)).map_err(|e| EntryError::Malformed {
                index,
                reason: e.to_string(),
            })
        }
        _ => Err(EntryError::Unsupported { index }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_strings_and_objects() {
        let raw = r#"[
            "http://localhost:8001/mcp",
            {"url": "http://localhost:8002/mcp", "name": "Search", "id": "search"}
        ]"#;
        let entries = parse_node_entries(raw);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], NodeEntry::from_url("http://localhost:8001/mcp"));
        assert_eq!(entries[1].name.as_deref(), Some("Search"));
        assert_eq!(entries[1].id.as_deref(), Some("search"));
        assert_eq!(entries[1].description, None);
    }

    #[test]
    fn test_comma_fallback() {
        let entries = parse_node_entries("http://a.test/mcp, ,http://b.test/mcp ,");
        let urls: Vec<&str> = entries.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(urls, vec!["http://a.test/mcp", "http://b.test/mcp"]);
    }

    #[test]
    fn test_non_array_json_is_empty() {
        assert!(parse_node_entries(r#"{"url": "http://a.test"}"#).is_empty());
        assert!(parse_node_entries("42").is_empty());
    }

    #[test]
    fn test_empty_config() {
        assert!(parse_node_entries("").is_empty());
        assert!(parse_node_entries("[]").is_empty());
    }

    #[test]
    fn test_invalid_items_skipped() {
        let raw = r#"["http://a.test/mcp", 7, {"name": "no url"}, {"url": ""}, {"url": "http://b.test", "name": 3}]"#;
        let entries = parse_node_entries(raw);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].url, "http://a.test/mcp");
    }

    #[test]
    fn test_entry_errors() {
        assert_eq!(
            entry_from_value(2, Value::Bool(true)),
            Err(EntryError::Unsupported { index: 2 })
        );
        assert_eq!(
            entry_from_value(0, serde_json::json!({"id": "x"})),
            Err(EntryError::MissingUrl { index: 0 })
        );
    }
}
