//! MCP response types for tools.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Result of a `tools/call`.
///
/// Content items are kept as raw JSON so that node-produced content passes through
/// untouched, whatever its type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallResult {
    #[serde(default)]
    pub content: Vec<Value>,
    #[serde(default, rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl ToolCallResult {
    pub fn text(text: String) -> Self {
        Self {
            content: vec![json!({ "type": "text", "text": text })],
            is_error: None,
        }
    }

    /// A single text item holding the compact JSON encoding of `value`.
    pub fn json(value: &impl Serialize) -> Self {
        let text = serde_json::to_string(value).unwrap_or_else(|e| e.to_string());
        Self::text(text)
    }

    /// A structured validation failure: `{"error": ...}` as text, flagged `isError`.
    pub fn error(payload: Value) -> Self {
        Self {
            is_error: Some(true),
            ..Self::json(&payload)
        }
    }

    pub fn passthrough(content: Vec<Value>, is_error: bool) -> Self {
        Self {
            content,
            is_error: is_error.then_some(true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "inputSchema", default = "empty_object_schema")]
    pub input_schema: Value,
}

fn empty_object_schema() -> Value {
    json!({ "type": "object", "properties": {} })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolListResult {
    pub tools: Vec<ToolDefinition>,
    #[serde(default, rename = "nextCursor", skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_result_is_flagged() {
        let result = ToolCallResult::error(json!({ "error": "unknown node" }));
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["isError"], true);
        assert_eq!(value["content"][0]["type"], "text");
        assert!(value["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains(r#""error":"unknown node""#));
    }

    #[test]
    fn test_passthrough_omits_is_error_when_false() {
        let result = ToolCallResult::passthrough(vec![json!({"type": "text", "text": "4"})], false);
        let value = serde_json::to_value(&result).unwrap();
        assert!(value.get("isError").is_none());
    }

    #[test]
    fn test_tool_definition_missing_schema() {
        let def: ToolDefinition = serde_json::from_value(json!({ "name": "math_add" })).unwrap();
        assert_eq!(def.input_schema["type"], "object");
        assert_eq!(def.description, None);
    }
}
