//! Gateway meta-tools.

pub mod call_node_tool;
pub mod list_node_tools;
pub mod list_nodes;
pub mod registry;

pub use registry::ToolRegistry;

use serde_json::{json, Value};

use crate::types::ToolCallResult;

/// A non-empty string argument.
pub(crate) fn str_arg<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

pub(crate) fn unknown_node(node_id: &str) -> ToolCallResult {
    ToolCallResult::error(json!({ "error": "unknown node", "node_id": node_id }))
}
