//! Tool: call_node_tool. Invoke a tool on a node and relay its content.

use serde_json::{json, Value};

use edge_gateway::{resolve_node, Node};

use crate::directory::NodeDirectory;
use crate::types::{McpResult, ToolCallParams, ToolCallResult, ToolDefinition};
use crate::upstream::{UpstreamClient, UpstreamError};

use super::{str_arg, unknown_node};

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "call_node_tool".to_string(),
        description: Some("Call a tool on a specific node.".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "node_id": { "type": "string" },
                "tool_name": { "type": "string" },
                "arguments": { "type": "object" }
            },
            "required": ["node_id", "tool_name"]
        }),
    }
}

pub async fn execute(args: Value, directory: &NodeDirectory) -> McpResult<ToolCallResult> {
    let (Some(node_id), Some(tool_name)) = (str_arg(&args, "node_id"), str_arg(&args, "tool_name"))
    else {
        return Ok(ToolCallResult::error(
            json!({ "error": "node_id and tool_name required" }),
        ));
    };

    let arguments = match args.get("arguments") {
        None | Some(Value::Null) => json!({}),
        Some(obj @ Value::Object(_)) => obj.clone(),
        Some(_) => {
            return Ok(ToolCallResult::error(
                json!({ "error": "arguments must be an object" }),
            ))
        }
    };

    let listing = directory.nodes().await;
    let Some(node) = resolve_node(&listing.nodes, node_id) else {
        return Ok(unknown_node(node_id));
    };

    let result = invoke(directory.upstream(), node, tool_name, arguments).await?;

    tracing::info!(
        event = "call_node_tool",
        node_id,
        tool_name,
        nodes_cache_hit = listing.meta.cache_hit,
        is_error = result.is_error.unwrap_or(false),
        "Called node tool"
    );

    Ok(result)
}

/// Issue `tools/call` against a node and relay its content untouched.
pub async fn invoke(
    upstream: &UpstreamClient,
    node: &Node,
    tool_name: &str,
    arguments: Value,
) -> Result<ToolCallResult, UpstreamError> {
    let params = ToolCallParams {
        name: tool_name.to_string(),
        arguments: Some(arguments),
    };
    let params =
        serde_json::to_value(params).map_err(|e| UpstreamError::InvalidEnvelope(e.to_string()))?;

    let result = upstream.request(&node.url, "tools/call", params).await?;

    let content = match result.get("content") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.clone(),
        Some(_) => {
            return Err(UpstreamError::InvalidEnvelope(
                "tools/call content is not an array".to_string(),
            ))
        }
    };
    let is_error = result
        .get("isError")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    Ok(ToolCallResult::passthrough(content, is_error))
}
