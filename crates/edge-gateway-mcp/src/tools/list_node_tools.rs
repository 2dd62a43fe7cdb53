//! Tool: list_node_tools. List the tools one node exposes.

use serde_json::{json, Value};

use edge_gateway::resolve_node;

use crate::directory::NodeDirectory;
use crate::types::{McpResult, ToolCallResult, ToolDefinition};

use super::{str_arg, unknown_node};

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "list_node_tools".to_string(),
        description: Some("List tools for a specific node.".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "node_id": { "type": "string" }
            },
            "required": ["node_id"]
        }),
    }
}

pub async fn execute(args: Value, directory: &NodeDirectory) -> McpResult<ToolCallResult> {
    let Some(node_id) = str_arg(&args, "node_id") else {
        return Ok(ToolCallResult::error(json!({ "error": "node_id required" })));
    };

    let listing = directory.nodes().await;
    let Some(node) = resolve_node(&listing.nodes, node_id) else {
        return Ok(unknown_node(node_id));
    };

    let tools = directory.node_tools(node).await?;

    let mut meta = serde_json::to_value(&tools.meta)?;
    meta["nodes_cache_hit"] = json!(listing.meta.cache_hit);

    tracing::info!(
        event = "list_node_tools",
        node_id,
        tools = tools.tools.len(),
        cache_hit = tools.meta.cache_hit,
        nodes_cache_hit = listing.meta.cache_hit,
        latency_ms = tools.meta.latency_ms,
        "Listed node tools"
    );

    Ok(ToolCallResult::json(&json!({
        "node": node,
        "tools": tools.tools,
        "_meta": meta,
    })))
}
