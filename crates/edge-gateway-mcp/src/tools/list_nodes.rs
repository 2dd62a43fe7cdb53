//! Tool: list_nodes. List the nodes discovered from configuration.

use serde_json::{json, Value};

use crate::directory::NodeDirectory;
use crate::types::{McpResult, ToolCallResult, ToolDefinition};

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "list_nodes".to_string(),
        description: Some("List available MCP nodes discovered from configured URLs.".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {}
        }),
    }
}

pub async fn execute(_args: Value, directory: &NodeDirectory) -> McpResult<ToolCallResult> {
    let listing = directory.nodes().await;
    let meta = &listing.meta;

    tracing::info!(
        event = "list_nodes",
        nodes = listing.nodes.len(),
        cache_hit = meta.cache_hit,
        cache_key = %meta.cache_key,
        cache_ttl_seconds = meta.cache_ttl_seconds,
        latency_ms = meta.latency_ms,
        "Listed nodes"
    );

    Ok(ToolCallResult::json(&json!({
        "nodes": listing.nodes,
        "_meta": listing.meta,
    })))
}
