//! Best-effort discovery: one handshake per configured node, in order.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::{json, Value};

use edge_gateway::{DiscoveredNode, DiscoveryOutcome, Node, NodeEntry};

use crate::types::InitializeParams;
use crate::upstream::{UpstreamClient, UpstreamError};

#[derive(Debug, Default, Deserialize)]
struct ReportedServer {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
}

/// The parts of a node's `initialize` result the gateway adopts.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HandshakeReply {
    #[serde(default)]
    protocol_version: Option<String>,
    #[serde(default)]
    server_info: Option<ReportedServer>,
    #[serde(default)]
    instructions: Option<String>,
}

/// Handshake with every entry sequentially. Never fails; unreachable nodes fall back to
/// their configured or URL-derived identity.
pub async fn discover_nodes(upstream: &UpstreamClient, entries: &[NodeEntry]) -> Vec<DiscoveredNode> {
    let mut discovered = Vec::with_capacity(entries.len());
    let mut seen_ids = HashSet::new();

    for entry in entries {
        let mut probed = probe(upstream, entry).await;
        probed.node.id = unique_id(&mut seen_ids, probed.node.id);
        discovered.push(probed);
    }

    let fallbacks = discovered.iter().filter(|d| d.outcome.is_fallback()).count();
    tracing::info!(
        nodes = discovered.len(),
        fallbacks,
        "Node discovery pass complete"
    );

    discovered
}

async fn probe(upstream: &UpstreamClient, entry: &NodeEntry) -> DiscoveredNode {
    match handshake(upstream, &entry.url).await {
        Ok(reply) => {
            upstream
                .notify(&entry.url, "notifications/initialized", json!({}))
                .await;

            let server = reply.server_info.unwrap_or_default();
            let node = Node::from_entry(entry, server.name.clone(), reply.instructions);
            DiscoveredNode {
                node,
                outcome: DiscoveryOutcome::Handshake {
                    server_name: server.name,
                    server_version: server.version,
                    protocol_version: reply.protocol_version,
                },
            }
        }
        Err(e) => {
            tracing::warn!(url = %entry.url, "Handshake failed, using configured identity: {e}");
            DiscoveredNode {
                node: Node::from_entry(entry, None, None),
                outcome: DiscoveryOutcome::Fallback {
                    reason: e.to_string(),
                },
            }
        }
    }
}

async fn handshake(upstream: &UpstreamClient, url: &str) -> Result<HandshakeReply, UpstreamError> {
    let params = serde_json::to_value(InitializeParams::gateway_client())
        .map_err(|e| UpstreamError::InvalidEnvelope(e.to_string()))?;
    let result = upstream.request(url, "initialize", params).await?;
    parse_handshake(result)
}

fn parse_handshake(result: Value) -> Result<HandshakeReply, UpstreamError> {
    if !result.is_object() {
        return Err(UpstreamError::InvalidEnvelope(
            "initialize result is not an object".to_string(),
        ));
    }
    serde_json::from_value(result).map_err(|e| UpstreamError::InvalidEnvelope(e.to_string()))
}

/// Keep ids unique within one snapshot by suffixing repeats (`id-2`, `id-3`, ...).
fn unique_id(seen: &mut HashSet<String>, id: String) -> String {
    if seen.insert(id.clone()) {
        return id;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{id}-{n}");
        if seen.insert(candidate.clone()) {
            tracing::warn!(id = %id, renamed = %candidate, "Duplicate node id in configuration");
            return candidate;
        }
        n += 1;
    }
}
