//! Node directory: discovery and per-node tool lists, memoized through the cache.

pub mod discovery;

use std::time::Instant;

use serde_json::{json, Value};

use edge_gateway::{config_fingerprint, parse_node_entries, DiscoveredNode, Node, NodeEntry};

use crate::cache::{CacheMeta, CacheStore};
use crate::config::GatewayConfig;
use crate::upstream::{UpstreamClient, UpstreamError};

pub use discovery::discover_nodes;

/// A directory snapshot plus how it was obtained.
#[derive(Debug, Clone)]
pub struct DirectoryListing {
    pub nodes: Vec<Node>,
    pub meta: CacheMeta,
}

/// One node's tool list plus how it was obtained.
///
/// Tool descriptors are kept exactly as the node reported them.
#[derive(Debug, Clone)]
pub struct NodeToolsListing {
    pub tools: Vec<Value>,
    pub meta: CacheMeta,
}

/// Configured nodes and the means to discover and query them.
///
/// Holds no per-request state; everything shared between requests lives in the cache.
pub struct NodeDirectory {
    nodes_raw: String,
    entries: Vec<NodeEntry>,
    cache: CacheStore,
    upstream: UpstreamClient,
    discovery_ttl_secs: u64,
    tools_ttl_secs: u64,
}

impl NodeDirectory {
    pub fn new(config: &GatewayConfig, cache: CacheStore, upstream: UpstreamClient) -> Self {
        let entries = parse_node_entries(&config.nodes_raw);
        tracing::info!(
            nodes = entries.len(),
            cache = cache.backend_name(),
            "Node directory configured"
        );

        Self {
            nodes_raw: config.nodes_raw.clone(),
            entries,
            cache,
            upstream,
            discovery_ttl_secs: config.discovery_ttl_secs,
            tools_ttl_secs: config.tools_ttl_secs,
        }
    }

    pub fn entries(&self) -> &[NodeEntry] {
        &self.entries
    }

    pub fn upstream(&self) -> &UpstreamClient {
        &self.upstream
    }

    /// Key of the cached snapshot; changes with any edit to the node configuration.
    pub fn nodes_cache_key(&self) -> String {
        format!("mcp:nodes:{}", config_fingerprint(&self.nodes_raw))
    }

    /// Key of a node's cached tool list.
    pub fn tools_cache_key(node: &Node) -> String {
        format!("mcp:node_tools:{}:{}", node.id, config_fingerprint(&node.url))
    }

    /// Run one uncached discovery pass.
    pub async fn discover(&self) -> Vec<DiscoveredNode> {
        discover_nodes(&self.upstream, &self.entries).await
    }

    /// The current snapshot, from cache when possible.
    pub async fn nodes(&self) -> DirectoryListing {
        let key = self.nodes_cache_key();
        let started = Instant::now();

        if let Some(entry) = self.cache.get_json::<Vec<Node>>(&key).await {
            return DirectoryListing {
                nodes: entry.value,
                meta: meta(true, key, self.discovery_ttl_secs, started),
            };
        }

        let nodes: Vec<Node> = self.discover().await.into_iter().map(|d| d.node).collect();
        self.cache.set_json(&key, self.discovery_ttl_secs, &nodes).await;

        DirectoryListing {
            nodes,
            meta: meta(false, key, self.discovery_ttl_secs, started),
        }
    }

    /// A node's tools, from cache when possible. Upstream failures propagate.
    pub async fn node_tools(&self, node: &Node) -> Result<NodeToolsListing, UpstreamError> {
        let key = Self::tools_cache_key(node);
        let started = Instant::now();

        if let Some(entry) = self.cache.get_json::<Vec<Value>>(&key).await {
            return Ok(NodeToolsListing {
                tools: entry.value,
                meta: meta(true, key, self.tools_ttl_secs, started),
            });
        }

        let tools = self.fetch_tools(node).await?;
        self.cache.set_json(&key, self.tools_ttl_secs, &tools).await;

        Ok(NodeToolsListing {
            tools,
            meta: meta(false, key, self.tools_ttl_secs, started),
        })
    }

    async fn fetch_tools(&self, node: &Node) -> Result<Vec<Value>, UpstreamError> {
        let result = self
            .upstream
            .request(&node.url, "tools/list", json!({}))
            .await?;

        match result.get("tools") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(tools)) => Ok(tools.clone()),
            Some(_) => Err(UpstreamError::InvalidEnvelope(
                "tools/list: tools is not an array".to_string(),
            )),
        }
    }
}

fn meta(cache_hit: bool, cache_key: String, ttl: u64, started: Instant) -> CacheMeta {
    CacheMeta {
        cache_hit,
        cache_key,
        cache_ttl_seconds: ttl,
        latency_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
    }
}
