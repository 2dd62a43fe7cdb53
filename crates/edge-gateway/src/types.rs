//! Core data types for gateway nodes and discovery.

use serde::{Deserialize, Serialize};

/// A configured node, before any handshake has been attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeEntry {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl NodeEntry {
    /// An entry configured by URL alone.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// A resolved node in a directory snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub description: String,
    pub url: String,
}

impl Node {
    /// Build a node from its configuration entry and whatever the handshake reported.
    ///
    /// Reported values win over configured ones; an empty name falls back to the URL and
    /// a missing id is derived from the URL.
    pub fn from_entry(
        entry: &NodeEntry,
        reported_name: Option<String>,
        reported_description: Option<String>,
    ) -> Self {
        let name = reported_name
            .filter(|n| !n.is_empty())
            .or_else(|| entry.name.clone().filter(|n| !n.is_empty()))
            .unwrap_or_else(|| entry.url.clone());

        let description = reported_description
            .filter(|d| !d.is_empty())
            .or_else(|| entry.description.clone())
            .unwrap_or_default();

        let id = entry
            .id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| crate::slug::derive_node_id(&entry.url));

        Self {
            id,
            name,
            description,
            url: entry.url.clone(),
        }
    }
}

/// How a single node's discovery attempt ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DiscoveryOutcome {
    /// The node answered `initialize`.
    Handshake {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        server_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        server_version: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        protocol_version: Option<String>,
    },
    /// The handshake failed; the node was built from configuration only.
    Fallback { reason: String },
}

impl DiscoveryOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, DiscoveryOutcome::Fallback { .. })
    }
}

/// A node together with the outcome of the discovery attempt that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveredNode {
    pub node: Node,
    pub outcome: DiscoveryOutcome,
}
