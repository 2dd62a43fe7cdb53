//! Configuration loading and resolution.
//!
//! Values come from CLI flags, then environment variables, then defaults. Numeric settings
//! that are not positive integers fall back to their defaults.

use std::time::Duration;

use crate::cache::RestCacheConfig;

pub const DEFAULT_NODE_DISCOVERY_CACHE_TTL: u64 = 10;
pub const DEFAULT_NODE_TOOLS_CACHE_TTL: u64 = 30;
pub const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_ADDR: &str = "127.0.0.1:8787";

pub const ENV_NODES: &str = "MCP_NODES";
pub const ENV_DISCOVERY_TTL: &str = "NODE_DISCOVERY_CACHE_TTL";
pub const ENV_TOOLS_TTL: &str = "NODE_TOOLS_CACHE_TTL";
pub const ENV_UPSTREAM_TIMEOUT: &str = "UPSTREAM_TIMEOUT_MS";
pub const ENV_CACHE_URL: &str = "UPSTASH_REDIS_REST_URL";
pub const ENV_CACHE_TOKEN: &str = "UPSTASH_REDIS_REST_TOKEN";
pub const ENV_ADDR: &str = "EDGE_GATEWAY_ADDR";

/// Resolved gateway settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// The node list exactly as configured; its fingerprint keys the directory cache.
    pub nodes_raw: String,
    pub discovery_ttl_secs: u64,
    pub tools_ttl_secs: u64,
    pub upstream_timeout: Duration,
    pub cache: Option<RestCacheConfig>,
    pub addr: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            nodes_raw: "[]".to_string(),
            discovery_ttl_secs: DEFAULT_NODE_DISCOVERY_CACHE_TTL,
            tools_ttl_secs: DEFAULT_NODE_TOOLS_CACHE_TTL,
            upstream_timeout: Duration::from_millis(DEFAULT_UPSTREAM_TIMEOUT_MS),
            cache: None,
            addr: DEFAULT_ADDR.to_string(),
        }
    }
}

/// Explicit overrides, typically from CLI flags. `None` defers to the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub nodes: Option<String>,
    pub discovery_ttl: Option<String>,
    pub tools_ttl: Option<String>,
    pub upstream_timeout_ms: Option<String>,
    pub cache_url: Option<String>,
    pub cache_token: Option<String>,
    pub addr: Option<String>,
}

impl GatewayConfig {
    /// Resolve from the process environment.
    pub fn from_env(overrides: ConfigOverrides) -> Self {
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve with an arbitrary variable lookup.
    pub fn resolve(overrides: ConfigOverrides, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let pick = |explicit: Option<String>, key: &str| explicit.or_else(|| lookup(key));
        let defaults = Self::default();

        let nodes_raw = pick(overrides.nodes, ENV_NODES)
            .filter(|raw| !raw.trim().is_empty())
            .unwrap_or(defaults.nodes_raw);

        let discovery_ttl_secs = parse_positive(
            pick(overrides.discovery_ttl, ENV_DISCOVERY_TTL).as_deref(),
            DEFAULT_NODE_DISCOVERY_CACHE_TTL,
        );
        let tools_ttl_secs = parse_positive(
            pick(overrides.tools_ttl, ENV_TOOLS_TTL).as_deref(),
            DEFAULT_NODE_TOOLS_CACHE_TTL,
        );
        let timeout_ms = parse_positive(
            pick(overrides.upstream_timeout_ms, ENV_UPSTREAM_TIMEOUT).as_deref(),
            DEFAULT_UPSTREAM_TIMEOUT_MS,
        );

        let cache = RestCacheConfig::from_parts(
            pick(overrides.cache_url, ENV_CACHE_URL),
            pick(overrides.cache_token, ENV_CACHE_TOKEN),
        );

        let addr = pick(overrides.addr, ENV_ADDR)
            .filter(|a| !a.trim().is_empty())
            .unwrap_or(defaults.addr);

        Self {
            nodes_raw,
            discovery_ttl_secs,
            tools_ttl_secs,
            upstream_timeout: Duration::from_millis(timeout_ms),
            cache,
            addr,
        }
    }
}

/// Parse a positive integer, or return `fallback`.
pub fn parse_positive(raw: Option<&str>, fallback: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(fallback)
}
