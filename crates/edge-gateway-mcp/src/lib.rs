//! Edge MCP gateway: one JSON-RPC endpoint in front of dynamically discovered MCP nodes.

pub mod cache;
pub mod config;
pub mod directory;
pub mod protocol;
pub mod tools;
pub mod transport;
pub mod types;
pub mod upstream;

pub use cache::CacheStore;
pub use config::GatewayConfig;
pub use directory::NodeDirectory;
pub use protocol::ProtocolHandler;
pub use tools::ToolRegistry;
pub use transport::HttpTransport;
pub use upstream::UpstreamClient;

use std::sync::Arc;

use cache::RestCacheBackend;
use types::McpResult;
use upstream::UpstreamError;

/// Wire the gateway from resolved configuration.
pub fn build_handler(config: &GatewayConfig) -> McpResult<ProtocolHandler> {
    let cache = match &config.cache {
        Some(rest) => {
            let backend = RestCacheBackend::new(rest.clone(), config.upstream_timeout)
                .map_err(UpstreamError::from)?;
            CacheStore::new(Arc::new(backend))
        }
        None => CacheStore::disabled(),
    };
    build_handler_with_cache(config, cache)
}

/// Wire the gateway with an explicit cache store.
pub fn build_handler_with_cache(
    config: &GatewayConfig,
    cache: CacheStore,
) -> McpResult<ProtocolHandler> {
    let upstream = UpstreamClient::new(config.upstream_timeout)?;
    let directory = NodeDirectory::new(config, cache, upstream);
    Ok(ProtocolHandler::new(
        Arc::new(ToolRegistry::new()),
        Arc::new(directory),
    ))
}
