//! Edge MCP gateway: entry point.

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use edge_gateway_mcp::config::{ConfigOverrides, GatewayConfig};
use edge_gateway_mcp::tools::ToolRegistry;
use edge_gateway_mcp::transport::HttpTransport;
use edge_gateway_mcp::{build_handler, CacheStore, NodeDirectory, UpstreamClient};

#[derive(Parser)]
#[command(
    name = "edge-gateway-mcp",
    about = "MCP gateway: one JSON-RPC endpoint in front of dynamically discovered MCP nodes",
    version
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Settings shared by every command that talks to nodes.
/// Each flag falls back to its environment variable, then to the default.
#[derive(Args, Debug, Clone, Default)]
struct GatewayArgs {
    /// Node list: JSON array of URLs or {url,name?,description?,id?} objects,
    /// or comma-separated URLs. Also reads MCP_NODES.
    #[arg(long)]
    nodes: Option<String>,

    /// Discovery cache TTL in seconds. Also reads NODE_DISCOVERY_CACHE_TTL.
    #[arg(long)]
    discovery_ttl: Option<String>,

    /// Per-node tool list cache TTL in seconds. Also reads NODE_TOOLS_CACHE_TTL.
    #[arg(long)]
    tools_ttl: Option<String>,

    /// Upstream call timeout in milliseconds. Also reads UPSTREAM_TIMEOUT_MS.
    #[arg(long)]
    upstream_timeout_ms: Option<String>,

    /// Cache REST endpoint. Also reads UPSTASH_REDIS_REST_URL.
    #[arg(long)]
    cache_url: Option<String>,

    /// Cache REST bearer token. Also reads UPSTASH_REDIS_REST_TOKEN.
    #[arg(long)]
    cache_token: Option<String>,
}

impl GatewayArgs {
    fn into_config(self, addr: Option<String>) -> GatewayConfig {
        GatewayConfig::from_env(ConfigOverrides {
            nodes: self.nodes,
            discovery_ttl: self.discovery_ttl,
            tools_ttl: self.tools_ttl,
            upstream_timeout_ms: self.upstream_timeout_ms,
            cache_url: self.cache_url,
            cache_token: self.cache_token,
            addr,
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gateway over HTTP (default).
    Serve {
        /// Listen address (host:port). Also reads EDGE_GATEWAY_ADDR.
        #[arg(long)]
        addr: Option<String>,

        #[command(flatten)]
        gateway: GatewayArgs,
    },

    /// Run one uncached discovery pass and print the nodes with their outcomes.
    Discover {
        #[command(flatten)]
        gateway: GatewayArgs,
    },

    /// Print gateway identity and the meta-tool catalog as JSON.
    Info,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   edge-gateway-mcp completions bash > ~/.local/share/bash-completion/completions/edge-gateway-mcp
    ///   edge-gateway-mcp completions zsh > ~/.zfunc/_edge-gateway-mcp
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command.unwrap_or(Commands::Serve {
        addr: None,
        gateway: GatewayArgs::default(),
    }) {
        Commands::Serve { addr, gateway } => {
            let config = gateway.into_config(addr);
            tracing::info!("Edge MCP gateway");
            tracing::info!(
                discovery_ttl = config.discovery_ttl_secs,
                tools_ttl = config.tools_ttl_secs,
                upstream_timeout_ms = u64::try_from(config.upstream_timeout.as_millis()).unwrap_or(u64::MAX),
                cache = if config.cache.is_some() { "rest" } else { "disabled" },
                "Configuration resolved"
            );

            let handler = build_handler(&config)?;
            let transport = HttpTransport::new(handler);
            transport.run(&config.addr).await?;
        }

        Commands::Discover { gateway } => {
            let config = gateway.into_config(None);
            let directory = NodeDirectory::new(
                &config,
                CacheStore::disabled(),
                UpstreamClient::new(config.upstream_timeout)?,
            );
            let discovered = directory.discover().await;
            println!("{}", serde_json::to_string_pretty(&discovered)?);
        }

        Commands::Info => {
            let init = edge_gateway_mcp::types::InitializeResult::default_result();
            let registry = ToolRegistry::new();
            let info = serde_json::json!({
                "server": init.server_info,
                "protocol_version": init.protocol_version,
                "capabilities": init.capabilities,
                "tools": registry.list_tools(),
                "tool_count": registry.list_tools().len(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "edge-gateway-mcp", &mut std::io::stdout());
        }
    }

    Ok(())
}
