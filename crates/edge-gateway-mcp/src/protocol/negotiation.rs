//! MCP initialization. The gateway keeps no session, so this always succeeds.

use serde_json::Value;

use crate::types::{InitializeParams, InitializeResult, MCP_VERSION};

/// Build the `initialize` result, logging what the client declared when it is readable.
pub fn negotiate(params: Option<&Value>) -> InitializeResult {
    match params.map(|p| serde_json::from_value::<InitializeParams>(p.clone())) {
        Some(Ok(init)) => {
            if init.protocol_version != MCP_VERSION {
                tracing::warn!(
                    "Client requested protocol version {}, gateway speaks {}. Proceeding with gateway version.",
                    init.protocol_version,
                    MCP_VERSION
                );
            }
            tracing::info!(
                "Initialized with client: {} v{}",
                init.client_info.name,
                init.client_info.version
            );
        }
        Some(Err(e)) => tracing::debug!("Unreadable initialize params: {e}"),
        None => tracing::debug!("Initialize without params"),
    }

    InitializeResult::default_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_negotiate_always_succeeds() {
        let good = json!({
            "protocolVersion": "2025-03-26",
            "capabilities": {},
            "clientInfo": {"name": "test-client", "version": "1.0"}
        });
        assert_eq!(negotiate(Some(&good)).protocol_version, MCP_VERSION);
        assert_eq!(negotiate(Some(&json!("garbage"))).protocol_version, MCP_VERSION);
        assert_eq!(negotiate(None).protocol_version, MCP_VERSION);
    }
}
