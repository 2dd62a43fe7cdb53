//! Main request dispatcher: validates envelopes and routes by method.

use std::sync::Arc;

use serde_json::Value;

use crate::directory::NodeDirectory;
use crate::tools::ToolRegistry;
use crate::types::*;

use super::negotiation::negotiate;
use super::validator::{parse_body, validate_request};

/// What to send back for one inbound message.
#[derive(Debug, Clone)]
pub enum Reply {
    Response(JsonRpcResponse),
    Error(JsonRpcError),
    /// Notification acknowledged; no body.
    Accepted,
}

impl Reply {
    fn error(id: RequestId, err: &McpError) -> Self {
        Reply::Error(err.to_json_rpc_error(id))
    }

    pub fn status(&self) -> u16 {
        match self {
            Reply::Response(_) => 200,
            Reply::Error(e) => http_status_for(e.error.code),
            Reply::Accepted => 204,
        }
    }

    /// The envelope as JSON; `None` for an acknowledged notification.
    pub fn body(&self) -> Option<Value> {
        match self {
            Reply::Response(r) => serde_json::to_value(r).ok(),
            Reply::Error(e) => serde_json::to_value(e).ok(),
            Reply::Accepted => None,
        }
    }
}

/// Stateless dispatcher: one request in, one reply out.
pub struct ProtocolHandler {
    registry: Arc<ToolRegistry>,
    directory: Arc<NodeDirectory>,
}

impl ProtocolHandler {
    pub fn new(registry: Arc<ToolRegistry>, directory: Arc<NodeDirectory>) -> Self {
        Self {
            registry,
            directory,
        }
    }

    pub fn directory(&self) -> &NodeDirectory {
        &self.directory
    }

    /// Handle a raw request body.
    pub async fn handle_bytes(&self, body: &[u8]) -> Reply {
        match parse_body(body) {
            Ok(envelope) => self.handle_value(envelope).await,
            Err(e) => {
                tracing::warn!("Parse error: {e}");
                Reply::error(RequestId::Null, &e)
            }
        }
    }

    /// Handle an already-parsed envelope.
    pub async fn handle_value(&self, envelope: Value) -> Reply {
        let fallback_id = RequestId::recover(&envelope);
        let request = match validate_request(envelope) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!("Rejected envelope: {e}");
                return Reply::error(fallback_id, &e);
            }
        };

        if request.method == "notifications/initialized" {
            tracing::debug!("Client reported initialized");
            return Reply::Accepted;
        }

        let id = request.id.clone();
        match self.dispatch_request(&request).await {
            Ok(result) => Reply::Response(JsonRpcResponse::new(id, result)),
            Err(e) => {
                if e.code() == error_codes::INTERNAL_ERROR {
                    tracing::error!(method = %request.method, id = %id, "Request failed: {e}");
                }
                Reply::error(id, &e)
            }
        }
    }

    async fn dispatch_request(&self, request: &JsonRpcRequest) -> McpResult<Value> {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request.params.as_ref()),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tools_call(request.params.clone()).await,
            _ => Err(McpError::MethodNotFound(request.method.clone())),
        }
    }

    fn handle_initialize(&self, params: Option<&Value>) -> McpResult<Value> {
        let result = negotiate(params);
        serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
    }

    fn handle_tools_list(&self) -> McpResult<Value> {
        let result = ToolListResult {
            tools: self.registry.list_tools().to_vec(),
            next_cursor: None,
        };
        serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
    }

    async fn handle_tools_call(&self, params: Option<Value>) -> McpResult<Value> {
        let call_params: ToolCallParams = params
            .and_then(|p| serde_json::from_value::<ToolCallParams>(p).ok())
            .filter(|p| !p.name.is_empty())
            .ok_or_else(|| McpError::InvalidParams("tool name required".to_string()))?;

        let result = self
            .registry
            .call(&call_params.name, call_params.arguments, &self.directory)
            .await?;

        serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
    }
}
