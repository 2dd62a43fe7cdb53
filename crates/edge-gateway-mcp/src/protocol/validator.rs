//! JSON-RPC envelope parsing and validation.

use serde_json::Value;

use crate::types::{JsonRpcRequest, McpError, McpResult, RequestId, JSONRPC_VERSION};

/// Parse a request body. Anything that is not JSON is a parse error.
pub fn parse_body(body: &[u8]) -> McpResult<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(McpError::ParseError("Empty body".to_string()));
    }
    serde_json::from_slice(body).map_err(|e| McpError::ParseError(e.to_string()))
}

/// Validate a parsed envelope and turn it into a request.
///
/// The envelope must be an object with `jsonrpc: "2.0"` and a non-empty string `method`.
/// A missing id (a notification) becomes `null`.
pub fn validate_request(envelope: Value) -> McpResult<JsonRpcRequest> {
    let Value::Object(mut map) = envelope else {
        return Err(McpError::InvalidRequest(
            "Request must be a JSON object".to_string(),
        ));
    };

    match map.get("jsonrpc").and_then(Value::as_str) {
        Some(JSONRPC_VERSION) => {}
        Some(other) => {
            return Err(McpError::InvalidRequest(format!(
                "Expected jsonrpc version \"{JSONRPC_VERSION}\", got \"{other}\""
            )))
        }
        None => {
            return Err(McpError::InvalidRequest(
                "Missing jsonrpc version".to_string(),
            ))
        }
    }

    let method = match map.remove("method") {
        Some(Value::String(m)) if !m.is_empty() => m,
        _ => {
            return Err(McpError::InvalidRequest(
                "Method name must be a non-empty string".to_string(),
            ))
        }
    };

    let id = map
        .remove("id")
        .and_then(|id| serde_json::from_value(id).ok())
        .unwrap_or(RequestId::Null);

    let params = map.remove("params").filter(|p| !p.is_null());

    Ok(JsonRpcRequest {
        jsonrpc: JSONRPC_VERSION.to_string(),
        id,
        method,
        params,
    })
}
