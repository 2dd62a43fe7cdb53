//! Error types and JSON-RPC error codes for the gateway.

use serde_json::Value;

use crate::upstream::UpstreamError;

use super::message::{JsonRpcError, RequestId};

/// Standard JSON-RPC 2.0 error codes.
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// HTTP status for an error envelope carrying `code`.
pub fn http_status_for(code: i32) -> u16 {
    use error_codes::*;
    match code {
        PARSE_ERROR | INVALID_REQUEST | INVALID_PARAMS => 400,
        METHOD_NOT_FOUND => 404,
        _ => 500,
    }
}

/// All errors that can surface from the gateway's protocol layer.
#[derive(thiserror::Error, Debug)]
pub enum McpError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpError {
    pub fn code(&self) -> i32 {
        use error_codes::*;
        match self {
            McpError::ParseError(_) => PARSE_ERROR,
            McpError::InvalidRequest(_) => INVALID_REQUEST,
            McpError::MethodNotFound(_) => METHOD_NOT_FOUND,
            McpError::InvalidParams(_) => INVALID_PARAMS,
            McpError::InternalError(_)
            | McpError::Upstream(_)
            | McpError::Transport(_)
            | McpError::Io(_)
            | McpError::Json(_) => INTERNAL_ERROR,
        }
    }

    /// The fixed JSON-RPC message for this error's code.
    pub fn message(&self) -> &'static str {
        use error_codes::*;
        match self.code() {
            PARSE_ERROR => "Parse error",
            INVALID_REQUEST => "Invalid Request",
            METHOD_NOT_FOUND => "Method not found",
            INVALID_PARAMS => "Invalid params",
            _ => "Internal error",
        }
    }

    /// Detail carried in the error object's `data` field.
    pub fn data(&self) -> Option<Value> {
        let detail = match self {
            McpError::ParseError(d)
            | McpError::InvalidRequest(d)
            | McpError::MethodNotFound(d)
            | McpError::InvalidParams(d)
            | McpError::InternalError(d)
            | McpError::Transport(d) => d.clone(),
            McpError::Upstream(e) => e.to_string(),
            McpError::Io(e) => e.to_string(),
            McpError::Json(e) => e.to_string(),
        };
        (!detail.is_empty()).then_some(Value::String(detail))
    }

    pub fn http_status(&self) -> u16 {
        http_status_for(self.code())
    }

    pub fn to_json_rpc_error(&self, id: RequestId) -> JsonRpcError {
        JsonRpcError::new(id, self.code(), self.message().to_string(), self.data())
    }
}

pub type McpResult<T> = Result<T, McpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_statuses() {
        let cases = [
            (McpError::ParseError(String::new()), -32700, 400),
            (McpError::InvalidRequest(String::new()), -32600, 400),
            (McpError::MethodNotFound("x".into()), -32601, 404),
            (McpError::InvalidParams("x".into()), -32602, 400),
            (McpError::InternalError("x".into()), -32603, 500),
        ];
        for (err, code, status) in cases {
            assert_eq!(err.code(), code);
            assert_eq!(err.http_status(), status);
        }
    }

    #[test]
    fn test_upstream_error_becomes_internal() {
        let err = McpError::from(UpstreamError::Status { status: 502 });
        let envelope = err.to_json_rpc_error(RequestId::Number(serde_json::Number::from(3i64)));
        assert_eq!(envelope.error.code, -32603);
        assert_eq!(envelope.error.message, "Internal error");
        assert_eq!(
            envelope.error.data,
            Some(Value::String("upstream_error:502".to_string()))
        );
    }

    #[test]
    fn test_empty_detail_has_no_data() {
        let err = McpError::ParseError(String::new());
        assert!(err.data().is_none());
        assert_eq!(err.message(), "Parse error");
    }
}
