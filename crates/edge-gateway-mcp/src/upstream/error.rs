//! Upstream transport failures.

/// Everything that can go wrong in a single call to a node.
#[derive(thiserror::Error, Debug)]
pub enum UpstreamError {
    #[error("upstream_timeout: {url} did not respond within {timeout_ms}ms")]
    Timeout { url: String, timeout_ms: u64 },

    #[error("upstream_error:{status}")]
    Status { status: u16 },

    #[error("upstream_error:empty_sse")]
    EmptyEventStream,

    #[error("upstream_error:invalid_json: {0}")]
    InvalidJson(String),

    #[error("upstream_error:invalid_envelope: {0}")]
    InvalidEnvelope(String),

    #[error("upstream_rpc_error:{code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("upstream_transport: {0}")]
    Transport(#[from] reqwest::Error),
}

impl UpstreamError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, UpstreamError::Timeout { .. })
    }
}
