//! Single JSON-RPC calls to a node URL with a hard deadline.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;

use crate::types::{JsonRpcNotification, JsonRpcRequest};

use super::error::UpstreamError;
use super::event_stream;

const ACCEPT_BOTH: &str = "application/json, text/event-stream";
const EVENT_STREAM: &str = "text/event-stream";

/// HTTP client for node calls. Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl UpstreamClient {
    /// Fails only if the TLS backend cannot be initialized.
    pub fn new(timeout: Duration) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("edge-gateway-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// POST `body` to `url` and return the decoded response envelope.
    ///
    /// The deadline covers the whole exchange, body read included. Event-stream replies
    /// resolve to their last data frame.
    pub async fn call(&self, url: &str, body: &impl Serialize) -> Result<Value, UpstreamError> {
        match tokio::time::timeout(self.timeout, self.exchange(url, body)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(url, timeout_ms = self.timeout_ms(), "Upstream call timed out");
                Err(UpstreamError::Timeout {
                    url: url.to_string(),
                    timeout_ms: self.timeout_ms(),
                })
            }
        }
    }

    /// Issue a request and return its `result`, turning error envelopes into errors.
    pub async fn request(
        &self,
        url: &str,
        method: &str,
        params: Value,
    ) -> Result<Value, UpstreamError> {
        let request = JsonRpcRequest::new(method, params);
        let envelope = self.call(url, &request).await?;
        into_result(envelope)
    }

    /// Fire a one-way notification. Failures are logged and dropped.
    pub async fn notify(&self, url: &str, method: &str, params: Value) {
        let notification = JsonRpcNotification::new(method, Some(params));
        let exchange = self
            .client
            .post(url)
            .header(ACCEPT, ACCEPT_BOTH)
            .json(&notification)
            .send();

        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => tracing::debug!(url, method, "Notification failed: {e}"),
            Err(_) => tracing::debug!(url, method, "Notification timed out"),
        }
    }

    async fn exchange(&self, url: &str, body: &impl Serialize) -> Result<Value, UpstreamError> {
        let response = self
            .client
            .post(url)
            .header(ACCEPT, ACCEPT_BOTH)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
            });
        }

        let streamed = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains(EVENT_STREAM));

        let text = response.text().await?;
        if streamed {
            event_stream::last_data_frame(&text)
        } else {
            serde_json::from_str(&text).map_err(|e| UpstreamError::InvalidJson(e.to_string()))
        }
    }

    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Extract `result` from a response envelope. A missing `result` is `null`.
pub fn into_result(envelope: Value) -> Result<Value, UpstreamError> {
    let Value::Object(mut map) = envelope else {
        return Err(UpstreamError::InvalidEnvelope(
            "response is not a JSON object".to_string(),
        ));
    };

    if let Some(error) = map.get("error").filter(|e| !e.is_null()) {
        return Err(UpstreamError::Rpc {
            code: error.get("code").and_then(Value::as_i64).unwrap_or_default(),
            message: error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        });
    }

    Ok(map.remove("result").unwrap_or(Value::Null))
}
