//! REST key/value backend (Upstash-style command API).
//!
//! Commands are POSTed as JSON arrays, e.g. `["GET", key]` or `["SETEX", key, ttl, value]`,
//! with a bearer token. The reply is `{"result": ...}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde_json::Value;

use super::CacheBackend;

/// Connection settings for the REST backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestCacheConfig {
    pub base_url: String,
    pub token: String,
}

impl RestCacheConfig {
    /// Both values are required; the URL loses any trailing `/`.
    pub fn from_parts(base_url: Option<String>, token: Option<String>) -> Option<Self> {
        let base_url = base_url.filter(|u| !u.trim().is_empty())?;
        let token = token.filter(|t| !t.trim().is_empty())?;
        Some(Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            token: token.trim().to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct CommandReply {
    #[serde(default)]
    result: Value,
}

pub struct RestCacheBackend {
    client: reqwest::Client,
    config: RestCacheConfig,
}

impl RestCacheBackend {
    pub fn new(config: RestCacheConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, config })
    }

    async fn command(&self, command: &[&str]) -> Option<Value> {
        let response = self
            .client
            .post(&self.config.base_url)
            .header(AUTHORIZATION, format!("Bearer {}", self.config.token))
            .json(command)
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(command = command[0], "Cache backend unreachable: {e}");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                command = command[0],
                status = response.status().as_u16(),
                "Cache backend rejected command"
            );
            return None;
        }

        match response.json::<CommandReply>().await {
            Ok(reply) => Some(reply.result),
            Err(e) => {
                tracing::debug!(command = command[0], "Malformed cache backend reply: {e}");
                None
            }
        }
    }
}

#[async_trait]
impl CacheBackend for RestCacheBackend {
    async fn get(&self, key: &str) -> Option<String> {
        match self.command(&["GET", key]).await? {
            Value::String(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    async fn set(&self, key: &str, ttl_seconds: u64, value: String) {
        let ttl = ttl_seconds.to_string();
        let _ = self.command(&["SETEX", key, &ttl, &value]).await;
    }

    fn name(&self) -> &'static str {
        "rest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn backend(server: &MockServer) -> RestCacheBackend {
        let config = RestCacheConfig::from_parts(Some(format!("{}/", server.uri())), Some("secret".into()))
            .expect("config");
        RestCacheBackend::new(config, Duration::from_secs(2)).expect("client")
    }

    #[test]
    fn test_config_requires_both_parts() {
        assert!(RestCacheConfig::from_parts(Some("https://kv.test".into()), None).is_none());
        assert!(RestCacheConfig::from_parts(None, Some("t".into())).is_none());
        assert!(RestCacheConfig::from_parts(Some(" ".into()), Some("t".into())).is_none());
        let config =
            RestCacheConfig::from_parts(Some("https://kv.test//".into()), Some("t".into())).unwrap();
        assert_eq!(config.base_url, "https://kv.test");
    }

    #[tokio::test]
    async fn test_get_sends_bearer_command() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer secret"))
            .and(body_json(serde_json::json!(["GET", "mcp:nodes:1"])))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"result": "cached"})))
            .mount(&server)
            .await;

        assert_eq!(backend(&server).get("mcp:nodes:1").await.as_deref(), Some("cached"));
    }

    #[tokio::test]
    async fn test_null_result_is_miss() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"result": null})))
            .mount(&server)
            .await;

        assert_eq!(backend(&server).get("k").await, None);
    }

    #[tokio::test]
    async fn test_backend_failure_is_miss() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        assert_eq!(backend(&server).get("k").await, None);
    }

    #[tokio::test]
    async fn test_setex_command_shape() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(serde_json::json!(["SETEX", "k", "30", "[1]"])))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"result": "OK"})))
            .expect(1)
            .mount(&server)
            .await;

        backend(&server).set("k", 30, "[1]".to_string()).await;
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_silent() {
        let config = RestCacheConfig::from_parts(Some("http://127.0.0.1:9".into()), Some("t".into())).unwrap();
        let backend = RestCacheBackend::new(config, Duration::from_millis(500)).unwrap();
        assert_eq!(backend.get("k").await, None);
        backend.set("k", 10, "v".to_string()).await;
    }
}
