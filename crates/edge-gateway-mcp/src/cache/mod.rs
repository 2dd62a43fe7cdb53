//! Read-through TTL cache over an external key/value backend.
//!
//! The cache only accelerates. Backends never report errors to callers: a failed read is a
//! miss and a failed write is a no-op.

pub mod memory;
pub mod rest;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use memory::MemoryCacheBackend;
pub use rest::{RestCacheBackend, RestCacheConfig};

/// A raw string key/value store with per-key expiry.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// The stored value, or `None` on a miss or any backend failure.
    async fn get(&self, key: &str) -> Option<String>;
    /// Store `value` for `ttl_seconds`. Failures are swallowed.
    async fn set(&self, key: &str, ttl_seconds: u64, value: String);
    /// Short backend name for logs and `/health`.
    fn name(&self) -> &'static str;
}

/// Backend used when no cache is configured: every read misses.
pub struct DisabledCache;

#[async_trait]
impl CacheBackend for DisabledCache {
    async fn get(&self, _key: &str) -> Option<String> {
        None
    }

    async fn set(&self, _key: &str, _ttl_seconds: u64, _value: String) {}

    fn name(&self) -> &'static str {
        "disabled"
    }
}

/// A cached value with its bookkeeping, as stored in the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub key: String,
    pub ttl_seconds: u64,
    pub value: T,
    pub fetched_at: DateTime<Utc>,
}

/// Per-call cache statistics reported alongside cached data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheMeta {
    pub cache_hit: bool,
    pub cache_key: String,
    pub cache_ttl_seconds: u64,
    pub latency_ms: u64,
}

/// Typed JSON layer over a [`CacheBackend`].
#[derive(Clone)]
pub struct CacheStore {
    backend: Arc<dyn CacheBackend>,
}

impl CacheStore {
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self { backend }
    }

    pub fn disabled() -> Self {
        Self::new(Arc::new(DisabledCache))
    }

    pub fn memory() -> Self {
        Self::new(Arc::new(MemoryCacheBackend::new()))
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Read and decode an entry. Absence and undecodable data are both a miss.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<CacheEntry<T>> {
        let raw = self.backend.get(key).await?;
        match serde_json::from_str::<CacheEntry<T>>(&raw) {
            Ok(entry) if entry.key == key => Some(entry),
            Ok(_) => {
                tracing::debug!(key, "Cache entry key mismatch; treating as miss");
                None
            }
            Err(e) => {
                tracing::debug!(key, "Undecodable cache entry; treating as miss: {e}");
                None
            }
        }
    }

    /// Encode and store an entry. Never fails.
    pub async fn set_json<T: Serialize>(&self, key: &str, ttl_seconds: u64, value: &T) {
        let entry = CacheEntry {
            key: key.to_string(),
            ttl_seconds,
            value,
            fetched_at: Utc::now(),
        };
        match serde_json::to_string(&entry) {
            Ok(raw) => self.backend.set(key, ttl_seconds, raw).await,
            Err(e) => tracing::warn!(key, "Failed to encode cache entry: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_always_misses() {
        let cache = CacheStore::disabled();
        cache.set_json("k", 10, &vec![1, 2, 3]).await;
        assert!(cache.get_json::<Vec<i32>>("k").await.is_none());
        assert_eq!(cache.backend_name(), "disabled");
    }

    #[tokio::test]
    async fn test_memory_roundtrip_keeps_metadata() {
        let cache = CacheStore::memory();
        cache.set_json("mcp:nodes:abc", 10, &vec!["a".to_string()]).await;
        let entry = cache
            .get_json::<Vec<String>>("mcp:nodes:abc")
            .await
            .expect("cached entry");
        assert_eq!(entry.key, "mcp:nodes:abc");
        assert_eq!(entry.ttl_seconds, 10);
        assert_eq!(entry.value, vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn test_wrong_shape_is_miss() {
        let cache = CacheStore::memory();
        cache.set_json("k", 10, &"a string").await;
        assert!(cache.get_json::<Vec<u32>>("k").await.is_none());
    }

    #[tokio::test]
    async fn test_garbage_is_miss() {
        let backend = Arc::new(MemoryCacheBackend::new());
        backend.set("k", 10, "{not json".to_string()).await;
        let cache = CacheStore::new(backend);
        assert!(cache.get_json::<Vec<u32>>("k").await.is_none());
    }
}
