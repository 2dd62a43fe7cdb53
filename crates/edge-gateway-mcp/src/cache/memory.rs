//! In-process TTL backend.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;

use super::CacheBackend;

/// Expiring key/value map held in process memory.
#[derive(Default)]
pub struct MemoryCacheBackend {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl MemoryCacheBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        let entries = self.entries.lock().await;
        entries.values().filter(|(_, expires)| *expires > now).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CacheBackend for MemoryCacheBackend {
    async fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock().await;
        let (value, expires) = entries.get(key)?;
        if *expires > Instant::now() {
            return Some(value.clone());
        }
        entries.remove(key);
        None
    }

    async fn set(&self, key: &str, ttl_seconds: u64, value: String) {
        let expires = Instant::now() + Duration::from_secs(ttl_seconds);
        let mut entries = self.entries.lock().await;
        entries.retain(|_, (_, exp)| *exp > Instant::now());
        entries.insert(key.to_string(), (value, expires));
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let backend = MemoryCacheBackend::new();
        backend.set("k", 10, "v".to_string()).await;

        tokio::time::advance(Duration::from_secs(9)).await;
        assert_eq!(backend.get("k").await.as_deref(), Some("v"));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(backend.get("k").await, None);
        assert!(backend.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overwrite_resets_ttl() {
        let backend = MemoryCacheBackend::new();
        backend.set("k", 5, "old".to_string()).await;
        tokio::time::advance(Duration::from_secs(4)).await;
        backend.set("k", 5, "new".to_string()).await;
        tokio::time::advance(Duration::from_secs(4)).await;
        assert_eq!(backend.get("k").await.as_deref(), Some("new"));
        assert_eq!(backend.len().await, 1);
    }

    #[tokio::test]
    async fn test_zero_ttl_never_hits() {
        let backend = MemoryCacheBackend::new();
        backend.set("k", 0, "v".to_string()).await;
        assert_eq!(backend.get("k").await, None);
    }
}
