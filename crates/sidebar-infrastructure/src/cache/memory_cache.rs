//! Process-local cache with lazy expiry

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::{debug, info};

use sidebar_core::error::DomainError;
use sidebar_core::ports::CacheStore;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }
}

/// Thread-safe in-memory cache. Expired entries are dropped when read.
#[derive(Clone, Default)]
pub struct MemoryCache {
    storage: Arc<DashMap<String, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        info!("Initializing in-memory sidebar cache");
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Returns number of entries removed
    pub fn cleanup_expired(&self) -> usize {
        let start_len = self.storage.len();
        self.storage.retain(|_, entry| !entry.is_expired());
        let count = start_len.saturating_sub(self.storage.len());
        if count > 0 {
            debug!("Cleaned up {} expired cache entries", count);
        }
        count
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let Some(entry) = self.storage.get(key) else {
            return Ok(None);
        };
        if entry.is_expired() {
            drop(entry); // Release read lock
            self.storage.remove(key);
            debug!("Cache entry {} expired", key);
            return Ok(None);
        }
        Ok(Some(entry.value.clone()))
    }

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<(), DomainError> {
        let expires_at = ttl.map(|ttl| Instant::now() + ttl);
        self.storage.insert(key.to_string(), Entry { value, expires_at });
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        self.storage.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_basic_operations() {
        let cache = MemoryCache::new();
        cache.set("role_sidebar_HR User", "{}".into(), None).await.unwrap();
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("role_sidebar_HR User").await.unwrap().as_deref(), Some("{}"));

        cache.delete("role_sidebar_HR User").await.unwrap();
        assert!(cache.is_empty());
        assert!(cache.get("role_sidebar_HR User").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let cache = MemoryCache::new();
        cache
            .set("short", "1".into(), Some(Duration::from_millis(10)))
            .await
            .unwrap();
        cache
            .set("long", "2".into(), Some(Duration::from_secs(3600)))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;

        assert!(cache.get("short").await.unwrap().is_none());
        assert_eq!(cache.get("long").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_cleanup_expired() {
        let cache = MemoryCache::new();
        cache.set("a", "1".into(), Some(Duration::ZERO)).await.unwrap();
        cache.set("b", "2".into(), None).await.unwrap();
        assert_eq!(cache.cleanup_expired(), 1);
        assert_eq!(cache.len(), 1);
    }
}
