//! Key/value cache port

use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::error::DomainError;

#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;
    /// `ttl = None` keeps the entry until it is deleted.
    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<(), DomainError>;
    async fn delete(&self, key: &str) -> Result<(), DomainError>;
}

/// Reads and decodes a cached value. Any failure counts as a miss.
pub async fn get_json<T: DeserializeOwned>(cache: &dyn CacheStore, key: &str) -> Option<T> {
    let raw = match cache.get(key).await {
        Ok(raw) => raw?,
        Err(e) => {
            warn!("Cache read failed for {}: {}", key, e);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Discarding undecodable cache entry {}: {}", key, e);
            None
        }
    }
}

/// Encodes and stores a value. Failures are logged; the caller keeps going.
pub async fn set_json<T: Serialize + ?Sized>(
    cache: &dyn CacheStore,
    key: &str,
    value: &T,
    ttl: Option<Duration>,
) {
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Failed to encode cache entry {}: {}", key, e);
            return;
        }
    };
    if let Err(e) = cache.set(key, raw, ttl).await {
        warn!("Cache write failed for {}: {}", key, e);
    }
}

pub async fn invalidate(cache: &dyn CacheStore, key: &str) {
    if let Err(e) = cache.delete(key).await {
        warn!("Cache invalidation failed for {}: {}", key, e);
    }
}
