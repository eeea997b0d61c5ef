//! Redis-backed cache shared across server instances

use std::time::Duration;

use async_trait::async_trait;
use deadpool_redis::redis::AsyncCommands;
use deadpool_redis::{Config, Connection, Pool, PoolConfig, Runtime};
use tracing::{error, info};

use sidebar_core::error::DomainError;
use sidebar_core::ports::CacheStore;
use sidebar_shared::config::RedisSettings;

pub struct RedisCache {
    pool: Pool,
}

impl RedisCache {
    pub fn new(settings: &RedisSettings) -> Result<Self, DomainError> {
        let mut config = Config::from_url(settings.url.clone());
        config.pool = Some(PoolConfig::new(settings.max_connections as usize));
        let pool = config
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| DomainError::CacheError(format!("Failed to create Redis pool: {}", e)))?;
        info!("Redis cache pool created for {}", settings.url);
        Ok(Self { pool })
    }

    async fn conn(&self) -> Result<Connection, DomainError> {
        self.pool.get().await.map_err(|e| {
            error!("Redis pool error: {}", e);
            DomainError::CacheError(e.to_string())
        })
    }
}

fn redis_err(op: &str, key: &str, e: deadpool_redis::redis::RedisError) -> DomainError {
    error!("Redis {} failed for {}: {}", op, key, e);
    DomainError::CacheError(e.to_string())
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let mut conn = self.conn().await?;
        conn.get::<_, Option<String>>(key)
            .await
            .map_err(|e| redis_err("GET", key, e))
    }

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<(), DomainError> {
        let mut conn = self.conn().await?;
        match ttl {
            Some(ttl) => conn
                .set_ex::<_, _, ()>(key, value, ttl.as_secs().max(1))
                .await
                .map_err(|e| redis_err("SETEX", key, e)),
            None => conn
                .set::<_, _, ()>(key, value)
                .await
                .map_err(|e| redis_err("SET", key, e)),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        let mut conn = self.conn().await?;
        conn.del::<_, ()>(key)
            .await
            .map_err(|e| redis_err("DEL", key, e))
    }
}
