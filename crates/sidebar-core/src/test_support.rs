//! In-process fakes for the cache and realtime ports

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::DomainError;
use crate::ports::{CacheStore, RealtimeEvent, RealtimePublisher};

#[derive(Default)]
pub struct FakeCache {
    entries: Mutex<HashMap<String, String>>,
    pub fail: bool,
}

impl FakeCache {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }

    pub fn put(&self, key: &str, value: &str) {
        self.entries.lock().unwrap().insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl CacheStore for FakeCache {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        if self.fail {
            return Err(DomainError::CacheError("unavailable".into()));
        }
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: String, _ttl: Option<Duration>) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::CacheError("unavailable".into()));
        }
        self.entries.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<RealtimeEvent>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<RealtimeEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl RealtimePublisher for RecordingPublisher {
    fn publish(&self, event: RealtimeEvent) {
        self.events.lock().unwrap().push(event);
    }
}
