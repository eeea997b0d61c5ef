//! Cache and realtime ports consumed by the services

pub mod cache;
pub mod realtime;

pub use cache::CacheStore;
pub use realtime::{RealtimeEvent, RealtimePublisher, Recipients};
