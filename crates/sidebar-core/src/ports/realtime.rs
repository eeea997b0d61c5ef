//! Realtime broadcast port

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "users", rename_all = "snake_case")]
pub enum Recipients {
    All,
    Users(Vec<String>),
}

impl Recipients {
    pub fn includes(&self, user: &str) -> bool {
        match self {
            Recipients::All => true,
            Recipients::Users(users) => users.iter().any(|u| u == user),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RealtimeEvent {
    pub event: String,
    pub payload: serde_json::Value,
    pub recipients: Recipients,
}

impl RealtimeEvent {
    pub fn new(event: &str, payload: serde_json::Value, recipients: Recipients) -> Self {
        Self {
            event: event.to_string(),
            payload,
            recipients,
        }
    }
}

/// Fire-and-forget delivery; no acknowledgement is expected.
pub trait RealtimePublisher: Send + Sync {
    fn publish(&self, event: RealtimeEvent);
}
