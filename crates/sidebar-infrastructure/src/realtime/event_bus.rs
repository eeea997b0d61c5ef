use tokio::sync::broadcast;
use tracing::{debug, warn};

use sidebar_core::ports::{RealtimeEvent, RealtimePublisher};

/// In-process fan-out of realtime events; each subscriber filters by recipient.
pub struct EventBus {
    tx: broadcast::Sender<RealtimeEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RealtimeEvent> {
        self.tx.subscribe()
    }
}

impl RealtimePublisher for EventBus {
    fn publish(&self, event: RealtimeEvent) {
        let name = event.event.clone();
        match self.tx.send(event) {
            Ok(receivers) => debug!("Published {} to {} subscribers", name, receivers),
            Err(e) => warn!("Failed to publish event (maybe no subscribers): {}", e),
        }
    }
}
