//! Server-sent stream of realtime events addressed to the caller

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use sidebar_infrastructure::EventBus;

use crate::extract::CurrentUser;

/// GET /api/v1/events
pub async fn event_stream(
    State(bus): State<Arc<EventBus>>,
    CurrentUser(caller): CurrentUser,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("Realtime stream opened for {}", caller.user);
    let mut rx = bus.subscribe();
    let user = caller.user;

    let stream = async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if event.recipients.includes(&user) {
                        yield Ok(create_sse_event(&event.event, &event.payload));
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Realtime stream for {} lagged, skipped {} events", user, skipped);
                }
                Err(RecvError::Closed) => {
                    debug!("Event bus closed, ending stream for {}", user);
                    break;
                }
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}

fn create_sse_event<T: serde::Serialize>(event_type: &str, data: &T) -> Event {
    Event::default()
        .event(event_type)
        .data(serde_json::to_string(data).unwrap_or_else(|_| "{}".to_string()))
}
