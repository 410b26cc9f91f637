//! Server-Sent Events (SSE) utilities
//!
//! Turns an inference event stream into an axum SSE response.

use crate::events::InferenceEvent;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{Stream, StreamExt};
use std::convert::Infallible;
use std::time::Duration;
use tracing::{debug, warn};

/// Convert one inference event into an SSE frame
///
/// The SSE event name is [`InferenceEvent::event_type`]; the data is the JSON
/// wire form of the event.
pub fn to_sse_event(event: &InferenceEvent) -> Option<Event> {
    match serde_json::to_string(event) {
        Ok(json) => Some(Event::default().event(event.event_type()).data(json)),
        Err(e) => {
            warn!("SSE: Failed to serialize event {}: {}", event.event_type(), e);
            None
        }
    }
}

/// Create an SSE response forwarding every inference event
///
/// The response ends when the inner stream ends (after the final result).
///
/// # Example
/// ```rust,ignore
/// let events = orchestrator.infer_stream(url);
/// geoprov_common::sse::inference_sse_stream(events)
/// ```
pub fn inference_sse_stream<S>(events: S) -> Sse<impl Stream<Item = Result<Event, Infallible>>>
where
    S: Stream<Item = InferenceEvent> + Send + 'static,
{
    let stream = async_stream::stream! {
        let mut events = Box::pin(events);
        while let Some(event) = events.next().await {
            debug!("SSE: Forwarding {} from {}", event.event_type(), event.signal);
            if let Some(frame) = to_sse_event(&event) {
                yield Ok(frame);
            }
        }
        debug!("SSE: Inference stream finished");
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("heartbeat"),
    )
}
