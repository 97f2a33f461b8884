//! Server-Sent Events for live reload

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use ionsnav_core::{EventBus, NavEvent};
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// Create an SSE stream from the event bus
///
/// Takes the bus by value (cheap clone, the sender is shared).
///
/// Lagged receivers skip the events they missed; the next event still
/// triggers a reload on the client.
pub fn create_sse_stream(
    event_bus: EventBus,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(event_bus.subscribe());

    let sse_stream = stream.filter_map(|result: Result<NavEvent, _>| {
        result.ok().map(|event| Ok(to_sse_event(&event)))
    });

    Sse::new(sse_stream).keep_alive(KeepAlive::default())
}

fn to_sse_event(event: &NavEvent) -> Event {
    Event::default()
        .event(event.event_type())
        .data(event.payload().to_string())
}

