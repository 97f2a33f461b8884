//! Event bus for ionsnav using tokio::broadcast
//!
//! Publishes menu and asset reloads to the server's SSE endpoint.

use serde_json::{json, Value};
use tokio::sync::broadcast;

/// Events emitted by the menu store and watcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// Menu file re-read; carries the new top-level item count
    MenuReloaded { items: usize },
    /// Stylesheet or logo changed on disk
    AssetsChanged,
    /// Initial load completed
    LoadCompleted,
    /// Watcher encountered an error
    WatcherError(String),
}

impl NavEvent {
    /// SSE event name
    pub fn event_type(&self) -> &'static str {
        match self {
            NavEvent::MenuReloaded { .. } => "menu_reloaded",
            NavEvent::AssetsChanged => "assets_changed",
            NavEvent::LoadCompleted => "load_completed",
            NavEvent::WatcherError(_) => "watcher_error",
        }
    }

    /// JSON payload sent with the event
    pub fn payload(&self) -> Value {
        match self {
            NavEvent::MenuReloaded { items } => json!({ "items": items }),
            NavEvent::WatcherError(message) => json!({ "message": message }),
            NavEvent::AssetsChanged | NavEvent::LoadCompleted => json!({}),
        }
    }
}

/// Event bus for broadcasting nav events
///
/// Uses tokio::broadcast for multi-consumer support; every SSE
/// connection holds its own receiver.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<NavEvent>,
}

impl EventBus {
    /// Create a new event bus with specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create with default capacity (64 events)
    pub fn default_capacity() -> Self {
        Self::new(64)
    }

    /// Publish an event to all subscribers
    pub fn publish(&self, event: NavEvent) {
        // No subscribers is fine
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NavEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::default_capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_bus_publish_subscribe() {
        let bus = EventBus::default_capacity();
        let mut rx = bus.subscribe();

        bus.publish(NavEvent::MenuReloaded { items: 4 });
        bus.publish(NavEvent::AssetsChanged);

        assert_eq!(rx.recv().await.unwrap(), NavEvent::MenuReloaded { items: 4 });
        assert_eq!(rx.recv().await.unwrap(), NavEvent::AssetsChanged);
    }

    #[tokio::test]
    async fn test_event_bus_multiple_subscribers() {
        let bus = EventBus::default_capacity();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(NavEvent::LoadCompleted);

        assert_eq!(rx1.recv().await.unwrap(), NavEvent::LoadCompleted);
        assert_eq!(rx2.recv().await.unwrap(), NavEvent::LoadCompleted);
    }

    #[test]
    fn test_event_bus_no_subscribers_ok() {
        EventBus::default_capacity().publish(NavEvent::AssetsChanged);
    }

    #[test]
    fn test_payload_escapes_message() {
        let event = NavEvent::WatcherError("bad \"path\"".to_string());
        assert_eq!(event.event_type(), "watcher_error");
        assert_eq!(
            event.payload().to_string(),
            r#"{"message":"bad \"path\""}"#
        );
    }
}
