//! Domain events for the application.
//!
//! This module contains event types pushed to connected real-time clients
//! after successful mutations, plus the broadcaster they travel over.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::api::types::IpoDto;

/// Events sent to connected clients over the WebSocket channel.
///
/// Serialized shape: `{"type": "IPO_CREATED", "data": {...}}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationEvent {
    IpoCreated(IpoDto),
    IpoUpdated(IpoDto),
    IpoDeleted {
        id: String,
    },
    /// Greeting sent once to a newly attached connection; never broadcast.
    Connected {
        message: String,
    },
}

/// Registry of open real-time connections.
///
/// Wraps a `tokio::sync::broadcast` channel: subscribing registers a
/// connection, dropping the receiver deregisters it. Delivery is
/// best-effort and at-most-once; a receiver that lags past the buffer
/// skips the missed events, and publishing with no receivers is not an
/// error. Cloning is cheap and every clone feeds the same set of
/// subscribers.
#[derive(Clone, Debug)]
pub struct Broadcaster {
    tx: broadcast::Sender<NotificationEvent>,
}

impl Broadcaster {
    #[must_use]
    pub fn new(buffer: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer);
        Self { tx }
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.tx.subscribe()
    }

    /// Publishes an event to every currently open subscriber.
    ///
    /// Returns the number of subscribers the event was handed to. Zero
    /// subscribers is a normal outcome, not a failure.
    pub fn publish(&self, event: NotificationEvent) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_without_subscribers_is_ok() {
        let bus = Broadcaster::new(8);
        let delivered = bus.publish(NotificationEvent::IpoDeleted {
            id: "x".to_string(),
        });
        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn events_reach_every_subscriber() {
        let bus = Broadcaster::new(8);
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        let delivered = bus.publish(NotificationEvent::IpoDeleted {
            id: "gone".to_string(),
        });
        assert_eq!(delivered, 2);

        for rx in [&mut a, &mut b] {
            match rx.recv().await.unwrap() {
                NotificationEvent::IpoDeleted { id } => assert_eq!(id, "gone"),
                other => panic!("unexpected event: {other:?}"),
            }
        }
    }

    #[test]
    fn event_wire_shape() {
        let json = serde_json::to_value(NotificationEvent::IpoDeleted {
            id: "abc".to_string(),
        })
        .unwrap();
        assert_eq!(json["type"], "IPO_DELETED");
        assert_eq!(json["data"]["id"], "abc");

        let json = serde_json::to_value(NotificationEvent::Connected {
            message: "hi".to_string(),
        })
        .unwrap();
        assert_eq!(json["type"], "CONNECTED");
    }
}
