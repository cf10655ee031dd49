//! The real-time notification channel.
//!
//! A single upgrade endpoint fans every [`NotificationEvent`] out to all
//! open connections as JSON text frames. Delivery is best-effort and
//! at-most-once: there is no replay for late subscribers, a lagged
//! connection skips the events it missed, and a connection that is gone at
//! publish time is simply not delivered to. The channel itself is not
//! authenticated; events carry nothing beyond what the public list
//! endpoint already serves.

use axum::{
    Router,
    extract::State,
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    response::IntoResponse,
    routing::get,
};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::api::AppState;
use crate::domain::{Broadcaster, NotificationEvent};

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/ws", get(ws_handler))
}

async fn ws_handler(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let broadcaster = state.broadcaster().clone();
    ws.on_upgrade(move |socket| handle_socket(socket, broadcaster))
}

async fn handle_socket(mut socket: WebSocket, broadcaster: Broadcaster) {
    debug!("WebSocket connection established");

    // Subscribe before the greeting so events published in between are not
    // lost to this connection.
    let mut rx = broadcaster.subscribe();

    let greeting = NotificationEvent::Connected {
        message: "Connected to the IPO listings feed".to_string(),
    };
    if let Ok(json) = serde_json::to_string(&greeting)
        && socket.send(Message::Text(json.into())).await.is_err()
    {
        return;
    }

    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Ok(event) => {
                    let json = serde_json::to_string(&event).unwrap_or_default();
                    if socket.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    warn!("Client lagged by {} messages", count);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            // The channel is broadcast-only; inbound frames are drained so
            // close/error from the client tears the task down.
            msg = socket.recv() => match msg {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }

    debug!("WebSocket connection closed");
}
