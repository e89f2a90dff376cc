use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use tokio::sync::broadcast::{self, error::RecvError};

use crate::{model::notification::NotificationEnvelopeDto, server::state::AppState};

/// Tag for grouping notification endpoints in OpenAPI documentation
pub static NOTIFICATION_TAG: &str = "notification";

/// Subscribe to realtime notifications over a WebSocket.
///
/// Every hub event is forwarded as a JSON text frame
/// `{ "event": "ReceiveNotifications", "payload": { ... } }`. Clients that fall
/// behind skip the events they missed.
#[utoipa::path(
    get,
    path = "/api/notifications/ws",
    tag = NOTIFICATION_TAG,
    responses(
        (status = 101, description = "Switching protocols to WebSocket")
    ),
)]
pub async fn notifications_ws(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let receiver = state.hub.subscribe();

    ws.on_upgrade(move |socket| forward_notifications(socket, receiver))
}

async fn forward_notifications(
    mut socket: WebSocket,
    mut receiver: broadcast::Receiver<NotificationEnvelopeDto>,
) {
    loop {
        tokio::select! {
            event = receiver.recv() => match event {
                Ok(envelope) => {
                    let text = match serde_json::to_string(&envelope) {
                        Ok(text) => text,
                        Err(e) => {
                            tracing::error!("Failed to encode notification: {}", e);
                            continue;
                        }
                    };

                    if socket.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Notification subscriber lagged, skipped {} event(s)", skipped);
                }
                Err(RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }
}
