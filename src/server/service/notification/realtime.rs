use tokio::sync::broadcast;

use crate::{model::notification::NotificationEnvelopeDto, server::service::notification::Broadcaster};

const HUB_CAPACITY: usize = 64;

/// In-process fan-out of realtime events to WebSocket subscribers.
///
/// Cloning the hub shares the same channel. Subscribers that fall more than the
/// channel capacity behind skip the events they missed.
#[derive(Clone)]
pub struct NotificationHub {
    sender: broadcast::Sender<NotificationEnvelopeDto>,
}

impl NotificationHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(HUB_CAPACITY);
        Self { sender }
    }

    /// Registers a new subscriber that sees every event published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEnvelopeDto> {
        self.sender.subscribe()
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}

impl Broadcaster for NotificationHub {
    fn broadcast(&self, event: &str, payload: serde_json::Value) -> usize {
        let envelope = NotificationEnvelopeDto {
            event: event.to_string(),
            payload,
        };

        // Err only means nobody is listening.
        self.sender.send(envelope).unwrap_or(0)
    }
}
