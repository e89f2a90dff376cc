//! Realtime notification payloads.
//!
//! These are flat projections built for the wire. They never embed entity graphs,
//! so serializing them cannot cycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Event name clients subscribe to for reminder notifications.
pub const REMINDER_NOTIFICATION_EVENT: &str = "ReceiveNotifications";

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct CarSummaryDto {
    pub id: i32,
    pub brand: Option<String>,
    pub model: String,
    pub plate: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct ReminderNotificationDto {
    pub id: i32,
    pub title: Option<String>,
    pub description: Option<String>,
    pub reminder_date: DateTime<Utc>,
    pub car: Option<CarSummaryDto>,
    pub recipients: Vec<String>,
}

/// Envelope written to every WebSocket subscriber.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct NotificationEnvelopeDto {
    pub event: String,
    pub payload: serde_json::Value,
}
