use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct ReminderDto {
    pub id: i32,
    pub title: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub reminder_date: DateTime<Utc>,
    /// One of `pending`, `dispatching`, `sent`.
    pub status: String,
    pub author: Option<String>,
    pub car_id: i32,
    pub broadcast_at: Option<DateTime<Utc>>,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub destinations: Vec<ReminderDestDto>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct ReminderDestDto {
    pub id: i32,
    pub user_id: String,
    /// One of `pending`, `delivered`, `failed`, `skipped`.
    pub status: String,
    pub attempts: i32,
    pub last_error: Option<String>,
    pub delivered_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct CreateReminderDto {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub reminder_date: DateTime<Utc>,
    #[serde(default)]
    pub author: Option<String>,
    pub car_id: i32,
    /// User ids to notify. Duplicates are ignored.
    #[serde(default)]
    pub recipients: Vec<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct UpdateReminderDto {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub reminder_date: DateTime<Utc>,
    #[serde(default)]
    pub author: Option<String>,
    pub car_id: i32,
    /// Replaces the destination list when present.
    #[serde(default)]
    pub recipients: Option<Vec<String>>,
}
