//! Reminder factory for creating test reminder and destination entities.
//!
//! Status columns are written as their stored string values (`"pending"`, `"sent"`, ...).

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test reminders with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::reminder::ReminderFactory;
///
/// let reminder = ReminderFactory::new(&db, car.id)
///     .title(None)
///     .reminder_date(Utc::now() - Duration::days(1))
///     .build()
///     .await?;
/// ```
pub struct ReminderFactory<'a> {
    db: &'a DatabaseConnection,
    car_id: i32,
    title: Option<String>,
    description: Option<String>,
    reminder_date: DateTime<Utc>,
    status: String,
    broadcast_at: Option<DateTime<Utc>>,
}

impl<'a> ReminderFactory<'a> {
    /// Creates a new ReminderFactory with default values.
    ///
    /// Defaults:
    /// - title: `Some("Reminder {id}")`
    /// - description: `Some("Test reminder description")`
    /// - reminder_date: now
    /// - status: `"pending"`
    pub fn new(db: &'a DatabaseConnection, car_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            car_id,
            title: Some(format!("Reminder {}", id)),
            description: Some("Test reminder description".to_string()),
            reminder_date: Utc::now(),
            status: "pending".to_string(),
            broadcast_at: None,
        }
    }

    pub fn title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn reminder_date(mut self, reminder_date: DateTime<Utc>) -> Self {
        self.reminder_date = reminder_date;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn broadcast_at(mut self, broadcast_at: Option<DateTime<Utc>>) -> Self {
        self.broadcast_at = broadcast_at;
        self
    }

    /// Builds and inserts the reminder entity into the database.
    pub async fn build(self) -> Result<entity::reminder::Model, DbErr> {
        entity::reminder::ActiveModel {
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set(self.description),
            email: ActiveValue::Set(None),
            reminder_date: ActiveValue::Set(self.reminder_date),
            status: ActiveValue::Set(self.status),
            author: ActiveValue::Set(None),
            car_id: ActiveValue::Set(self.car_id),
            broadcast_at: ActiveValue::Set(self.broadcast_at),
            sent_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending reminder due now for the given car.
pub async fn create_reminder(
    db: &DatabaseConnection,
    car_id: i32,
) -> Result<entity::reminder::Model, DbErr> {
    ReminderFactory::new(db, car_id).build().await
}

/// Creates a pending destination for the given reminder and user.
pub async fn create_reminder_dest(
    db: &DatabaseConnection,
    reminder_id: i32,
    user_id: &str,
) -> Result<entity::reminder_dest::Model, DbErr> {
    create_reminder_dest_with_status(db, reminder_id, user_id, "pending", 0).await
}

/// Creates a destination with an explicit delivery status and attempt count.
pub async fn create_reminder_dest_with_status(
    db: &DatabaseConnection,
    reminder_id: i32,
    user_id: &str,
    status: &str,
    attempts: i32,
) -> Result<entity::reminder_dest::Model, DbErr> {
    entity::reminder_dest::ActiveModel {
        reminder_id: ActiveValue::Set(reminder_id),
        user_id: ActiveValue::Set(user_id.to_string()),
        status: ActiveValue::Set(status.to_string()),
        attempts: ActiveValue::Set(attempts),
        last_error: ActiveValue::Set(None),
        delivered_at: ActiveValue::Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}
