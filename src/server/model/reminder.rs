//! Reminder domain models, lifecycle states and dispatch parameters.
//!
//! A reminder moves through `Pending -> Dispatching -> Sent`. The transition into
//! `Dispatching` is the claim: it is written with a conditional update before any
//! notification leaves the process, so at most one worker dispatches a reminder.
//! A reminder with failed deliveries and attempts left returns to `Pending`.

use chrono::{DateTime, Duration, Utc};
use sea_orm::DbErr;

use crate::{
    model::reminder::{
        CreateReminderDto, ReminderDestDto, ReminderDto, UpdateReminderDto,
    },
    server::model::car::Car,
};

/// Lifecycle of a reminder, stored as a lowercase string column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderStatus {
    /// Waiting to be picked up by a dispatch cycle.
    Pending,
    /// Claimed by a worker; notifications are in flight.
    Dispatching,
    /// Terminal: every destination was delivered, skipped or exhausted.
    Sent,
}

impl ReminderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Dispatching => "dispatching",
            Self::Sent => "sent",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "dispatching" => Some(Self::Dispatching),
            "sent" => Some(Self::Sent),
            _ => None,
        }
    }
}

/// Delivery state of one reminder destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Pending,
    Delivered,
    Failed,
    /// User missing or without an email address.
    Skipped,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Delivered => "delivered",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "delivered" => Some(Self::Delivered),
            "failed" => Some(Self::Failed),
            "skipped" => Some(Self::Skipped),
            _ => None,
        }
    }
}

/// One recipient of a reminder.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderDestination {
    pub id: i32,
    pub reminder_id: i32,
    pub user_id: String,
    pub status: DeliveryStatus,
    pub attempts: i32,
    pub last_error: Option<String>,
    pub delivered_at: Option<DateTime<Utc>>,
}

impl ReminderDestination {
    /// Converts an entity model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(ReminderDestination)` - The converted destination
    /// - `Err(DbErr::Type)` - Stored status is not a known delivery status
    pub fn from_entity(entity: entity::reminder_dest::Model) -> Result<Self, DbErr> {
        let status = DeliveryStatus::parse(&entity.status).ok_or_else(|| {
            DbErr::Type(format!(
                "Unknown delivery status '{}' on reminder destination {}",
                entity.status, entity.id
            ))
        })?;

        Ok(Self {
            id: entity.id,
            reminder_id: entity.reminder_id,
            user_id: entity.user_id,
            status,
            attempts: entity.attempts,
            last_error: entity.last_error,
            delivered_at: entity.delivered_at,
        })
    }

    /// Whether a dispatch cycle should still try this destination.
    ///
    /// A failed destination is retried only while it has attempts left under
    /// `max_attempts`, so lowering the limit also caps earlier failures.
    pub fn is_outstanding(&self, max_attempts: i32) -> bool {
        match self.status {
            DeliveryStatus::Pending => true,
            DeliveryStatus::Failed => self.attempts < max_attempts,
            DeliveryStatus::Delivered | DeliveryStatus::Skipped => false,
        }
    }

    pub fn into_dto(self) -> ReminderDestDto {
        ReminderDestDto {
            id: self.id,
            user_id: self.user_id,
            status: self.status.as_str().to_string(),
            attempts: self.attempts,
            last_error: self.last_error,
            delivered_at: self.delivered_at,
        }
    }
}

/// Scheduled reminder with its ordered destinations.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: i32,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Legacy free-form address. Stored and returned, never used for delivery.
    pub email: Option<String>,
    pub reminder_date: DateTime<Utc>,
    pub status: ReminderStatus,
    pub author: Option<String>,
    pub car_id: i32,
    pub broadcast_at: Option<DateTime<Utc>>,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub destinations: Vec<ReminderDestination>,
}

impl Reminder {
    /// Converts an entity model and its destination rows to a reminder domain model.
    ///
    /// # Arguments
    /// - `entity` - The reminder row
    /// - `destinations` - Destination rows belonging to the reminder, in insertion order
    ///
    /// # Returns
    /// - `Ok(Reminder)` - The converted reminder
    /// - `Err(DbErr::Type)` - A stored status string is not recognised
    pub fn from_entity(
        entity: entity::reminder::Model,
        destinations: Vec<entity::reminder_dest::Model>,
    ) -> Result<Self, DbErr> {
        let status = ReminderStatus::parse(&entity.status).ok_or_else(|| {
            DbErr::Type(format!(
                "Unknown reminder status '{}' on reminder {}",
                entity.status, entity.id
            ))
        })?;

        let destinations = destinations
            .into_iter()
            .map(ReminderDestination::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: entity.id,
            title: entity.title,
            description: entity.description,
            email: entity.email,
            reminder_date: entity.reminder_date,
            status,
            author: entity.author,
            car_id: entity.car_id,
            broadcast_at: entity.broadcast_at,
            sent_at: entity.sent_at,
            created_at: entity.created_at,
            destinations,
        })
    }

    pub fn into_dto(self) -> ReminderDto {
        ReminderDto {
            id: self.id,
            title: self.title,
            description: self.description,
            email: self.email,
            reminder_date: self.reminder_date,
            status: self.status.as_str().to_string(),
            author: self.author,
            car_id: self.car_id,
            broadcast_at: self.broadcast_at,
            sent_at: self.sent_at,
            created_at: self.created_at,
            destinations: self
                .destinations
                .into_iter()
                .map(ReminderDestination::into_dto)
                .collect(),
        }
    }
}

/// Reminder selected by a dispatch cycle, with its car loaded eagerly.
#[derive(Debug, Clone, PartialEq)]
pub struct DueReminder {
    pub reminder: Reminder,
    /// `None` only if the car row vanished between selection and loading.
    pub car: Option<Car>,
}

/// Time window around `now` in which pending reminders are due.
///
/// Both bounds are inclusive: a reminder is due when
/// `now - past <= reminder_date <= now + future`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueWindow {
    pub past: Duration,
    pub future: Duration,
}

impl DueWindow {
    /// Inclusive `(start, end)` bounds relative to `now`.
    pub fn bounds(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        (now - self.past, now + self.future)
    }
}

impl Default for DueWindow {
    fn default() -> Self {
        Self {
            past: Duration::days(5),
            future: Duration::days(2),
        }
    }
}

/// Knobs for one dispatcher instance.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchSettings {
    pub window: DueWindow,
    /// Send attempts per destination before it is given up on.
    pub max_attempts: i32,
    /// Prepended to every email subject as `"{prefix}: {title}"`.
    pub subject_prefix: String,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            window: DueWindow::default(),
            max_attempts: 3,
            subject_prefix: "Fleet Reminder".to_string(),
        }
    }
}

/// Parameters for creating a reminder.
#[derive(Debug, Clone)]
pub struct CreateReminderParams {
    pub title: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub reminder_date: DateTime<Utc>,
    pub author: Option<String>,
    pub car_id: i32,
    /// Distinct user ids, in request order.
    pub recipients: Vec<String>,
}

impl CreateReminderParams {
    pub fn from_dto(dto: CreateReminderDto) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
            email: dto.email,
            reminder_date: dto.reminder_date,
            author: dto.author,
            car_id: dto.car_id,
            recipients: distinct_recipients(dto.recipients),
        }
    }
}

/// Parameters for replacing a reminder's fields.
#[derive(Debug, Clone)]
pub struct UpdateReminderParams {
    pub id: i32,
    pub title: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub reminder_date: DateTime<Utc>,
    pub author: Option<String>,
    pub car_id: i32,
    /// Replacement destination list; `None` keeps the current destinations.
    pub recipients: Option<Vec<String>>,
}

impl UpdateReminderParams {
    pub fn from_dto(id: i32, dto: UpdateReminderDto) -> Self {
        Self {
            id,
            title: dto.title,
            description: dto.description,
            email: dto.email,
            reminder_date: dto.reminder_date,
            author: dto.author,
            car_id: dto.car_id,
            recipients: dto.recipients.map(distinct_recipients),
        }
    }
}

/// Trims ids, drops blanks and keeps the first occurrence of each id.
pub fn distinct_recipients(recipients: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    recipients
        .into_iter()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty() && seen.insert(id.clone()))
        .collect()
}
