//! Reminder data repository for database operations.
//!
//! Besides CRUD, this repository owns every status transition the dispatch loop
//! performs. The claim is a conditional update so concurrent workers cannot both
//! win the same reminder.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use std::collections::HashMap;

use crate::server::{
    data::car::CarRepository,
    model::reminder::{
        CreateReminderParams, DeliveryStatus, DueReminder, DueWindow, Reminder, ReminderStatus,
        UpdateReminderParams,
    },
};

/// Repository providing database operations for reminders and their destinations.
pub struct ReminderRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReminderRepository<'a> {
    /// Creates a new ReminderRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a pending reminder together with one pending destination per recipient.
    ///
    /// Runs in a transaction so a reminder is never visible without its destinations.
    ///
    /// # Arguments
    /// - `params` - Reminder fields and distinct recipient ids
    ///
    /// # Returns
    /// - `Ok(Reminder)` - The created reminder with its destinations
    /// - `Err(DbErr)` - Database error, including a foreign key failure for an unknown car
    pub async fn create(&self, params: CreateReminderParams) -> Result<Reminder, DbErr> {
        let txn = self.db.begin().await?;

        let reminder = entity::reminder::ActiveModel {
            title: ActiveValue::Set(params.title),
            description: ActiveValue::Set(params.description),
            email: ActiveValue::Set(params.email),
            reminder_date: ActiveValue::Set(params.reminder_date),
            status: ActiveValue::Set(ReminderStatus::Pending.as_str().to_string()),
            author: ActiveValue::Set(params.author),
            car_id: ActiveValue::Set(params.car_id),
            broadcast_at: ActiveValue::Set(None),
            sent_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let destinations = insert_destinations(&txn, reminder.id, &params.recipients).await?;

        txn.commit().await?;

        Reminder::from_entity(reminder, destinations)
    }

    /// Gets a reminder by id with its destinations.
    ///
    /// # Returns
    /// - `Ok(Some(Reminder))` - Reminder found
    /// - `Ok(None)` - No reminder with this id
    /// - `Err(DbErr)` - Database error
    pub async fn get_by_id(&self, id: i32) -> Result<Option<Reminder>, DbErr> {
        let Some(reminder) = entity::prelude::Reminder::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut reminders = self.attach_destinations(vec![reminder]).await?;

        Ok(reminders.pop())
    }

    /// Gets all reminders, newest due date first.
    pub async fn get_all(&self) -> Result<Vec<Reminder>, DbErr> {
        let reminders = entity::prelude::Reminder::find()
            .order_by_desc(entity::reminder::Column::ReminderDate)
            .order_by_desc(entity::reminder::Column::Id)
            .all(self.db)
            .await?;

        self.attach_destinations(reminders).await
    }

    /// Gets the reminders of one car, newest due date first.
    pub async fn get_by_car(&self, car_id: i32) -> Result<Vec<Reminder>, DbErr> {
        let reminders = entity::prelude::Reminder::find()
            .filter(entity::reminder::Column::CarId.eq(car_id))
            .order_by_desc(entity::reminder::Column::ReminderDate)
            .order_by_desc(entity::reminder::Column::Id)
            .all(self.db)
            .await?;

        self.attach_destinations(reminders).await
    }

    /// Replaces a reminder's fields.
    ///
    /// A changed `reminder_date` reschedules the reminder: status returns to pending,
    /// `broadcast_at` and `sent_at` are cleared, and kept destinations are reset to
    /// pending with no attempts. A `recipients` list replaces the destinations outright.
    ///
    /// # Returns
    /// - `Ok(Some(Reminder))` - The updated reminder
    /// - `Ok(None)` - No reminder with this id
    /// - `Err(DbErr)` - Database error
    pub async fn update(&self, params: UpdateReminderParams) -> Result<Option<Reminder>, DbErr> {
        let txn = self.db.begin().await?;

        let Some(existing) = entity::prelude::Reminder::find_by_id(params.id)
            .one(&txn)
            .await?
        else {
            return Ok(None);
        };

        let rescheduled = existing.reminder_date != params.reminder_date;

        let mut active: entity::reminder::ActiveModel = existing.into();
        active.title = ActiveValue::Set(params.title);
        active.description = ActiveValue::Set(params.description);
        active.email = ActiveValue::Set(params.email);
        active.reminder_date = ActiveValue::Set(params.reminder_date);
        active.author = ActiveValue::Set(params.author);
        active.car_id = ActiveValue::Set(params.car_id);

        if rescheduled {
            active.status = ActiveValue::Set(ReminderStatus::Pending.as_str().to_string());
            active.broadcast_at = ActiveValue::Set(None);
            active.sent_at = ActiveValue::Set(None);
        }

        active.update(&txn).await?;

        if let Some(recipients) = params.recipients {
            entity::prelude::ReminderDest::delete_many()
                .filter(entity::reminder_dest::Column::ReminderId.eq(params.id))
                .exec(&txn)
                .await?;

            insert_destinations(&txn, params.id, &recipients).await?;
        } else if rescheduled {
            entity::prelude::ReminderDest::update_many()
                .col_expr(
                    entity::reminder_dest::Column::Status,
                    Expr::value(DeliveryStatus::Pending.as_str()),
                )
                .col_expr(entity::reminder_dest::Column::Attempts, Expr::value(0))
                .col_expr(
                    entity::reminder_dest::Column::LastError,
                    Expr::value(Option::<String>::None),
                )
                .col_expr(
                    entity::reminder_dest::Column::DeliveredAt,
                    Expr::value(Option::<DateTime<Utc>>::None),
                )
                .filter(entity::reminder_dest::Column::ReminderId.eq(params.id))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;

        self.get_by_id(params.id).await
    }

    /// Deletes a reminder; its destinations cascade.
    ///
    /// # Returns
    /// - `Ok(true)` - Reminder deleted
    /// - `Ok(false)` - No reminder with this id
    /// - `Err(DbErr)` - Database error
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        entity::prelude::ReminderDest::delete_many()
            .filter(entity::reminder_dest::Column::ReminderId.eq(id))
            .exec(&txn)
            .await?;

        let result = entity::prelude::Reminder::delete_by_id(id)
            .exec(&txn)
            .await?;

        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }

    /// Selects pending reminders due inside `window` around `now`.
    ///
    /// Both window bounds are inclusive. Destinations and the car are loaded eagerly
    /// so the dispatcher needs no further reads per reminder. Ordered by due date.
    ///
    /// # Arguments
    /// - `now` - Reference instant of the dispatch cycle
    /// - `window` - How far back and ahead of `now` reminders count as due
    ///
    /// # Returns
    /// - `Ok(Vec<DueReminder>)` - Due reminders, oldest due date first
    /// - `Err(DbErr)` - Database error
    pub async fn get_due(
        &self,
        now: DateTime<Utc>,
        window: &DueWindow,
    ) -> Result<Vec<DueReminder>, DbErr> {
        let (start, end) = window.bounds(now);

        let reminders = entity::prelude::Reminder::find()
            .filter(entity::reminder::Column::Status.eq(ReminderStatus::Pending.as_str()))
            .filter(entity::reminder::Column::ReminderDate.gte(start))
            .filter(entity::reminder::Column::ReminderDate.lte(end))
            .order_by_asc(entity::reminder::Column::ReminderDate)
            .order_by_asc(entity::reminder::Column::Id)
            .all(self.db)
            .await?;

        let reminders = self.attach_destinations(reminders).await?;

        let mut car_ids: Vec<i32> = reminders.iter().map(|r| r.car_id).collect();
        car_ids.sort_unstable();
        car_ids.dedup();

        let cars: HashMap<i32, _> = CarRepository::new(self.db)
            .get_by_ids(&car_ids)
            .await?
            .into_iter()
            .map(|car| (car.id, car))
            .collect();

        Ok(reminders
            .into_iter()
            .map(|reminder| {
                let car = cars.get(&reminder.car_id).cloned();
                DueReminder { reminder, car }
            })
            .collect())
    }

    /// Atomically moves a reminder from pending to dispatching.
    ///
    /// # Returns
    /// - `Ok(true)` - This caller owns the reminder now
    /// - `Ok(false)` - The reminder was not pending (claimed elsewhere, sent, or deleted)
    /// - `Err(DbErr)` - Database error
    pub async fn claim(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Reminder::update_many()
            .col_expr(
                entity::reminder::Column::Status,
                Expr::value(ReminderStatus::Dispatching.as_str()),
            )
            .filter(entity::reminder::Column::Id.eq(id))
            .filter(entity::reminder::Column::Status.eq(ReminderStatus::Pending.as_str()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Records that the realtime notification for a reminder went out.
    pub async fn mark_broadcast(&self, id: i32, at: DateTime<Utc>) -> Result<(), DbErr> {
        entity::reminder::ActiveModel {
            id: ActiveValue::Unchanged(id),
            broadcast_at: ActiveValue::Set(Some(at)),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(())
    }

    /// Finalises a dispatched reminder as sent.
    pub async fn mark_sent(&self, id: i32, at: DateTime<Utc>) -> Result<(), DbErr> {
        entity::reminder::ActiveModel {
            id: ActiveValue::Unchanged(id),
            status: ActiveValue::Set(ReminderStatus::Sent.as_str().to_string()),
            sent_at: ActiveValue::Set(Some(at)),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(())
    }

    /// Returns a dispatched reminder to pending so the next cycle retries it.
    pub async fn release(&self, id: i32) -> Result<(), DbErr> {
        entity::reminder::ActiveModel {
            id: ActiveValue::Unchanged(id),
            status: ActiveValue::Set(ReminderStatus::Pending.as_str().to_string()),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(())
    }

    pub async fn mark_dest_delivered(&self, dest_id: i32, at: DateTime<Utc>) -> Result<(), DbErr> {
        entity::reminder_dest::ActiveModel {
            id: ActiveValue::Unchanged(dest_id),
            status: ActiveValue::Set(DeliveryStatus::Delivered.as_str().to_string()),
            delivered_at: ActiveValue::Set(Some(at)),
            last_error: ActiveValue::Set(None),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(())
    }

    /// Records a failed send.
    ///
    /// # Arguments
    /// - `dest_id` - Destination that failed
    /// - `attempts` - Total attempts including this one
    /// - `error` - Transport error message
    pub async fn mark_dest_failed(
        &self,
        dest_id: i32,
        attempts: i32,
        error: &str,
    ) -> Result<(), DbErr> {
        entity::reminder_dest::ActiveModel {
            id: ActiveValue::Unchanged(dest_id),
            status: ActiveValue::Set(DeliveryStatus::Failed.as_str().to_string()),
            attempts: ActiveValue::Set(attempts),
            last_error: ActiveValue::Set(Some(error.to_string())),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(())
    }

    pub async fn mark_dest_skipped(&self, dest_id: i32) -> Result<(), DbErr> {
        entity::reminder_dest::ActiveModel {
            id: ActiveValue::Unchanged(dest_id),
            status: ActiveValue::Set(DeliveryStatus::Skipped.as_str().to_string()),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(())
    }

    /// Loads destinations for a batch of reminders in one query, preserving input order.
    async fn attach_destinations(
        &self,
        reminders: Vec<entity::reminder::Model>,
    ) -> Result<Vec<Reminder>, DbErr> {
        if reminders.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = reminders.iter().map(|r| r.id).collect();

        let mut by_reminder: HashMap<i32, Vec<entity::reminder_dest::Model>> = HashMap::new();
        for dest in entity::prelude::ReminderDest::find()
            .filter(entity::reminder_dest::Column::ReminderId.is_in(ids))
            .order_by_asc(entity::reminder_dest::Column::Id)
            .all(self.db)
            .await?
        {
            by_reminder.entry(dest.reminder_id).or_default().push(dest);
        }

        reminders
            .into_iter()
            .map(|reminder| {
                let dests = by_reminder.remove(&reminder.id).unwrap_or_default();
                Reminder::from_entity(reminder, dests)
            })
            .collect()
    }
}

/// Inserts one pending destination per recipient id.
async fn insert_destinations<C: ConnectionTrait>(
    conn: &C,
    reminder_id: i32,
    recipients: &[String],
) -> Result<Vec<entity::reminder_dest::Model>, DbErr> {
    let mut destinations = Vec::with_capacity(recipients.len());

    for user_id in recipients {
        let dest = entity::reminder_dest::ActiveModel {
            reminder_id: ActiveValue::Set(reminder_id),
            user_id: ActiveValue::Set(user_id.clone()),
            status: ActiveValue::Set(DeliveryStatus::Pending.as_str().to_string()),
            attempts: ActiveValue::Set(0),
            last_error: ActiveValue::Set(None),
            delivered_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(conn)
        .await?;

        destinations.push(dest);
    }

    Ok(destinations)
}
