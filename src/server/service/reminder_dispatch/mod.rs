//! Reminder dispatch cycle.
//!
//! One cycle selects the pending reminders inside the due window, claims each one
//! with a conditional `pending -> dispatching` update, resolves recipients, publishes
//! one realtime notification and sends one email per deliverable destination. Each
//! reminder is then finalised as sent, or released back to pending when a failed
//! destination still has attempts left.
//!
//! Transport failures are recorded per destination and never abort the cycle. A
//! persistence error aborts only the reminder being processed.

pub mod resolver;

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use std::collections::{HashMap, HashSet};
use tokio_util::sync::CancellationToken;

use crate::{
    model::notification::REMINDER_NOTIFICATION_EVENT,
    server::{
        data::{reminder::ReminderRepository, user::UserRepository},
        error::AppError,
        model::{
            reminder::{DispatchSettings, DueReminder},
            user::User,
        },
        service::notification::{Broadcaster, EmailSender},
    },
};

/// Counters describing one dispatch cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Reminders returned by the due-window query.
    pub selected: usize,
    /// Reminders finalised as sent.
    pub sent: usize,
    /// Reminders released back to pending for another attempt.
    pub retrying: usize,
    /// Reminders another worker claimed first.
    pub skipped_claims: usize,
    /// Emails accepted by the transport.
    pub deliveries: usize,
    /// Emails the transport rejected.
    pub failures: usize,
}

pub struct ReminderDispatcher<'a> {
    db: &'a DatabaseConnection,
    mailer: &'a dyn EmailSender,
    broadcaster: &'a dyn Broadcaster,
    settings: &'a DispatchSettings,
}

impl<'a> ReminderDispatcher<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        mailer: &'a dyn EmailSender,
        broadcaster: &'a dyn Broadcaster,
        settings: &'a DispatchSettings,
    ) -> Self {
        Self {
            db,
            mailer,
            broadcaster,
            settings,
        }
    }

    /// Runs one dispatch cycle as of `now`.
    ///
    /// The token is checked before each reminder; a cancelled cycle finishes the
    /// reminder in flight and returns.
    ///
    /// # Arguments
    /// - `now` - Reference instant for the due window and recorded timestamps
    /// - `cancel` - Shutdown signal
    ///
    /// # Returns
    /// - `Ok(DispatchReport)` - Cycle counters
    /// - `Err(AppError)` - Selecting reminders or loading users failed
    pub async fn dispatch_due(
        &self,
        now: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> Result<DispatchReport, AppError> {
        let due = ReminderRepository::new(self.db)
            .get_due(now, &self.settings.window)
            .await?;

        let mut report = DispatchReport {
            selected: due.len(),
            ..Default::default()
        };

        tracing::info!("Reminder dispatch cycle selected {} reminder(s)", due.len());

        if due.is_empty() {
            return Ok(report);
        }

        let user_ids: Vec<String> = due
            .iter()
            .flat_map(|d| d.reminder.destinations.iter().map(|dest| dest.user_id.clone()))
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let users = UserRepository::new(self.db).get_by_ids(&user_ids).await?;

        for reminder in due {
            if cancel.is_cancelled() {
                tracing::info!("Reminder dispatch cycle cancelled");
                break;
            }

            let id = reminder.reminder.id;
            if let Err(e) = self.dispatch_one(reminder, &users, now, &mut report).await {
                tracing::error!("Failed to dispatch reminder {}: {}", id, e);
            }
        }

        tracing::info!(
            sent = report.sent,
            retrying = report.retrying,
            skipped_claims = report.skipped_claims,
            deliveries = report.deliveries,
            failures = report.failures,
            "Reminder dispatch cycle finished"
        );

        Ok(report)
    }

    async fn dispatch_one(
        &self,
        due: DueReminder,
        users: &HashMap<String, User>,
        now: DateTime<Utc>,
        report: &mut DispatchReport,
    ) -> Result<(), AppError> {
        let repo = ReminderRepository::new(self.db);
        let id = due.reminder.id;

        let resolved = resolver::resolve(&due, users, self.settings);
        let payload = serde_json::to_value(&resolved.notification)?;

        if !repo.claim(id).await? {
            tracing::debug!("Reminder {} already claimed, skipping", id);
            report.skipped_claims += 1;
            return Ok(());
        }

        if due.reminder.broadcast_at.is_none() {
            let reached = self.broadcaster.broadcast(REMINDER_NOTIFICATION_EVENT, payload);
            repo.mark_broadcast(id, now).await?;
            tracing::debug!("Broadcast reminder {} to {} subscriber(s)", id, reached);
        }

        for skipped in &resolved.skipped {
            tracing::warn!(
                "Reminder {} destination {} skipped: {:?}",
                id,
                skipped.user_id,
                skipped.reason
            );
            repo.mark_dest_skipped(skipped.dest_id).await?;
        }

        let mut retry = false;
        for delivery in &resolved.deliveries {
            match self
                .mailer
                .send_email(&delivery.to, &delivery.subject, &delivery.html_body)
                .await
            {
                Ok(()) => {
                    repo.mark_dest_delivered(delivery.dest_id, now).await?;
                    report.deliveries += 1;
                }
                Err(e) => {
                    let attempts = delivery.attempts + 1;
                    tracing::error!(
                        "Failed to send reminder {} to user {} (attempt {}): {}",
                        id,
                        delivery.user_id,
                        attempts,
                        e
                    );
                    repo.mark_dest_failed(delivery.dest_id, attempts, &e.to_string())
                        .await?;
                    report.failures += 1;
                    retry |= attempts < self.settings.max_attempts;
                }
            }
        }

        if retry {
            repo.release(id).await?;
            report.retrying += 1;
            tracing::info!("Reminder {} released for retry", id);
        } else {
            repo.mark_sent(id, now).await?;
            report.sent += 1;
            tracing::info!("Reminder {} sent", id);
        }

        Ok(())
    }
}
