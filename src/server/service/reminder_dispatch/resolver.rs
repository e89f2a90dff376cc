//! Turns a due reminder into deliverable messages.
//!
//! Resolution is pure: users are fetched by the caller in one query and passed in,
//! so this module never touches the database or a transport.

use pulldown_cmark::{escape::escape_html, html, Parser};
use std::collections::HashMap;

use crate::{
    model::notification::ReminderNotificationDto,
    server::model::{
        car::Car,
        reminder::{DispatchSettings, DueReminder, Reminder},
        user::User,
    },
};

pub const TITLE_FALLBACK: &str = "Sin título";
pub const DESCRIPTION_FALLBACK: &str = "Sin descripción.";
const DATE_FORMAT: &str = "%d/%m/%Y %H:%M UTC";

/// One rendered email for one destination.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub dest_id: i32,
    pub user_id: String,
    /// Attempts recorded before this send.
    pub attempts: i32,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    UnknownUser,
    MissingEmail,
}

/// Destination that cannot receive email.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedDestination {
    pub dest_id: i32,
    pub user_id: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedReminder {
    pub deliveries: Vec<Delivery>,
    pub skipped: Vec<SkippedDestination>,
    /// Realtime payload, identical for every subscriber.
    pub notification: ReminderNotificationDto,
}

/// Resolves the outstanding destinations of `due` against `users`.
///
/// Only destinations still pending, or failed with attempts left, are considered.
/// Each becomes either a `Delivery` or a `SkippedDestination`; a missing user is
/// never an error.
///
/// # Arguments
/// - `due` - Reminder with its destinations and car
/// - `users` - Users referenced by the destinations, keyed by id
/// - `settings` - Subject prefix and attempt limit
pub fn resolve(
    due: &DueReminder,
    users: &HashMap<String, User>,
    settings: &DispatchSettings,
) -> ResolvedReminder {
    let reminder = &due.reminder;
    let subject = format!("{}: {}", settings.subject_prefix, display_title(reminder));
    let html_body = render_body(reminder, due.car.as_ref());

    let mut deliveries = Vec::new();
    let mut skipped = Vec::new();

    for dest in reminder
        .destinations
        .iter()
        .filter(|dest| dest.is_outstanding(settings.max_attempts))
    {
        let email = match users.get(&dest.user_id) {
            None => Err(SkipReason::UnknownUser),
            Some(user) => user.deliverable_email().ok_or(SkipReason::MissingEmail),
        };

        match email {
            Ok(to) => deliveries.push(Delivery {
                dest_id: dest.id,
                user_id: dest.user_id.clone(),
                attempts: dest.attempts,
                to: to.to_string(),
                subject: subject.clone(),
                html_body: html_body.clone(),
            }),
            Err(reason) => skipped.push(SkippedDestination {
                dest_id: dest.id,
                user_id: dest.user_id.clone(),
                reason,
            }),
        }
    }

    let notification = ReminderNotificationDto {
        id: reminder.id,
        title: reminder.title.clone(),
        description: reminder.description.clone(),
        reminder_date: reminder.reminder_date,
        car: due.car.as_ref().map(Car::summary),
        recipients: reminder
            .destinations
            .iter()
            .map(|dest| dest.user_id.clone())
            .collect(),
    };

    ResolvedReminder {
        deliveries,
        skipped,
        notification,
    }
}

fn display_title(reminder: &Reminder) -> &str {
    non_blank(reminder.title.as_deref()).unwrap_or(TITLE_FALLBACK)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn push_escaped(out: &mut String, text: &str) {
    // Writing into a String cannot fail.
    let _ = escape_html(out, text);
}

/// Renders the HTML body shared by every recipient of a reminder.
pub fn render_body(reminder: &Reminder, car: Option<&Car>) -> String {
    let mut out = String::new();

    out.push_str("<h2>");
    push_escaped(&mut out, display_title(reminder));
    out.push_str("</h2>\n");

    if let Some(car) = car {
        out.push_str("<p><strong>Vehículo:</strong> ");
        let label = [car.brand.as_deref(), Some(car.model.as_str())]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        push_escaped(&mut out, &label);
        if let Some(plate) = non_blank(car.plate.as_deref()) {
            out.push_str(" (");
            push_escaped(&mut out, plate);
            out.push(')');
        }
        out.push_str("</p>\n");
    }

    out.push_str("<p><strong>Fecha:</strong> ");
    push_escaped(
        &mut out,
        &reminder.reminder_date.format(DATE_FORMAT).to_string(),
    );
    out.push_str("</p>\n");

    out.push_str("<div>");
    match non_blank(reminder.description.as_deref()) {
        Some(markdown) => html::push_html(&mut out, Parser::new(markdown)),
        None => {
            out.push_str("<p>");
            push_escaped(&mut out, DESCRIPTION_FALLBACK);
            out.push_str("</p>");
        }
    }
    out.push_str("</div>\n");

    out
}
