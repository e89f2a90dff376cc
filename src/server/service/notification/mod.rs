//! Outbound notification transports.
//!
//! Two channels carry reminders out of the process: email to each resolved
//! recipient (`EmailSender`) and a fire-and-forget realtime broadcast to every
//! connected client (`Broadcaster`). The dispatcher only sees the traits, so tests
//! substitute recording implementations.

pub mod email;
pub mod realtime;

use async_trait::async_trait;

use crate::server::error::mail::MailError;

/// Delivers one HTML email.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Sends `html_body` to `to` with the given subject.
    ///
    /// # Returns
    /// - `Ok(())` - The transport accepted the message
    /// - `Err(MailError)` - The message was not accepted
    async fn send_email(&self, to: &str, subject: &str, html_body: &str) -> Result<(), MailError>;
}

/// Publishes an event to every realtime subscriber.
pub trait Broadcaster: Send + Sync {
    /// Publishes `payload` under `event`.
    ///
    /// Never fails: with no subscribers the event is dropped.
    ///
    /// # Returns
    /// Number of subscribers the event was handed to.
    fn broadcast(&self, event: &str, payload: serde_json::Value) -> usize;
}
