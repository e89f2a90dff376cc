use async_trait::async_trait;
use std::{collections::HashSet, sync::Mutex};

use crate::server::{error::mail::MailError, service::notification::EmailSender};

mod report;

/// Email sent through `RecordingMailer`.
#[derive(Debug, Clone, PartialEq)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Test transport that records every message and rejects chosen addresses.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentMail>>,
    failing: Mutex<HashSet<String>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every send to `address` fail until `recover` is called.
    pub fn fail_for(&self, address: &str) {
        self.failing.lock().unwrap().insert(address.to_string());
    }

    pub fn recover(&self, address: &str) {
        self.failing.lock().unwrap().remove(address);
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn recipients(&self) -> Vec<String> {
        self.sent().into_iter().map(|mail| mail.to).collect()
    }
}

#[async_trait]
impl EmailSender for RecordingMailer {
    async fn send_email(&self, to: &str, subject: &str, html_body: &str) -> Result<(), MailError> {
        if self.failing.lock().unwrap().contains(to) {
            return Err(MailError::Rejected {
                status: 503,
                body: "relay unavailable".to_string(),
            });
        }

        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
        });

        Ok(())
    }
}
