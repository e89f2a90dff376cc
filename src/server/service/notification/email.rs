use async_trait::async_trait;
use serde::Serialize;

use crate::server::{error::mail::MailError, service::notification::EmailSender};

/// Email transport backed by an HTTP mail relay.
///
/// Each message is POSTed as JSON `{from, to, subject, html}` to the relay URL,
/// authenticated with a bearer key when one is configured.
#[derive(Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    from: String,
}

#[derive(Serialize)]
struct OutgoingMail<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

impl HttpMailer {
    pub fn new(
        client: reqwest::Client,
        api_url: String,
        api_key: Option<String>,
        from: String,
    ) -> Self {
        Self {
            client,
            api_url,
            api_key,
            from,
        }
    }
}

#[async_trait]
impl EmailSender for HttpMailer {
    async fn send_email(&self, to: &str, subject: &str, html_body: &str) -> Result<(), MailError> {
        let mut request = self.client.post(&self.api_url).json(&OutgoingMail {
            from: &self.from,
            to,
            subject,
            html: html_body,
        });

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!("Mail relay accepted message for {}", to);

        Ok(())
    }
}
