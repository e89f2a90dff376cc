use thiserror::Error;

/// Failures reported by an email transport.
#[derive(Error, Debug)]
pub enum MailError {
    /// The relay could not be reached or the request failed in transit.
    #[error("Mail relay request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The relay answered with a non-success status.
    #[error("Mail relay rejected message with status {status}: {body}")]
    Rejected {
        /// HTTP status returned by the relay
        status: u16,
        /// Response body, kept for diagnostics
        body: String,
    },
}
