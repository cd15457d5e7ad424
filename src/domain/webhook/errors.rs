//! Webhook error types for Messenger webhook handling.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that occur before a webhook delivery reaches the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// Neither `X-Hub-Signature-256` nor `X-Hub-Signature` was sent.
    #[error("Missing signature header")]
    MissingSignature,

    /// The signature header was not `<algorithm>=<hex>`.
    #[error("Malformed signature header: {0}")]
    MalformedSignature(String),

    /// The signature did not match the body.
    #[error("Invalid signature")]
    InvalidSignature,

    /// The body was not a webhook payload.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl WebhookError {
    /// Maps the error to the status returned to the platform.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::MissingSignature
            | WebhookError::MalformedSignature(_)
            | WebhookError::InvalidSignature => StatusCode::FORBIDDEN,
            WebhookError::ParseError(_) => StatusCode::BAD_REQUEST,
        }
    }
}
