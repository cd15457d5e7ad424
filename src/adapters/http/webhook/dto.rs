//! Request and response types for the webhook endpoints.

use serde::{Deserialize, Serialize};

/// Mode value sent by the platform when subscribing a webhook.
pub const SUBSCRIBE_MODE: &str = "subscribe";

/// Query of `GET /webhook`, the subscription handshake.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyQuery {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

impl VerifyQuery {
    pub fn is_subscribe(&self) -> bool {
        self.mode.as_deref() == Some(SUBSCRIBE_MODE)
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}
