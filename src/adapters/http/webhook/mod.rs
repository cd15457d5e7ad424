//! HTTP adapter for the Messenger webhook.
//!
//! Exposes the subscription handshake and event delivery endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, VerifyQuery};
pub use handlers::{receive_webhook, verify_webhook, WebhookApiError, WebhookAppState};
pub use routes::{webhook_router, webhook_routes};
