//! HTTP adapters - Webhook endpoint implementations.

pub mod middleware;
pub mod webhook;

// Re-export key types for convenience
pub use middleware::SignatureCheck;
pub use webhook::{webhook_router, WebhookAppState};
