//! Application layer - Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    AccountLinkError, AccountLinkHandler, AnalyticsRecorder, DispatchSummary, LinkStepError,
    LinkStores, WebhookDispatcher,
};
