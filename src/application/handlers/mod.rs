//! Application handlers.
//!
//! Handlers that orchestrate domain operations over the ports.

pub mod account_link;
pub mod record_analytics;
pub mod webhook_dispatch;

pub use account_link::{
    AccountLinkError, AccountLinkHandler, LinkContext, LinkStepError, LinkStores,
};
pub use record_analytics::AnalyticsRecorder;
pub use webhook_dispatch::{DispatchSummary, WebhookDispatcher};
