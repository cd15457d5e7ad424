//! Graph API adapters
//!
//! `GraphApiClient` implements both `MessengerClient` and `ActivitySender`.

mod graph_client;

pub use graph_client::{GraphApiClient, GraphConfig, DEFAULT_API_BASE_URL};
