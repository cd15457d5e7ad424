//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `graph` - Facebook Graph API client
//! - `http` - Axum webhook endpoints and middleware
//! - `storage` - Record store implementations

pub mod graph;
pub mod http;
pub mod storage;

pub use graph::{GraphApiClient, GraphConfig};
pub use storage::InMemoryRecordStore;
