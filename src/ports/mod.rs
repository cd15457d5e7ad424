//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `RecordStore` - Key-value collection for linking, user and mapping records
//!
//! ## Messenger Platform Ports
//!
//! - `MessengerClient` - Send API, user profiles and page settings
//! - `ActivitySender` - Analytics app activities
//!
//! ## Extension Ports
//!
//! - `MessageHandler` - Application callbacks for classified webhook events
//! - `LinkingHook` - Enrichment of user records created by a first link

mod activity_sender;
mod linking_hook;
mod message_handler;
mod messenger_client;
mod record_store;

pub use activity_sender::ActivitySender;
pub use linking_hook::{CopyAttributesHook, LinkingHook};
pub use message_handler::{MessageHandler, NoopMessageHandler};
pub use messenger_client::{
    AccountLinkingEndpoint, MessengerClient, MessengerError, SendReceipt, UserProfile,
};
pub use record_store::{RecordStore, StoreError};
