//! Account linking domain types.
//!
//! - `LinkingRecord` - one-time handshake keyed by authorization code
//! - `UserRecord` - durable application user
//! - `MappingRecord` - page-scoped sender bound to a user
//! - `AccountLinkingEvent` - the webhook event that drives link/unlink

mod event;
mod records;

pub use event::AccountLinkingEvent;
pub use records::{
    LinkStatus, LinkingRecord, MappingRecord, StoredRecord, UserRecord, DEFAULT_USER_ID_FIELD,
};
