//! Account linking handlers.
//!
//! Reconciles the Messenger account linking handshake across three stores:
//!
//! - **linking**: in-flight handshakes keyed by authorization code, written by
//!   the application's authorization page
//! - **user**: application users keyed by the configured user id field
//! - **mapping**: sender to page bindings keyed by page-scoped sender id
//!
//! Both operations run their steps strictly in sequence and stop at the first
//! failure. There is no rollback: a user record created by a link whose
//! mapping write later fails stays in place. Concurrent events for the same
//! sender are not serialized; the store's `add` semantics decide create races.

mod errors;
mod linking;
mod unlinking;

#[cfg(test)]
mod testing;

use std::sync::Arc;

pub use errors::{AccountLinkError, LinkStepError};

use crate::domain::linking::{
    LinkingRecord, MappingRecord, UserRecord, DEFAULT_USER_ID_FIELD,
};
use crate::ports::RecordStore;

/// The three collections the workflow reads and writes.
#[derive(Clone)]
pub struct LinkStores {
    pub linking: Arc<dyn RecordStore<LinkingRecord>>,
    pub users: Arc<dyn RecordStore<UserRecord>>,
    pub mappings: Arc<dyn RecordStore<MappingRecord>>,
}

/// Records gathered during one run, plus the step in progress.
#[derive(Debug, Default)]
pub struct LinkContext {
    pub step: &'static str,
    pub linking: Option<LinkingRecord>,
    pub user: Option<UserRecord>,
    pub mapping: Option<MappingRecord>,
}

impl LinkContext {
    fn enter(&mut self, step: &'static str) {
        self.step = step;
    }
}

/// Handler for `account_linking` events.
pub struct AccountLinkHandler {
    stores: LinkStores,
    user_id_field: String,
}

impl AccountLinkHandler {
    pub fn new(stores: LinkStores, user_id_field: impl Into<String>) -> Self {
        Self {
            stores,
            user_id_field: user_id_field.into(),
        }
    }

    /// Handler correlating records through the `userid` attribute.
    pub fn with_default_field(stores: LinkStores) -> Self {
        Self::new(stores, DEFAULT_USER_ID_FIELD)
    }

    pub fn user_id_field(&self) -> &str {
        &self.user_id_field
    }
}
