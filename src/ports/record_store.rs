//! RecordStore port - Key-value collection used by the account linking workflow.
//!
//! The workflow talks to three collections (linking, user, mapping) through
//! this one contract. Absence is never an error: a lookup miss is `Ok(None)`,
//! and a rejected write is `Ok(None)` / `Ok(false)`. The `Err` channel is
//! reserved for the store itself failing.
//!
//! ## Create races
//!
//! The workflow reads then writes without isolation. Two concurrent links for
//! the same key may both observe "absent" and both call `add`. Implementations
//! decide the outcome and must document it; the bundled in-memory store
//! rejects the second `add` with `Ok(None)`.

use async_trait::async_trait;

use crate::domain::linking::StoredRecord;

/// Errors raised by a record store backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{collection} store unavailable: {message}")]
    Unavailable {
        collection: &'static str,
        message: String,
    },
}

impl StoreError {
    pub fn unavailable(collection: &'static str, message: impl Into<String>) -> Self {
        StoreError::Unavailable {
            collection,
            message: message.into(),
        }
    }
}

/// Port for one key-value collection of records.
#[async_trait]
pub trait RecordStore<R: StoredRecord>: Send + Sync {
    /// Look up a record by key. Returns `None` when absent.
    async fn get_by_id(&self, id: &str) -> Result<Option<R>, StoreError>;

    /// Create a record. Returns the stored record, or `None` if the add was
    /// rejected.
    async fn add(&self, record: R) -> Result<Option<R>, StoreError>;

    /// Replace an existing record. Returns the stored record, or `None` if
    /// nothing was updated.
    async fn update(&self, record: R) -> Result<Option<R>, StoreError>;

    /// Delete a record by key. Returns `true` only if a record was removed.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;
}
