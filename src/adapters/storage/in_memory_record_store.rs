//! In-Memory Record Store Adapter
//!
//! Stores linking, user and mapping records in memory.
//! Useful for testing and development; contents are lost on restart.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::linking::StoredRecord;
use crate::ports::{RecordStore, StoreError};

/// In-memory storage for one record collection.
///
/// `add` on an existing key is rejected (`Ok(None)`), so of two concurrent
/// first links for the same key exactly one wins. `update` on a missing key
/// is rejected the same way.
#[derive(Debug)]
pub struct InMemoryRecordStore<R> {
    records: Arc<RwLock<HashMap<String, R>>>,
}

impl<R> Clone for InMemoryRecordStore<R> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<R: StoredRecord> InMemoryRecordStore<R> {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all stored records (useful for tests)
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }

    /// Get the number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl<R: StoredRecord> Default for InMemoryRecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: StoredRecord> RecordStore<R> for InMemoryRecordStore<R> {
    async fn get_by_id(&self, id: &str) -> Result<Option<R>, StoreError> {
        let records = self.records.read().await;
        Ok(records.get(id).cloned())
    }

    async fn add(&self, record: R) -> Result<Option<R>, StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(record.id()) {
            tracing::debug!(
                collection = R::COLLECTION,
                id = record.id(),
                "Rejected add of existing record"
            );
            return Ok(None);
        }
        records.insert(record.id().to_string(), record.clone());
        Ok(Some(record))
    }

    async fn update(&self, record: R) -> Result<Option<R>, StoreError> {
        let mut records = self.records.write().await;
        match records.get_mut(record.id()) {
            Some(slot) => {
                *slot = record.clone();
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        Ok(records.remove(id).is_some())
    }
}
