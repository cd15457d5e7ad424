//! Storage Adapters
//!
//! Implementations of the RecordStore port for the account linking stores.
//!
//! ## Available Adapters
//!
//! - **InMemoryRecordStore** - Stores records in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::InMemoryRecordStore;
//!
//! let linking: InMemoryRecordStore<LinkingRecord> = InMemoryRecordStore::new();
//! ```

mod in_memory_record_store;

pub use in_memory_record_store::InMemoryRecordStore;
