//! Persisted records touched by the account linking workflow.
//!
//! All three record kinds carry an open attribute map next to their typed
//! fields. The attribute that joins a linking record to its user and mapping
//! records is named by configuration (`userid` unless overridden), so it
//! cannot be a fixed struct field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Attribute name used to correlate records when none is configured.
pub const DEFAULT_USER_ID_FIELD: &str = "userid";

/// A record addressable by a single string key in a record store.
pub trait StoredRecord: fmt::Debug + Clone + Send + Sync + 'static {
    /// Name of the collection, used in logs.
    const COLLECTION: &'static str;

    /// The record's key.
    fn id(&self) -> &str;
}

/// Account linking status as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    Linked,
    Unlinked,
}

impl LinkStatus {
    /// Parses the platform's status string. Unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "linked" => Some(LinkStatus::Linked),
            "unlinked" => Some(LinkStatus::Unlinked),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LinkStatus::Linked => "linked",
            LinkStatus::Unlinked => "unlinked",
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads an attribute as a record key.
///
/// Strings are used as-is (empty strings count as absent); numbers are
/// rendered in decimal so numeric account numbers can serve as keys.
fn attribute_as_key(attributes: &Map<String, Value>, field: &str) -> Option<String> {
    match attributes.get(field)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// LinkingRecord
// ════════════════════════════════════════════════════════════════════════════════

/// An in-flight authorization handshake, keyed by the one-time authorization
/// code issued during the account linking redirect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkingRecord {
    pub auth_code: String,

    /// Attributes stored at authorization time, including the user id field.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl LinkingRecord {
    pub fn new(auth_code: impl Into<String>) -> Self {
        Self {
            auth_code: auth_code.into(),
            attributes: Map::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Returns the value of the configured user id field, if usable as a key.
    pub fn user_id(&self, user_id_field: &str) -> Option<String> {
        attribute_as_key(&self.attributes, user_id_field)
    }
}

impl StoredRecord for LinkingRecord {
    const COLLECTION: &'static str = "linking";

    fn id(&self) -> &str {
        &self.auth_code
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// UserRecord
// ════════════════════════════════════════════════════════════════════════════════

/// A platform-independent application user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,

    /// Authorization code of the most recent successful link.
    pub auth_code: String,

    /// Extra profile data merged in by a linking hook.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl UserRecord {
    pub fn new(id: impl Into<String>, auth_code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            auth_code: auth_code.into(),
            attributes: Map::new(),
        }
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

impl StoredRecord for UserRecord {
    const COLLECTION: &'static str = "user";

    fn id(&self) -> &str {
        &self.id
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// MappingRecord
// ════════════════════════════════════════════════════════════════════════════════

/// Binding between a page-scoped sender and an application user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingRecord {
    pub sender_id: String,
    pub page_id: String,
    pub status: LinkStatus,

    /// Holds the user id field copied from the linking record.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl MappingRecord {
    /// Creates a mapping whose user id field is copied from `user_id`.
    pub fn new(
        sender_id: impl Into<String>,
        page_id: impl Into<String>,
        status: LinkStatus,
        user_id_field: &str,
        user_id: Option<&Value>,
    ) -> Self {
        let mut attributes = Map::new();
        if let Some(value) = user_id {
            attributes.insert(user_id_field.to_string(), value.clone());
        }
        Self {
            sender_id: sender_id.into(),
            page_id: page_id.into(),
            status,
            attributes,
        }
    }

    /// Returns the stored user id, if usable as a key.
    pub fn user_id(&self, user_id_field: &str) -> Option<String> {
        attribute_as_key(&self.attributes, user_id_field)
    }
}

impl StoredRecord for MappingRecord {
    const COLLECTION: &'static str = "mapping";

    fn id(&self) -> &str {
        &self.sender_id
    }
}
