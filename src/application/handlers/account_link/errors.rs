use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::StoreError;

/// Reason a single workflow step stopped the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkStepError {
    /// A lookup or write came back empty: `"no linking"`, `"no user"` or
    /// `"no mapping"`.
    #[error("{0}")]
    NotFound(&'static str),

    /// Unlink found no mapping for the sender.
    #[error("no mapping found for sender")]
    NoMapping,

    /// The record that should carry the user id field does not.
    #[error("record has no usable `{field}` value")]
    MissingUserId { field: String },

    /// The store reported that nothing was deleted.
    #[error("delete of {collection} record {id} was rejected")]
    DeleteRejected { collection: &'static str, id: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failure of a whole link or unlink run.
///
/// Earlier writes of the run are not undone; see `AccountLinkHandler`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountLinkError {
    #[error("account link failed for sender {sender_id}: {cause}")]
    LinkFailed {
        sender_id: String,
        #[source]
        cause: LinkStepError,
    },

    #[error("account unlink failed for sender {sender_id}: {cause}")]
    UnlinkFailed {
        sender_id: String,
        #[source]
        cause: LinkStepError,
    },
}

impl AccountLinkError {
    pub fn sender_id(&self) -> &str {
        match self {
            AccountLinkError::LinkFailed { sender_id, .. }
            | AccountLinkError::UnlinkFailed { sender_id, .. } => sender_id,
        }
    }

    /// The step failure that ended the run.
    pub fn cause(&self) -> &LinkStepError {
        match self {
            AccountLinkError::LinkFailed { cause, .. }
            | AccountLinkError::UnlinkFailed { cause, .. } => cause,
        }
    }

    /// An unlink for a sender that was never linked.
    pub fn is_no_mapping(&self) -> bool {
        matches!(
            self,
            AccountLinkError::UnlinkFailed {
                cause: LinkStepError::NoMapping,
                ..
            }
        )
    }
}

impl From<&AccountLinkError> for DomainError {
    fn from(err: &AccountLinkError) -> Self {
        let code = match err {
            AccountLinkError::LinkFailed { .. } => ErrorCode::LinkFailed,
            AccountLinkError::UnlinkFailed { .. } => ErrorCode::UnlinkFailed,
        };
        DomainError::new(code, err.to_string())
            .with_detail("sender_id", err.sender_id())
            .with_detail("cause", err.cause().to_string())
    }
}
