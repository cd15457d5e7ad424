//! The account linking webhook event in workflow form.

use super::records::LinkStatus;

/// An `account_linking` messaging event reduced to what the link workflow reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountLinkingEvent {
    /// Page-scoped id of the user who tapped Link / Unlink.
    pub sender_id: String,
    /// Page that received the event.
    pub recipient_id: String,
    pub status: LinkStatus,
    /// Present on `linked` events only.
    pub authorization_code: Option<String>,
}

impl AccountLinkingEvent {
    pub fn linked(
        sender_id: impl Into<String>,
        recipient_id: impl Into<String>,
        authorization_code: impl Into<String>,
    ) -> Self {
        Self {
            sender_id: sender_id.into(),
            recipient_id: recipient_id.into(),
            status: LinkStatus::Linked,
            authorization_code: Some(authorization_code.into()),
        }
    }

    pub fn unlinked(sender_id: impl Into<String>, recipient_id: impl Into<String>) -> Self {
        Self {
            sender_id: sender_id.into(),
            recipient_id: recipient_id.into(),
            status: LinkStatus::Unlinked,
            authorization_code: None,
        }
    }
}
