//! MessageHandler port - Application callbacks for classified webhook events.
//!
//! Every method defaults to a no-op, so implementors override only the event
//! kinds they care about. Errors are logged by the dispatcher and never change
//! the acknowledgement sent to the platform.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::linking::AccountLinkingEvent;
use crate::domain::webhook::{Delivery, IncomingMessage, MessagingEvent, Optin, PostbackEvent, Read};

#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// Plugin opt-in (`optin`).
    async fn on_authentication(
        &self,
        _event: &MessagingEvent,
        _optin: &Optin,
    ) -> Result<(), DomainError> {
        Ok(())
    }

    async fn on_message(
        &self,
        _event: &MessagingEvent,
        _message: &IncomingMessage,
    ) -> Result<(), DomainError> {
        Ok(())
    }

    async fn on_delivery(
        &self,
        _event: &MessagingEvent,
        _delivery: &Delivery,
    ) -> Result<(), DomainError> {
        Ok(())
    }

    async fn on_postback(
        &self,
        _event: &MessagingEvent,
        _postback: &PostbackEvent,
    ) -> Result<(), DomainError> {
        Ok(())
    }

    async fn on_read(&self, _event: &MessagingEvent, _read: &Read) -> Result<(), DomainError> {
        Ok(())
    }

    /// Outcome of a link or unlink run: the sender id on success, or the
    /// workflow failure with code `LINK_FAILED` / `UNLINK_FAILED`.
    async fn on_account_link_result(
        &self,
        _event: &AccountLinkingEvent,
        _outcome: Result<&str, &DomainError>,
    ) -> Result<(), DomainError> {
        Ok(())
    }
}

/// Handler that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMessageHandler;

impl MessageHandler for NoopMessageHandler {}
