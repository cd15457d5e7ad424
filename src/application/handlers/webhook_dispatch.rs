//! WebhookDispatcher - Routes verified webhook deliveries.
//!
//! Each messaging event is classified and handed to the matching
//! `MessageHandler` callback. `account_linking` events run the account link
//! workflow first and report its outcome through
//! `MessageHandler::on_account_link_result`.
//!
//! Nothing here fails the delivery: handler and workflow errors are logged
//! and counted, and the platform is always acknowledged.

use std::sync::Arc;

use serde_json::json;

use super::account_link::AccountLinkHandler;
use super::record_analytics::AnalyticsRecorder;
use crate::domain::analytics::AnalyticsLevel;
use crate::domain::foundation::DomainError;
use crate::domain::linking::{AccountLinkingEvent, LinkStatus};
use crate::domain::webhook::{MessagingEvent, MessagingEventKind, WebhookPayload};
use crate::ports::{LinkingHook, MessageHandler};

/// Counts from one delivery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Messaging events seen across all page entries.
    pub events: usize,
    /// Account link or unlink runs that failed.
    pub link_failures: usize,
    /// `MessageHandler` callbacks that returned an error.
    pub handler_errors: usize,
    /// Messaging events left out because they did not parse.
    pub rejected_events: usize,
}

pub struct WebhookDispatcher {
    account_link: Arc<AccountLinkHandler>,
    message_handler: Arc<dyn MessageHandler>,
    linking_hook: Option<Arc<dyn LinkingHook>>,
    analytics: Option<Arc<AnalyticsRecorder>>,
}

impl WebhookDispatcher {
    pub fn new(
        account_link: Arc<AccountLinkHandler>,
        message_handler: Arc<dyn MessageHandler>,
    ) -> Self {
        Self {
            account_link,
            message_handler,
            linking_hook: None,
            analytics: None,
        }
    }

    /// Hook applied to users created by a first link.
    pub fn with_linking_hook(mut self, hook: Arc<dyn LinkingHook>) -> Self {
        self.linking_hook = Some(hook);
        self
    }

    /// Records link outcomes as critical analytics events.
    pub fn with_analytics(mut self, analytics: Arc<AnalyticsRecorder>) -> Self {
        self.analytics = Some(analytics);
        self
    }

    pub async fn dispatch(&self, payload: &WebhookPayload) -> DispatchSummary {
        let mut summary = DispatchSummary::default();

        if !payload.is_page_subscription() {
            tracing::debug!(object = %payload.object, "Ignoring non-page webhook");
            return summary;
        }

        for entry in &payload.entry {
            tracing::trace!(
                page_id = %entry.id,
                received_at = ?entry.received_at(),
                events = entry.messaging.len(),
                "Processing page entry"
            );
            for error in &entry.rejected {
                tracing::warn!(page_id = %entry.id, error = %error, "Skipping malformed messaging event");
            }
            summary.rejected_events += entry.rejected.len();
            for event in &entry.messaging {
                summary.events += 1;
                self.dispatch_event(event, &mut summary).await;
            }
        }

        summary
    }

    async fn dispatch_event(&self, event: &MessagingEvent, summary: &mut DispatchSummary) {
        let handler = self.message_handler.as_ref();
        let result = match event.kind() {
            MessagingEventKind::Authentication(optin) => handler.on_authentication(event, optin).await,
            MessagingEventKind::Message(message) => handler.on_message(event, message).await,
            MessagingEventKind::Delivery(delivery) => handler.on_delivery(event, delivery).await,
            MessagingEventKind::Postback(postback) => handler.on_postback(event, postback).await,
            MessagingEventKind::Read(read) => handler.on_read(event, read).await,
            MessagingEventKind::AccountLinking(linking) => match event.account_linking_event() {
                Some(link_event) => self.run_account_link(&link_event, summary).await,
                None => {
                    tracing::error!(
                        sender_id = %event.sender.id,
                        status = %linking.status,
                        "Unknown account linking status"
                    );
                    Ok(())
                }
            },
            MessagingEventKind::Unknown => {
                tracing::debug!(sender_id = %event.sender.id, "Received unknown messaging event");
                Ok(())
            }
        };

        if let Err(err) = result {
            summary.handler_errors += 1;
            tracing::error!(sender_id = %event.sender.id, error = %err, "Message handler failed");
        }
    }

    async fn run_account_link(
        &self,
        event: &AccountLinkingEvent,
        summary: &mut DispatchSummary,
    ) -> Result<(), DomainError> {
        let outcome = match event.status {
            LinkStatus::Linked => {
                self.account_link
                    .do_linking(event, self.linking_hook.as_deref())
                    .await
            }
            LinkStatus::Unlinked => self.account_link.do_unlinking(event).await,
        };

        match outcome {
            Ok(sender_id) => {
                self.record_link_event(event, format!("account_{}", event.status));
                self.message_handler
                    .on_account_link_result(event, Ok(&sender_id))
                    .await
            }
            Err(err) => {
                summary.link_failures += 1;
                self.record_link_event(event, "account_link_failed".to_string());
                let err = DomainError::from(&err);
                self.message_handler
                    .on_account_link_result(event, Err(&err))
                    .await
            }
        }
    }

    /// Sends the analytics event in the background; the delivery never
    /// waits on the activities endpoint.
    fn record_link_event(&self, event: &AccountLinkingEvent, name: String) {
        let Some(analytics) = self.analytics.clone() else {
            return;
        };
        let sender_id = event.sender_id.clone();
        let custom_event = json!({ "_eventName": name });

        tokio::spawn(async move {
            let result = analytics
                .record(AnalyticsLevel::Critical.into(), &sender_id, move || custom_event)
                .await;
            if let Err(err) = result {
                tracing::warn!(sender_id = %sender_id, error = %err, "Analytics event failed");
            }
        });
    }
}
