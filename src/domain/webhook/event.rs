//! Messenger webhook payload types.
//!
//! A delivery looks like:
//!
//! ```text
//! { "object": "page",
//!   "entry": [{ "id": "<page id>", "time": 1458692752478,
//!               "messaging": [{ "sender": {"id": ...}, "recipient": {"id": ...},
//!                               "timestamp": ..., "<event kind>": {...} }] }] }
//! ```
//!
//! Exactly one event-kind field is expected per messaging event; when several
//! are present the first in [`MessagingEvent::kind`] order wins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::linking::{AccountLinkingEvent, LinkStatus};

/// Value of `object` for page subscriptions.
pub const PAGE_OBJECT: &str = "page";

/// Top-level webhook body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub entry: Vec<PageEntry>,
}

impl WebhookPayload {
    pub fn is_page_subscription(&self) -> bool {
        self.object == PAGE_OBJECT
    }
}

/// Batch of events for one page.
///
/// Messaging events are parsed one at a time. An event that does not fit
/// [`MessagingEvent`] is left out of `messaging` and its parse error kept in
/// `rejected`, so the rest of the batch is still delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPageEntry")]
pub struct PageEntry {
    pub id: String,
    /// Milliseconds since the epoch.
    pub time: Option<i64>,
    pub messaging: Vec<MessagingEvent>,
    #[serde(skip)]
    pub rejected: Vec<String>,
}

#[derive(Deserialize)]
struct RawPageEntry {
    #[serde(default)]
    id: String,
    #[serde(default)]
    time: Option<i64>,
    #[serde(default)]
    messaging: Vec<Value>,
}

impl From<RawPageEntry> for PageEntry {
    fn from(raw: RawPageEntry) -> Self {
        let mut messaging = Vec::with_capacity(raw.messaging.len());
        let mut rejected = Vec::new();
        for value in raw.messaging {
            match serde_json::from_value::<MessagingEvent>(value) {
                Ok(event) => messaging.push(event),
                Err(err) => rejected.push(err.to_string()),
            }
        }
        Self {
            id: raw.id,
            time: raw.time,
            messaging,
            rejected,
        }
    }
}

impl PageEntry {
    pub fn received_at(&self) -> Option<DateTime<Utc>> {
        self.time.and_then(DateTime::from_timestamp_millis)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
}

/// One messaging event addressed from a sender to a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagingEvent {
    pub sender: Participant,
    pub recipient: Participant,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optin: Option<Optin>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<IncomingMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery: Option<Delivery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postback: Option<PostbackEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<Read>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_linking: Option<AccountLinking>,
}

/// Authentication callback from the "Send to Messenger" plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Optin {
    /// The plugin's `data-ref` value.
    #[serde(rename = "ref", default)]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomingMessage {
    #[serde(default)]
    pub mid: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub is_echo: bool,
    #[serde(default)]
    pub metadata: Option<String>,
    #[serde(default)]
    pub quick_reply: Option<QuickReplyPayload>,
    #[serde(default)]
    pub attachments: Vec<IncomingAttachment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickReplyPayload {
    pub payload: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomingAttachment {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    #[serde(default)]
    pub mids: Vec<String>,
    /// All messages sent before this timestamp were delivered.
    #[serde(default)]
    pub watermark: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostbackEvent {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub payload: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Read {
    /// All messages sent before this timestamp were read.
    #[serde(default)]
    pub watermark: i64,
}

/// Raw `account_linking` body; `status` is kept as sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountLinking {
    pub status: String,
    #[serde(default)]
    pub authorization_code: Option<String>,
}

/// Classification of a messaging event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MessagingEventKind<'a> {
    Authentication(&'a Optin),
    Message(&'a IncomingMessage),
    Delivery(&'a Delivery),
    Postback(&'a PostbackEvent),
    Read(&'a Read),
    AccountLinking(&'a AccountLinking),
    Unknown,
}

impl MessagingEvent {
    pub fn kind(&self) -> MessagingEventKind<'_> {
        if let Some(optin) = &self.optin {
            MessagingEventKind::Authentication(optin)
        } else if let Some(message) = &self.message {
            MessagingEventKind::Message(message)
        } else if let Some(delivery) = &self.delivery {
            MessagingEventKind::Delivery(delivery)
        } else if let Some(postback) = &self.postback {
            MessagingEventKind::Postback(postback)
        } else if let Some(read) = &self.read {
            MessagingEventKind::Read(read)
        } else if let Some(linking) = &self.account_linking {
            MessagingEventKind::AccountLinking(linking)
        } else {
            MessagingEventKind::Unknown
        }
    }

    /// Converts an `account_linking` event with a known status into workflow
    /// form. Returns `None` for other kinds and for unknown statuses.
    pub fn account_linking_event(&self) -> Option<AccountLinkingEvent> {
        let linking = self.account_linking.as_ref()?;
        let status = LinkStatus::parse(&linking.status)?;
        Some(AccountLinkingEvent {
            sender_id: self.sender.id.clone(),
            recipient_id: self.recipient.id.clone(),
            status,
            authorization_code: linking.authorization_code.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(extra: Value) -> MessagingEvent {
        let mut body = json!({
            "sender": {"id": "USER_1"},
            "recipient": {"id": "PAGE_1"},
            "timestamp": 1458692752478i64
        });
        if let (Value::Object(base), Value::Object(extra)) = (&mut body, extra) {
            base.extend(extra);
        }
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn payload_parses_page_entries() {
        let payload: WebhookPayload = serde_json::from_value(json!({
            "object": "page",
            "entry": [{
                "id": "PAGE_1",
                "time": 1458692752478i64,
                "messaging": [{
                    "sender": {"id": "USER_1"},
                    "recipient": {"id": "PAGE_1"},
                    "message": {"mid": "mid.1", "text": "hello"}
                }]
            }]
        }))
        .unwrap();

        assert!(payload.is_page_subscription());
        assert_eq!(payload.entry.len(), 1);
        assert_eq!(payload.entry[0].messaging.len(), 1);
        assert_eq!(
            payload.entry[0].received_at().map(|t| t.timestamp()),
            Some(1458692752)
        );
    }

    #[test]
    fn malformed_event_is_rejected_without_dropping_the_batch() {
        let payload: WebhookPayload = serde_json::from_value(json!({
            "object": "page",
            "entry": [{
                "id": "PAGE_1",
                "messaging": [
                    {"delivery": {"watermark": "1458668856253"}},
                    {
                        "sender": {"id": "USER_1"},
                        "recipient": {"id": "PAGE_1"},
                        "account_linking": {"status": "linked", "authorization_code": "abc"}
                    }
                ]
            }]
        }))
        .unwrap();

        let entry = &payload.entry[0];
        assert_eq!(entry.messaging.len(), 1);
        assert_eq!(entry.rejected.len(), 1);
        assert!(matches!(
            entry.messaging[0].kind(),
            MessagingEventKind::AccountLinking(_)
        ));
    }

    #[test]
    fn payload_without_entries_defaults_to_empty() {
        let payload: WebhookPayload = serde_json::from_value(json!({"object": "user"})).unwrap();

        assert!(!payload.is_page_subscription());
        assert!(payload.entry.is_empty());
    }

    #[test]
    fn classifies_each_kind() {
        assert!(matches!(
            event(json!({"optin": {"ref": "PASS_THROUGH"}})).kind(),
            MessagingEventKind::Authentication(Optin { reference: Some(r) }) if r == "PASS_THROUGH"
        ));
        assert!(matches!(
            event(json!({"message": {"text": "hi"}})).kind(),
            MessagingEventKind::Message(_)
        ));
        assert!(matches!(
            event(json!({"delivery": {"mids": ["m1"], "watermark": 10}})).kind(),
            MessagingEventKind::Delivery(d) if d.watermark == 10
        ));
        assert!(matches!(
            event(json!({"postback": {"payload": "MENU"}})).kind(),
            MessagingEventKind::Postback(_)
        ));
        assert!(matches!(
            event(json!({"read": {"watermark": 5}})).kind(),
            MessagingEventKind::Read(_)
        ));
        assert!(matches!(
            event(json!({"account_linking": {"status": "unlinked"}})).kind(),
            MessagingEventKind::AccountLinking(_)
        ));
        assert_eq!(event(json!({})).kind(), MessagingEventKind::Unknown);
    }

    #[test]
    fn optin_takes_priority_over_message() {
        let e = event(json!({"optin": {}, "message": {"text": "hi"}}));
        assert!(matches!(e.kind(), MessagingEventKind::Authentication(_)));
    }

    #[test]
    fn message_attachments_and_quick_reply_parse() {
        let e = event(json!({"message": {
            "quick_reply": {"payload": "YES"},
            "attachments": [{"type": "image", "payload": {"url": "https://x/y.png"}}]
        }}));

        let MessagingEventKind::Message(message) = e.kind() else {
            panic!("expected message");
        };
        assert_eq!(message.quick_reply.as_ref().map(|q| q.payload.as_str()), Some("YES"));
        assert_eq!(message.attachments[0].kind, "image");
    }

    #[test]
    fn linked_event_converts_to_workflow_event() {
        let e = event(json!({"account_linking": {
            "status": "linked",
            "authorization_code": "CODE"
        }}));

        assert_eq!(
            e.account_linking_event(),
            Some(AccountLinkingEvent::linked("USER_1", "PAGE_1", "CODE"))
        );
    }

    #[test]
    fn unknown_linking_status_does_not_convert() {
        let e = event(json!({"account_linking": {"status": "pending"}}));
        assert_eq!(e.account_linking_event(), None);
    }
}
