//! Outbound Send API payloads.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Message recipient, addressed by page-scoped id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub id: String,
}

/// Attachment kinds accepted by the Send API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentType {
    Image,
    Audio,
    Video,
    File,
    Template,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(rename = "type")]
    pub kind: AttachmentType,
    pub payload: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickReply {
    pub content_type: String,
    pub title: String,
    pub payload: String,
}

impl QuickReply {
    pub fn text(title: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            content_type: "text".to_string(),
            title: title.into(),
            payload: payload.into(),
        }
    }
}

/// The `message` object of a send request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quick_replies: Option<Vec<QuickReply>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenderAction {
    MarkSeen,
    TypingOn,
    TypingOff,
}

/// Body of a `me/messages` request: either a message or a sender action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendPayload {
    pub recipient: Recipient,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<OutgoingMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_action: Option<SenderAction>,
}

impl SendPayload {
    pub fn message(recipient_id: impl Into<String>, message: OutgoingMessage) -> Self {
        Self {
            recipient: Recipient {
                id: recipient_id.into(),
            },
            message: Some(message),
            sender_action: None,
        }
    }

    pub fn text(
        recipient_id: impl Into<String>,
        text: impl Into<String>,
        metadata: Option<String>,
    ) -> Self {
        Self::message(
            recipient_id,
            OutgoingMessage {
                text: Some(text.into()),
                metadata,
                ..Default::default()
            },
        )
    }

    pub fn attachment(recipient_id: impl Into<String>, kind: AttachmentType, payload: Value) -> Self {
        Self::message(
            recipient_id,
            OutgoingMessage {
                attachment: Some(Attachment { kind, payload }),
                ..Default::default()
            },
        )
    }

    pub fn image(recipient_id: impl Into<String>, payload: Value) -> Self {
        Self::attachment(recipient_id, AttachmentType::Image, payload)
    }

    /// GIFs travel as image attachments.
    pub fn gif(recipient_id: impl Into<String>, payload: Value) -> Self {
        Self::attachment(recipient_id, AttachmentType::Image, payload)
    }

    pub fn audio(recipient_id: impl Into<String>, payload: Value) -> Self {
        Self::attachment(recipient_id, AttachmentType::Audio, payload)
    }

    pub fn video(recipient_id: impl Into<String>, payload: Value) -> Self {
        Self::attachment(recipient_id, AttachmentType::Video, payload)
    }

    pub fn file(recipient_id: impl Into<String>, payload: Value) -> Self {
        Self::attachment(recipient_id, AttachmentType::File, payload)
    }

    /// Any template attachment; `payload` carries its `template_type`.
    pub fn template(recipient_id: impl Into<String>, payload: Value) -> Self {
        Self::attachment(recipient_id, AttachmentType::Template, payload)
    }

    pub fn button(recipient_id: impl Into<String>, payload: Value) -> Self {
        Self::template(recipient_id, payload)
    }

    /// Sends a template containing an account link or unlink button.
    pub fn account_linking(recipient_id: impl Into<String>, payload: Value) -> Self {
        Self::template(recipient_id, payload)
    }

    pub fn generic(recipient_id: impl Into<String>, elements: Vec<Value>) -> Self {
        Self::template(
            recipient_id,
            json!({
                "template_type": "generic",
                "elements": elements,
            }),
        )
    }

    pub fn quick_reply(
        recipient_id: impl Into<String>,
        text: impl Into<String>,
        replies: Vec<QuickReply>,
    ) -> Self {
        Self::message(
            recipient_id,
            OutgoingMessage {
                text: Some(text.into()),
                quick_replies: Some(replies),
                ..Default::default()
            },
        )
    }

    pub fn sender_action(recipient_id: impl Into<String>, action: SenderAction) -> Self {
        Self {
            recipient: Recipient {
                id: recipient_id.into(),
            },
            message: None,
            sender_action: Some(action),
        }
    }

    pub fn mark_seen(recipient_id: impl Into<String>) -> Self {
        Self::sender_action(recipient_id, SenderAction::MarkSeen)
    }

    pub fn typing_on(recipient_id: impl Into<String>) -> Self {
        Self::sender_action(recipient_id, SenderAction::TypingOn)
    }

    pub fn typing_off(recipient_id: impl Into<String>) -> Self {
        Self::sender_action(recipient_id, SenderAction::TypingOff)
    }
}

/// Button template payload offering to link an account at `url`.
pub fn account_link_template(text: impl Into<String>, url: impl Into<String>) -> Value {
    json!({
        "template_type": "button",
        "text": text.into(),
        "buttons": [{ "type": "account_link", "url": url.into() }],
    })
}

/// Button template payload offering to unlink the current account.
pub fn account_unlink_template(text: impl Into<String>) -> Value {
    json!({
        "template_type": "button",
        "text": text.into(),
        "buttons": [{ "type": "account_unlink" }],
    })
}
