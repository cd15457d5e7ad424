//! Outbound messaging: Send API payloads, profile settings and postbacks.

mod payload;
mod postback;
pub mod profile;

pub use payload::{
    account_link_template, account_unlink_template, Attachment, AttachmentType, OutgoingMessage,
    QuickReply, Recipient, SendPayload, SenderAction,
};
pub use postback::{
    build_elements, build_postback, next_element, parse_postback, ParsedPostback, NEXT_PARAM,
};
pub use profile::{Greeting, ProfileField};
