//! Inbound webhook domain: payload model, classification and signatures.

mod errors;
mod event;
mod signature;

pub use errors::WebhookError;
pub use event::{
    AccountLinking, Delivery, IncomingAttachment, IncomingMessage, MessagingEvent,
    MessagingEventKind, Optin, PageEntry, Participant, PostbackEvent, QuickReplyPayload, Read,
    WebhookPayload, PAGE_OBJECT,
};
pub use signature::{
    SignatureAlgorithm, SignatureHeader, SignatureVerifier, SIGNATURE_256_HEADER,
    SIGNATURE_HEADER,
};

#[cfg(test)]
pub use signature::compute_test_signature;
