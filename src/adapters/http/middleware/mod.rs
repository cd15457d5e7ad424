//! HTTP middleware for axum.
//!
//! This module contains middleware layers for cross-cutting concerns:
//!
//! - `signature` - Webhook body signature verification

pub mod signature;

pub use signature::{verify_signature, SignatureCheck, MAX_WEBHOOK_BODY_BYTES};
