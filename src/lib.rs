//! Messenger Link - Messenger Platform webhook receiver and account linking
//!
//! This crate receives Messenger webhook deliveries, talks to the Graph API
//! Send and Profile endpoints, and keeps page-scoped senders bound to
//! application users through the account linking workflow.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
