//! Domain layer - Core messenger and account linking logic.
//!
//! This layer has no dependencies on infrastructure concerns.

pub mod analytics;
pub mod foundation;
pub mod linking;
pub mod messaging;
pub mod webhook;
