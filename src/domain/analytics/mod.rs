//! Analytics domain: level filtering and the app activity wire form.

mod activity;
mod level;

pub use activity::{ActivityAck, AnalyticsOutcome, AppActivity};
pub use level::AnalyticsLevel;
