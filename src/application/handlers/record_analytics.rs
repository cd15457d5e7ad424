//! AnalyticsRecorder - Level-filtered custom app events.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::analytics::{AnalyticsLevel, AnalyticsOutcome, AppActivity};
use crate::ports::{ActivitySender, MessengerError};

/// Records custom analytics events for page-scoped users.
///
/// Events are filtered against the configured threshold before anything is
/// built, so `build` closures may be arbitrarily expensive.
pub struct AnalyticsRecorder {
    sender: Arc<dyn ActivitySender>,
    threshold: AnalyticsLevel,
    page_id: String,
}

impl AnalyticsRecorder {
    pub fn new(
        sender: Arc<dyn ActivitySender>,
        threshold: AnalyticsLevel,
        page_id: impl Into<String>,
    ) -> Self {
        Self {
            sender,
            threshold,
            page_id: page_id.into(),
        }
    }

    pub fn threshold(&self) -> AnalyticsLevel {
        self.threshold
    }

    /// Records an event at raw `level`.
    ///
    /// Returns `Skipped` without calling `build` when the threshold is
    /// `None`, the level is `None` or unknown, or the level is more verbose
    /// than the threshold. `build` must return a JSON object carrying
    /// `_eventName`.
    pub async fn record<F>(
        &self,
        level: u8,
        page_scoped_user_id: &str,
        build: F,
    ) -> Result<AnalyticsOutcome, MessengerError>
    where
        F: FnOnce() -> Value,
    {
        if !self.threshold.admits(level) {
            tracing::trace!(level, threshold = %self.threshold, "Analytics event skipped");
            return Ok(AnalyticsOutcome::Skipped);
        }

        let activity = AppActivity::new(build(), self.page_id.clone(), page_scoped_user_id);
        let ack = self.sender.send_activity(&activity).await?;

        tracing::debug!(level, success = ack.success, "Analytics event sent");
        Ok(AnalyticsOutcome::Sent(ack))
    }
}
