//! Analytics configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::messenger::MessengerConfig;
use crate::domain::analytics::AnalyticsLevel;

/// Analytics configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsConfig {
    /// Threshold for custom app events; `none` disables analytics
    #[serde(default)]
    pub log_level: AnalyticsLevel,
}

impl AnalyticsConfig {
    pub fn is_enabled(&self) -> bool {
        self.log_level != AnalyticsLevel::None
    }

    /// Validate analytics configuration.
    ///
    /// An enabled level needs both the app id and the page id.
    pub fn validate(&self, messenger: &MessengerConfig) -> Result<(), ValidationError> {
        if !self.is_enabled() {
            return Ok(());
        }
        if messenger.app_id.as_deref().map_or(true, str::is_empty) {
            return Err(ValidationError::AnalyticsNotConfigured(
                self.log_level.as_str(),
                "MESSENGER__APP_ID",
            ));
        }
        if messenger.page_id.as_deref().map_or(true, str::is_empty) {
            return Err(ValidationError::AnalyticsNotConfigured(
                self.log_level.as_str(),
                "MESSENGER__PAGE_ID",
            ));
        }
        Ok(())
    }
}
