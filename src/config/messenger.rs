//! Messenger Platform credentials and Graph API settings

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::graph::DEFAULT_API_BASE_URL;

/// Messenger Platform configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MessengerConfig {
    /// App secret used to sign webhook deliveries
    pub app_secret: String,

    /// Token echoed back during the subscription handshake
    pub validation_token: String,

    /// Page access token for the Send and Profile APIs
    pub page_access_token: String,

    /// Graph API base URL, including version
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// App id, required for analytics
    pub app_id: Option<String>,

    /// Page id, required for analytics
    pub page_id: Option<String>,

    /// Outbound request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl MessengerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate messenger configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.app_secret.is_empty() {
            return Err(ValidationError::MissingRequired("MESSENGER__APP_SECRET"));
        }
        if self.validation_token.is_empty() {
            return Err(ValidationError::MissingRequired("MESSENGER__VALIDATION_TOKEN"));
        }
        if self.page_access_token.is_empty() {
            return Err(ValidationError::MissingRequired("MESSENGER__PAGE_ACCESS_TOKEN"));
        }

        let scheme_ok = self.api_base_url.starts_with("https://")
            || self.api_base_url.starts_with("http://");
        if !scheme_ok || !self.api_base_url.ends_with('/') {
            return Err(ValidationError::InvalidApiBaseUrl);
        }

        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for MessengerConfig {
    fn default() -> Self {
        Self {
            app_secret: String::new(),
            validation_token: String::new(),
            page_access_token: String::new(),
            api_base_url: default_api_base_url(),
            app_id: None,
            page_id: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout() -> u64 {
    30
}
