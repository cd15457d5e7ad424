use serde::{Deserialize, Serialize};
use serde_json::Value;

/// App activity wrapping one custom analytics event.
///
/// Sent form-encoded to `{app_id}/activities`; list-valued fields are
/// JSON-encoded strings.
#[derive(Debug, Clone, PartialEq)]
pub struct AppActivity {
    pub custom_events: Vec<Value>,
    pub page_id: String,
    pub page_scoped_user_id: String,
}

impl AppActivity {
    pub const EVENT: &'static str = "CUSTOM_APP_EVENTS";
    pub const EXTINFO_VERSION: &'static str = "mb1";

    pub fn new(
        custom_event: Value,
        page_id: impl Into<String>,
        page_scoped_user_id: impl Into<String>,
    ) -> Self {
        Self {
            custom_events: vec![custom_event],
            page_id: page_id.into(),
            page_scoped_user_id: page_scoped_user_id.into(),
        }
    }

    /// Form fields in submission order.
    pub fn to_form(&self) -> Result<Vec<(&'static str, String)>, serde_json::Error> {
        Ok(vec![
            ("event", Self::EVENT.to_string()),
            ("custom_events", serde_json::to_string(&self.custom_events)?),
            ("advertiser_tracking_enabled", "0".to_string()),
            ("application_tracking_enabled", "0".to_string()),
            ("extinfo", serde_json::to_string(&[Self::EXTINFO_VERSION])?),
            ("page_id", self.page_id.clone()),
            ("page_scoped_user_id", self.page_scoped_user_id.clone()),
        ])
    }
}

/// Acknowledgement returned by the activities endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityAck {
    #[serde(default)]
    pub success: bool,
}

/// Result of recording an analytics event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsOutcome {
    /// Filtered out by level; nothing was built or sent.
    Skipped,
    Sent(ActivityAck),
}

impl AnalyticsOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, AnalyticsOutcome::Skipped)
    }
}
