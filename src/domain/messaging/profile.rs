//! Messenger profile and thread settings bodies.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Messenger profile fields that can be removed by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    GetStarted,
    Greeting,
    PersistentMenu,
    WhitelistedDomains,
    AccountLinkingUrl,
}

/// Localized greeting shown before a conversation starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Greeting {
    pub locale: String,
    pub text: String,
}

impl Greeting {
    pub fn default_locale(text: impl Into<String>) -> Self {
        Self {
            locale: "default".to_string(),
            text: text.into(),
        }
    }
}

pub fn get_started(payload: impl Into<String>) -> Value {
    json!({ "get_started": { "payload": payload.into() } })
}

pub fn greeting(greetings: &[Greeting]) -> Value {
    json!({ "greeting": greetings })
}

pub fn remove_fields(fields: &[ProfileField]) -> Value {
    json!({ "fields": fields })
}

/// Thread settings body adding or removing a whitelisted domain.
pub fn domain_whitelisting(domain: &str, add: bool) -> Value {
    json!({
        "setting_type": "domain_whitelisting",
        "whitelisted_domains": [domain],
        "domain_action_type": if add { "add" } else { "remove" },
    })
}

/// Thread settings body clearing the existing-thread call to actions.
pub fn clear_call_to_actions() -> Value {
    json!({
        "setting_type": "call_to_actions",
        "thread_state": "existing_thread",
    })
}
