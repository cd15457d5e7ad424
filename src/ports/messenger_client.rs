//! Messenger client port for the Graph Send and profile APIs.
//!
//! Implementations authenticate every call with the page access token. Bodies
//! are built by `domain::messaging`; this port only moves them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::messaging::{profile, Greeting, ProfileField, SendPayload};

/// Port for outbound calls to the Messenger Platform.
#[async_trait]
pub trait MessengerClient: Send + Sync {
    /// Send a message or sender action.
    async fn send(&self, payload: &SendPayload) -> Result<SendReceipt, MessengerError>;

    /// Fetch the public profile of a page-scoped user.
    async fn get_user_profile(&self, user_id: &str) -> Result<UserProfile, MessengerError>;

    /// Resolve an account linking token to the page-scoped id it was issued for.
    async fn get_account_linking_endpoint(
        &self,
        account_linking_token: &str,
    ) -> Result<AccountLinkingEndpoint, MessengerError>;

    async fn set_thread_settings(&self, settings: &Value) -> Result<Value, MessengerError>;

    async fn clear_thread_settings(&self) -> Result<Value, MessengerError>;

    async fn set_messenger_profile(&self, profile: &Value) -> Result<Value, MessengerError>;

    async fn remove_messenger_profile(
        &self,
        fields: &[ProfileField],
    ) -> Result<Value, MessengerError>;

    /// Add (`add = true`) or remove a domain from the page whitelist.
    async fn whitelist_domain(&self, domain: &str, add: bool) -> Result<Value, MessengerError> {
        self.set_thread_settings(&profile::domain_whitelisting(domain, add))
            .await
    }

    async fn set_get_started(&self, payload: &str) -> Result<Value, MessengerError> {
        self.set_messenger_profile(&profile::get_started(payload))
            .await
    }

    async fn remove_get_started(&self) -> Result<Value, MessengerError> {
        self.remove_messenger_profile(&[ProfileField::GetStarted])
            .await
    }

    async fn set_greeting_text(&self, greetings: &[Greeting]) -> Result<Value, MessengerError> {
        self.set_messenger_profile(&profile::greeting(greetings))
            .await
    }

    async fn remove_greeting_text(&self) -> Result<Value, MessengerError> {
        self.remove_messenger_profile(&[ProfileField::Greeting])
            .await
    }
}

/// Successful Send API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendReceipt {
    pub recipient_id: String,

    /// Absent for sender actions.
    #[serde(default)]
    pub message_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub profile_pic: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub timezone: Option<f64>,
    #[serde(default)]
    pub gender: Option<String>,
}

/// Response of the account linking token lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountLinkingEndpoint {
    pub id: String,
    pub recipient: String,
}

/// Errors from the Messenger Platform or the transport to it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessengerError {
    /// The platform answered with a non-success status.
    #[error("Graph API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// The response body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A setting the call needs was not configured.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

impl MessengerError {
    pub fn is_retryable(&self) -> bool {
        match self {
            MessengerError::Network(_) => true,
            MessengerError::Api { status, .. } => *status == 429 || *status >= 500,
            MessengerError::Decode(_) | MessengerError::NotConfigured(_) => false,
        }
    }
}

impl From<MessengerError> for DomainError {
    fn from(err: MessengerError) -> Self {
        DomainError::new(ErrorCode::SendFailed, err.to_string())
    }
}
