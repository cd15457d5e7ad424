//! Graph API adapter.
//!
//! Implements `MessengerClient` and `ActivitySender` over the Facebook Graph
//! HTTP API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GraphConfig::new(page_access_token).with_app_id(app_id);
//! let client = GraphApiClient::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::analytics::{ActivityAck, AppActivity};
use crate::domain::messaging::{profile, ProfileField, SendPayload};
use crate::ports::{
    AccountLinkingEndpoint, ActivitySender, MessengerClient, MessengerError, SendReceipt,
    UserProfile,
};

/// Default Graph API prefix, including version and trailing slash.
pub const DEFAULT_API_BASE_URL: &str = "https://graph.facebook.com/v2.6/";

const PROFILE_FIELDS: &str = "first_name,last_name,profile_pic,locale,timezone,gender";

/// Graph API configuration.
pub struct GraphConfig {
    /// Page access token sent as `access_token` on page calls.
    page_access_token: SecretString,

    /// URL prefix every path is appended to. Must end with `/`.
    api_base_url: String,

    /// App id, required for analytics activities.
    app_id: Option<String>,

    request_timeout: Duration,
}

impl GraphConfig {
    pub fn new(page_access_token: impl Into<String>) -> Self {
        Self {
            page_access_token: SecretString::new(page_access_token.into()),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            app_id: None,
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Messenger Platform client backed by `reqwest`.
pub struct GraphApiClient {
    config: GraphConfig,
    http_client: reqwest::Client,
}

impl GraphApiClient {
    pub fn new(config: GraphConfig) -> Result<Self, MessengerError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| MessengerError::Network(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base_url, path)
    }

    fn with_token(&self, request: RequestBuilder) -> RequestBuilder {
        request.query(&[("access_token", self.config.page_access_token.expose_secret())])
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T, MessengerError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(operation, error = %e, "Graph API request failed");
            MessengerError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                operation,
                status = status.as_u16(),
                error = %body,
                "Graph API call failed"
            );
            return Err(MessengerError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response.json().await.map_err(|e| {
            tracing::warn!(operation, error = %e, "Failed to parse Graph API response");
            MessengerError::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl MessengerClient for GraphApiClient {
    async fn send(&self, payload: &SendPayload) -> Result<SendReceipt, MessengerError> {
        let request = self.with_token(self.http_client.post(self.url("me/messages")).json(payload));
        let receipt: SendReceipt = self.execute("send", request).await?;

        match &receipt.message_id {
            Some(message_id) => tracing::debug!(
                recipient_id = %receipt.recipient_id,
                message_id = %message_id,
                "Sent message"
            ),
            None => tracing::debug!(recipient_id = %receipt.recipient_id, "Called Send API"),
        }
        Ok(receipt)
    }

    async fn get_user_profile(&self, user_id: &str) -> Result<UserProfile, MessengerError> {
        let request = self.with_token(
            self.http_client
                .get(self.url(&urlencoding::encode(user_id)))
                .query(&[("fields", PROFILE_FIELDS)]),
        );
        self.execute("get_user_profile", request).await
    }

    async fn get_account_linking_endpoint(
        &self,
        account_linking_token: &str,
    ) -> Result<AccountLinkingEndpoint, MessengerError> {
        let request = self.with_token(self.http_client.get(self.url("me")).query(&[
            ("fields", "recipient"),
            ("account_linking_token", account_linking_token),
        ]));
        self.execute("get_account_linking_endpoint", request).await
    }

    async fn set_thread_settings(&self, settings: &Value) -> Result<Value, MessengerError> {
        let request =
            self.with_token(self.http_client.post(self.url("me/thread_settings")).json(settings));
        self.execute("set_thread_settings", request).await
    }

    async fn clear_thread_settings(&self) -> Result<Value, MessengerError> {
        let request = self.with_token(
            self.http_client
                .delete(self.url("me/thread_settings"))
                .json(&profile::clear_call_to_actions()),
        );
        self.execute("clear_thread_settings", request).await
    }

    async fn set_messenger_profile(&self, body: &Value) -> Result<Value, MessengerError> {
        let request =
            self.with_token(self.http_client.post(self.url("me/messenger_profile")).json(body));
        self.execute("set_messenger_profile", request).await
    }

    async fn remove_messenger_profile(
        &self,
        fields: &[ProfileField],
    ) -> Result<Value, MessengerError> {
        let request = self.with_token(
            self.http_client
                .delete(self.url("me/messenger_profile"))
                .json(&profile::remove_fields(fields)),
        );
        self.execute("remove_messenger_profile", request).await
    }
}

#[async_trait]
impl ActivitySender for GraphApiClient {
    async fn send_activity(&self, activity: &AppActivity) -> Result<ActivityAck, MessengerError> {
        let app_id = self
            .config
            .app_id
            .as_deref()
            .ok_or(MessengerError::NotConfigured("app_id"))?;
        let form = activity
            .to_form()
            .map_err(|e| MessengerError::Decode(e.to_string()))?;

        let request = self
            .http_client
            .post(self.url(&format!("{}/activities", app_id)))
            .form(&form);
        self.execute("send_activity", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::messaging::Greeting;
    use serde_json::json;
    use wiremock::matchers::{body_json, body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TOKEN: &str = "page_token";

    fn client(server: &MockServer) -> GraphApiClient {
        let config = GraphConfig::new(TOKEN)
            .with_base_url(format!("{}/", server.uri()))
            .with_app_id("APP");
        GraphApiClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn send_posts_payload_with_token() {
        let mock_server = MockServer::start().await;
        let payload = SendPayload::text("U1", "hello", None);

        Mock::given(method("POST"))
            .and(path("/me/messages"))
            .and(query_param("access_token", TOKEN))
            .and(body_json(json!({"recipient": {"id": "U1"}, "message": {"text": "hello"}})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"recipient_id": "U1", "message_id": "mid.1"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let receipt = client(&mock_server).send(&payload).await.unwrap();

        assert_eq!(receipt.recipient_id, "U1");
        assert_eq!(receipt.message_id.as_deref(), Some("mid.1"));
    }

    #[tokio::test]
    async fn send_maps_error_status_to_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/me/messages"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string(r#"{"error":{"message":"Invalid"}}"#),
            )
            .mount(&mock_server)
            .await;

        let err = client(&mock_server)
            .send(&SendPayload::typing_on("U1"))
            .await
            .unwrap_err();

        assert!(matches!(err, MessengerError::Api { status: 400, ref body } if body.contains("Invalid")));
    }

    #[tokio::test]
    async fn undecodable_response_is_decode_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/me/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let err = client(&mock_server)
            .send(&SendPayload::mark_seen("U1"))
            .await
            .unwrap_err();

        assert!(matches!(err, MessengerError::Decode(_)));
    }

    #[tokio::test]
    async fn get_user_profile_requests_profile_fields() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/U1"))
            .and(query_param("fields", PROFILE_FIELDS))
            .and(query_param("access_token", TOKEN))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"first_name": "Ada", "timezone": -7})),
            )
            .mount(&mock_server)
            .await;

        let profile = client(&mock_server).get_user_profile("U1").await.unwrap();

        assert_eq!(profile.first_name.as_deref(), Some("Ada"));
        assert_eq!(profile.timezone, Some(-7.0));
    }

    #[tokio::test]
    async fn get_user_profile_escapes_user_id() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/a%2Fb%3Fc"))
            .and(query_param("fields", PROFILE_FIELDS))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"first_name": "Ada"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let profile = client(&mock_server).get_user_profile("a/b?c").await.unwrap();

        assert_eq!(profile.first_name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn account_linking_endpoint_passes_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/me"))
            .and(query_param("fields", "recipient"))
            .and(query_param("account_linking_token", "ALT"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": "PAGE", "recipient": "S1"})),
            )
            .mount(&mock_server)
            .await;

        let endpoint = client(&mock_server)
            .get_account_linking_endpoint("ALT")
            .await
            .unwrap();

        assert_eq!(endpoint.recipient, "S1");
    }

    #[tokio::test]
    async fn whitelist_domain_posts_thread_setting() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/me/thread_settings"))
            .and(body_json(json!({
                "setting_type": "domain_whitelisting",
                "whitelisted_domains": ["example.com"],
                "domain_action_type": "add"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "ok"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = client(&mock_server)
            .whitelist_domain("example.com", true)
            .await
            .unwrap();

        assert_eq!(result["result"], "ok");
    }

    #[tokio::test]
    async fn clear_thread_settings_deletes_call_to_actions() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/me/thread_settings"))
            .and(body_json(json!({
                "setting_type": "call_to_actions",
                "thread_state": "existing_thread"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "ok"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        client(&mock_server).clear_thread_settings().await.unwrap();
    }

    #[tokio::test]
    async fn profile_helpers_target_messenger_profile() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/me/messenger_profile"))
            .and(body_json(json!({"greeting": [{"locale": "default", "text": "Hi"}]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "success"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/me/messenger_profile"))
            .and(body_json(json!({"fields": ["get_started"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "success"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client(&mock_server);
        client
            .set_greeting_text(&[Greeting::default_locale("Hi")])
            .await
            .unwrap();
        client.remove_get_started().await.unwrap();
    }

    #[tokio::test]
    async fn send_activity_posts_form_to_app_activities() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/APP/activities"))
            .and(body_string_contains("event=CUSTOM_APP_EVENTS"))
            .and(body_string_contains("page_scoped_user_id=PSID"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let activity = AppActivity::new(json!({"_eventName": "linked"}), "PAGE", "PSID");
        let ack = client(&mock_server).send_activity(&activity).await.unwrap();

        assert!(ack.success);
    }

    #[tokio::test]
    async fn send_activity_requires_app_id() {
        let mock_server = MockServer::start().await;
        let client = GraphApiClient::new(
            GraphConfig::new(TOKEN).with_base_url(format!("{}/", mock_server.uri())),
        )
        .unwrap();

        let activity = AppActivity::new(json!({"_eventName": "x"}), "PAGE", "PSID");
        let err = client.send_activity(&activity).await.unwrap_err();

        assert_eq!(err, MessengerError::NotConfigured("app_id"));
    }
}
