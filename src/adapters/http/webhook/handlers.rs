//! HTTP handlers for the Messenger webhook.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use super::dto::{ErrorResponse, VerifyQuery};
use crate::application::handlers::WebhookDispatcher;
use crate::domain::foundation::ErrorCode;
use crate::domain::webhook::{WebhookError, WebhookPayload};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for webhook handlers.
#[derive(Clone)]
pub struct WebhookAppState {
    pub dispatcher: Arc<WebhookDispatcher>,
    pub validation_token: Arc<SecretString>,
}

impl WebhookAppState {
    pub fn new(dispatcher: Arc<WebhookDispatcher>, validation_token: impl Into<String>) -> Self {
        Self {
            dispatcher,
            validation_token: Arc::new(SecretString::new(validation_token.into())),
        }
    }

    fn matches_token(&self, token: &str) -> bool {
        let expected = self.validation_token.expose_secret().as_bytes();
        expected.len() == token.len() && bool::from(expected.ct_eq(token.as_bytes()))
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /webhook - Subscription handshake
///
/// Echoes `hub.challenge` when the mode is `subscribe` and the verify token
/// matches the configured validation token.
pub async fn verify_webhook(
    State(state): State<WebhookAppState>,
    Query(query): Query<VerifyQuery>,
) -> Response {
    let token_ok = query
        .verify_token
        .as_deref()
        .map(|token| state.matches_token(token))
        .unwrap_or(false);

    if query.is_subscribe() && token_ok {
        tracing::debug!("Validating webhook");
        return (StatusCode::OK, query.challenge.unwrap_or_default()).into_response();
    }

    tracing::error!("Failed validation. Make sure the validation tokens match.");
    StatusCode::FORBIDDEN.into_response()
}

/// POST /webhook - Event delivery
///
/// Always acknowledges a parseable delivery with 200, whatever the handlers
/// make of it.
pub async fn receive_webhook(
    State(state): State<WebhookAppState>,
    body: Bytes,
) -> Result<StatusCode, WebhookApiError> {
    let payload: WebhookPayload = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "Failed to parse webhook payload");
        WebhookError::ParseError(e.to_string())
    })?;

    let summary = state.dispatcher.dispatch(&payload).await;
    tracing::debug!(
        object = %payload.object,
        events = summary.events,
        link_failures = summary.link_failures,
        handler_errors = summary.handler_errors,
        rejected_events = summary.rejected_events,
        "Webhook delivery processed"
    );

    Ok(StatusCode::OK)
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts webhook errors to HTTP responses.
#[derive(Debug)]
pub struct WebhookApiError(pub WebhookError);

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        let code = match &self.0 {
            WebhookError::ParseError(_) => ErrorCode::InvalidWebhookPayload,
            _ => ErrorCode::InvalidWebhookSignature,
        };
        let body = ErrorResponse::new(code.to_string(), self.0.to_string());
        (self.0.status_code(), Json(body)).into_response()
    }
}
