//! Webhook signature middleware for axum.
//!
//! Buffers the request body, checks it against `X-Hub-Signature-256` or
//! `X-Hub-Signature`, then hands the body on unchanged.
//!
//! Requests without a body (`GET`, `HEAD`) pass through unchecked, so the
//! subscription handshake works on a signed router. Paths listed as ignored
//! are matched against the path seen by the router the layer is applied to,
//! i.e. without any prefix it is nested under.
//!
//! # Example
//!
//! ```ignore
//! let check = SignatureCheck::new(SignatureVerifier::new(app_secret), ["/health"]);
//!
//! let app = webhook_routes()
//!     .with_state(state)
//!     .layer(middleware::from_fn_with_state(check, verify_signature));
//! ```

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::adapters::http::webhook::WebhookApiError;
use crate::domain::webhook::{
    SignatureVerifier, WebhookError, SIGNATURE_256_HEADER, SIGNATURE_HEADER,
};

/// Largest body the middleware will buffer.
pub const MAX_WEBHOOK_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Middleware state.
#[derive(Clone)]
pub struct SignatureCheck {
    verifier: Arc<SignatureVerifier>,
    ignored_paths: Arc<[String]>,
}

impl SignatureCheck {
    pub fn new<I, S>(verifier: SignatureVerifier, ignored_paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            verifier: Arc::new(verifier),
            ignored_paths: ignored_paths.into_iter().map(Into::into).collect(),
        }
    }

    fn is_ignored(&self, path: &str) -> bool {
        self.ignored_paths.iter().any(|p| p == path)
    }
}

/// Rejects requests whose body signature does not verify.
pub async fn verify_signature(
    State(check): State<SignatureCheck>,
    request: Request,
    next: Next,
) -> Response {
    if matches!(*request.method(), Method::GET | Method::HEAD) {
        return next.run(request).await;
    }

    let path = request.uri().path().to_string();
    if check.is_ignored(&path) {
        tracing::debug!(path = %path, "Ignoring signature verification");
        return next.run(request).await;
    }

    let (parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, MAX_WEBHOOK_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "Failed to read webhook body");
            return WebhookApiError(WebhookError::ParseError(e.to_string())).into_response();
        }
    };

    let verified = check.verifier.verify(
        header_value(&parts.headers, SIGNATURE_256_HEADER),
        header_value(&parts.headers, SIGNATURE_HEADER),
        &bytes,
    );
    if let Err(err) = verified {
        tracing::warn!(path = %path, error = %err, "Couldn't validate the request signature");
        return WebhookApiError(err).into_response();
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
