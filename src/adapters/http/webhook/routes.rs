//! Axum router configuration for the webhook endpoints.

use axum::{middleware, routing::get, Router};

use super::handlers::{receive_webhook, verify_webhook, WebhookAppState};
use crate::adapters::http::middleware::{verify_signature, SignatureCheck};

/// Create the webhook routes.
///
/// # Routes
/// - `GET /webhook` - Subscription handshake
/// - `POST /webhook` - Event delivery
pub fn webhook_routes() -> Router<WebhookAppState> {
    Router::new().route("/webhook", get(verify_webhook).post(receive_webhook))
}

/// Create the complete webhook router.
///
/// With `signature` set, every request carrying a body is verified before it
/// reaches a handler.
///
/// # Example
///
/// ```ignore
/// let app = Router::new().nest("/fb", webhook_router(state, Some(check)));
/// ```
pub fn webhook_router(state: WebhookAppState, signature: Option<SignatureCheck>) -> Router {
    let router = webhook_routes().with_state(state);
    match signature {
        Some(check) => router.layer(middleware::from_fn_with_state(check, verify_signature)),
        None => router,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryRecordStore;
    use crate::application::handlers::{AccountLinkHandler, LinkStores, WebhookDispatcher};
    use crate::domain::linking::{LinkStatus, LinkingRecord, MappingRecord};
    use crate::domain::webhook::{compute_test_signature, SignatureVerifier, SIGNATURE_HEADER};
    use crate::ports::{NoopMessageHandler, RecordStore};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    const APP_SECRET: &str = "app_secret";
    const VALIDATION_TOKEN: &str = "validation_token";

    struct TestApp {
        router: Router,
        linking: Arc<InMemoryRecordStore<LinkingRecord>>,
        mappings: Arc<InMemoryRecordStore<MappingRecord>>,
    }

    fn app(verify: bool, ignored: &[&str]) -> TestApp {
        let linking = Arc::new(InMemoryRecordStore::new());
        let mappings = Arc::new(InMemoryRecordStore::new());
        let account_link = Arc::new(AccountLinkHandler::with_default_field(LinkStores {
            linking: linking.clone(),
            users: Arc::new(InMemoryRecordStore::new()),
            mappings: mappings.clone(),
        }));
        let dispatcher = Arc::new(WebhookDispatcher::new(
            account_link,
            Arc::new(NoopMessageHandler),
        ));
        let state = WebhookAppState::new(dispatcher, VALIDATION_TOKEN);
        let check = verify.then(|| {
            SignatureCheck::new(
                SignatureVerifier::new(APP_SECRET),
                ignored.iter().map(|p| p.to_string()),
            )
        });

        TestApp {
            router: webhook_router(state, check),
            linking,
            mappings,
        }
    }

    fn post(body: &str, signature: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/webhook")
            .header("content-type", "application/json");
        if let Some(signature) = signature {
            builder = builder.header(SIGNATURE_HEADER, signature);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn signed(body: &str) -> Request<Body> {
        let signature = compute_test_signature(APP_SECRET, body.as_bytes());
        post(body, Some(&signature))
    }

    // ───────────────────────────────────────────────────────────────
    // Handshake
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn handshake_echoes_challenge() {
        let response = app(true, &[])
            .router
            .oneshot(
                Request::builder()
                    .uri("/webhook?hub.mode=subscribe&hub.verify_token=validation_token&hub.challenge=CHALLENGE")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"CHALLENGE");
    }

    #[tokio::test]
    async fn handshake_with_wrong_token_is_forbidden() {
        let response = app(true, &[])
            .router
            .oneshot(
                Request::builder()
                    .uri("/webhook?hub.mode=subscribe&hub.verify_token=nope&hub.challenge=C")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn handshake_with_wrong_mode_is_forbidden() {
        let response = app(false, &[])
            .router
            .oneshot(
                Request::builder()
                    .uri("/webhook?hub.mode=unsubscribe&hub.verify_token=validation_token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    // ───────────────────────────────────────────────────────────────
    // Delivery
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn signed_delivery_is_acknowledged() {
        let response = app(true, &[])
            .router
            .oneshot(signed(r#"{"object":"page","entry":[]}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_signature_is_forbidden() {
        let response = app(true, &[])
            .router
            .oneshot(post(r#"{"object":"page","entry":[]}"#, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn bad_signature_is_forbidden() {
        let response = app(true, &[])
            .router
            .oneshot(post(
                r#"{"object":"page","entry":[]}"#,
                Some("sha1=0000000000000000000000000000000000000000"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn ignored_path_skips_signature_check() {
        let response = app(true, &["/webhook"])
            .router
            .oneshot(post(r#"{"object":"page","entry":[]}"#, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unverified_router_accepts_unsigned_delivery() {
        let response = app(false, &[])
            .router
            .oneshot(post(r#"{"object":"page","entry":[]}"#, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let response = app(true, &[])
            .router
            .oneshot(signed("not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn failed_link_still_acknowledged() {
        let app = app(true, &[]);
        let body = r#"{"object":"page","entry":[{"id":"P1","time":1,"messaging":[
            {"sender":{"id":"S1"},"recipient":{"id":"P1"},
             "account_linking":{"status":"linked","authorization_code":"missing"}}]}]}"#;

        let response = app.router.oneshot(signed(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(app.mappings.is_empty().await);
    }

    #[tokio::test]
    async fn linked_delivery_runs_workflow_before_ack() {
        let app = app(true, &[]);
        app.linking
            .add(LinkingRecord::new("abc").with_attribute("userid", "U1"))
            .await
            .unwrap();
        let body = r#"{"object":"page","entry":[{"id":"P1","time":1,"messaging":[
            {"sender":{"id":"S1"},"recipient":{"id":"P1"},
             "account_linking":{"status":"linked","authorization_code":"abc"}}]}]}"#;

        let response = app.router.oneshot(signed(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let mapping = app.mappings.get_by_id("S1").await.unwrap().unwrap();
        assert_eq!(mapping.status, LinkStatus::Linked);
        assert!(app.linking.is_empty().await);
    }
}
