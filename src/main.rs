//! Messenger webhook server.
//!
//! Wires the Graph API client, in-memory record stores and the account
//! linking workflow behind the webhook router, mounted under `/fb`.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use messenger_link::adapters::http::{webhook_router, SignatureCheck, WebhookAppState};
use messenger_link::adapters::{GraphApiClient, GraphConfig, InMemoryRecordStore};
use messenger_link::application::handlers::{
    AccountLinkHandler, AnalyticsRecorder, LinkStores, WebhookDispatcher,
};
use messenger_link::config::AppConfig;
use messenger_link::domain::webhook::SignatureVerifier;
use messenger_link::ports::{CopyAttributesHook, NoopMessageHandler};

const WEBHOOK_MOUNT: &str = "/fb";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    if config.server.json_logs() {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    config.validate()?;

    let messenger = &config.messenger;
    let mut graph_config = GraphConfig::new(messenger.page_access_token.clone())
        .with_base_url(messenger.api_base_url.clone())
        .with_timeout(messenger.request_timeout());
    if let Some(app_id) = &messenger.app_id {
        graph_config = graph_config.with_app_id(app_id.clone());
    }
    let graph = Arc::new(GraphApiClient::new(graph_config)?);

    let stores = LinkStores {
        linking: Arc::new(InMemoryRecordStore::new()),
        users: Arc::new(InMemoryRecordStore::new()),
        mappings: Arc::new(InMemoryRecordStore::new()),
    };
    let account_link = Arc::new(AccountLinkHandler::new(
        stores,
        config.account_link.user_id_field.clone(),
    ));

    let mut dispatcher = WebhookDispatcher::new(account_link, Arc::new(NoopMessageHandler));
    let copy_fields = config.account_link.copy_fields_list();
    if !copy_fields.is_empty() {
        dispatcher = dispatcher.with_linking_hook(Arc::new(CopyAttributesHook::new(copy_fields)));
    }
    if config.analytics.is_enabled() {
        let page_id = messenger.page_id.clone().unwrap_or_default();
        dispatcher = dispatcher.with_analytics(Arc::new(AnalyticsRecorder::new(
            graph.clone(),
            config.analytics.log_level,
            page_id,
        )));
    }

    let state = WebhookAppState::new(Arc::new(dispatcher), messenger.validation_token.clone());
    let signature = config.webhook.verify_signature.then(|| {
        SignatureCheck::new(
            SignatureVerifier::new(messenger.app_secret.clone()),
            config.webhook.ignored_paths_list(),
        )
    });
    if signature.is_none() {
        tracing::warn!("Webhook signature verification is disabled");
    }

    let app = Router::new()
        .nest(WEBHOOK_MOUNT, webhook_router(state, signature))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        addr = %addr,
        environment = ?config.server.environment,
        analytics = %config.analytics.log_level,
        "Messenger webhook listening on {}{}/webhook",
        addr,
        WEBHOOK_MOUNT
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutting down...");
        })
        .await?;

    Ok(())
}
