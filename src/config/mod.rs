//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `MESSENGER_LINK` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use messenger_link::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod account_link;
mod analytics;
mod error;
mod messenger;
mod server;
mod webhook;

pub use account_link::AccountLinkConfig;
pub use analytics::AnalyticsConfig;
pub use error::{ConfigError, ValidationError};
pub use messenger::MessengerConfig;
pub use server::{Environment, ServerConfig};
pub use webhook::WebhookConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Messenger Platform credentials and Graph API settings
    pub messenger: MessengerConfig,

    /// Webhook signature settings
    #[serde(default)]
    pub webhook: WebhookConfig,

    /// Account linking workflow settings
    #[serde(default)]
    pub account_link: AccountLinkConfig,

    /// Custom app event reporting
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MESSENGER_LINK` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MESSENGER_LINK__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `MESSENGER_LINK__MESSENGER__APP_SECRET=...` -> `messenger.app_secret = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MESSENGER_LINK")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.messenger.validate()?;
        self.account_link.validate()?;
        self.analytics.validate(&self.messenger)?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analytics::AnalyticsLevel;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("MESSENGER_LINK__MESSENGER__APP_SECRET", "app_secret");
        env::set_var("MESSENGER_LINK__MESSENGER__VALIDATION_TOKEN", "validation_token");
        env::set_var("MESSENGER_LINK__MESSENGER__PAGE_ACCESS_TOKEN", "page_token");
    }

    fn clear_env() {
        for key in [
            "MESSENGER_LINK__MESSENGER__APP_SECRET",
            "MESSENGER_LINK__MESSENGER__VALIDATION_TOKEN",
            "MESSENGER_LINK__MESSENGER__PAGE_ACCESS_TOKEN",
            "MESSENGER_LINK__MESSENGER__APP_ID",
            "MESSENGER_LINK__MESSENGER__PAGE_ID",
            "MESSENGER_LINK__SERVER__PORT",
            "MESSENGER_LINK__SERVER__ENVIRONMENT",
            "MESSENGER_LINK__WEBHOOK__VERIFY_SIGNATURE",
            "MESSENGER_LINK__ACCOUNT_LINK__USER_ID_FIELD",
            "MESSENGER_LINK__ANALYTICS__LOG_LEVEL",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.messenger.app_secret, "app_secret");
        assert_eq!(config.messenger.page_access_token, "page_token");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.environment, Environment::Development);
        assert!(config.webhook.verify_signature);
        assert_eq!(config.account_link.user_id_field, "userid");
        assert_eq!(config.analytics.log_level, AnalyticsLevel::None);
    }

    #[test]
    fn test_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("MESSENGER_LINK__SERVER__PORT", "8080");
        env::set_var("MESSENGER_LINK__SERVER__ENVIRONMENT", "production");
        env::set_var("MESSENGER_LINK__WEBHOOK__VERIFY_SIGNATURE", "false");
        env::set_var("MESSENGER_LINK__ACCOUNT_LINK__USER_ID_FIELD", "accountNumber");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert!(config.is_production());
        assert!(!config.webhook.verify_signature);
        assert_eq!(config.account_link.user_id_field, "accountNumber");
    }

    #[test]
    fn test_missing_messenger_section_fails() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_err());
    }

    #[test]
    fn test_analytics_without_ids_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("MESSENGER_LINK__ANALYTICS__LOG_LEVEL", "critical");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.analytics.log_level, AnalyticsLevel::Critical);
        assert!(matches!(
            config.validate(),
            Err(ValidationError::AnalyticsNotConfigured(_, _))
        ));
    }
}
