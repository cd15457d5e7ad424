//! Webhook receiver configuration

use serde::Deserialize;

/// Webhook configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    /// Check `X-Hub-Signature(-256)` on incoming deliveries
    #[serde(default = "default_verify_signature")]
    pub verify_signature: bool,

    /// Paths exempt from signature checks (comma-separated)
    pub ignored_paths: Option<String>,
}

impl WebhookConfig {
    /// Get ignored paths as a vector
    pub fn ignored_paths_list(&self) -> Vec<String> {
        split_list(self.ignored_paths.as_deref())
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            verify_signature: default_verify_signature(),
            ignored_paths: None,
        }
    }
}

fn default_verify_signature() -> bool {
    true
}

/// Splits a comma-separated setting, dropping blank items.
pub(super) fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WebhookConfig::default();
        assert!(config.verify_signature);
        assert!(config.ignored_paths_list().is_empty());
    }

    #[test]
    fn test_ignored_paths_parsing() {
        let config = WebhookConfig {
            ignored_paths: Some("/health, /webhook ,,".to_string()),
            ..Default::default()
        };
        assert_eq!(config.ignored_paths_list(), vec!["/health", "/webhook"]);
    }

    #[test]
    fn test_deserialization() {
        let config: WebhookConfig =
            serde_json::from_str(r#"{"verify_signature": false}"#).unwrap();
        assert!(!config.verify_signature);
    }
}
