//! Account linking configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::webhook::split_list;
use crate::domain::linking::DEFAULT_USER_ID_FIELD;

/// Account linking configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AccountLinkConfig {
    /// Attribute joining linking, user and mapping records
    #[serde(default = "default_user_id_field")]
    pub user_id_field: String,

    /// Linking record attributes copied onto a newly created user
    /// (comma-separated). Empty disables the copy hook.
    pub copy_fields: Option<String>,
}

impl AccountLinkConfig {
    pub fn copy_fields_list(&self) -> Vec<String> {
        split_list(self.copy_fields.as_deref())
    }

    /// Validate account linking configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.user_id_field.trim().is_empty() {
            return Err(ValidationError::EmptyUserIdField);
        }
        Ok(())
    }
}

impl Default for AccountLinkConfig {
    fn default() -> Self {
        Self {
            user_id_field: default_user_id_field(),
            copy_fields: None,
        }
    }
}

fn default_user_id_field() -> String {
    DEFAULT_USER_ID_FIELD.to_string()
}
