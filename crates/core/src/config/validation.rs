//! Settings validation rules.
//!
//! This module provides validation logic for `Settings` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::Settings;
use thiserror::Error;

/// Settings validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl Settings {
    /// Validate settings values after loading.
    ///
    /// Unset fields are always valid.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `timeout_secs` is 0
    /// - `user_agent` is empty
    /// - `base_url` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::Invalid { field: "timeout_secs".into(), reason: "must be greater than 0".into() });
        }

        if self.user_agent.as_deref().is_some_and(str::is_empty) {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.base_url.as_deref().is_some_and(|url| url.trim().is_empty()) {
            return Err(ConfigError::Invalid { field: "base_url".into(), reason: "must not be empty".into() });
        }

        if self.max_retries.is_some_and(|retries| retries > 10) {
            tracing::warn!(max_retries = self.max_retries, "max_retries is unusually high");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_settings() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_timeout_zero() {
        let settings = Settings { timeout_secs: Some(0), ..Default::default() };
        let result = settings.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "timeout_secs"));
    }

    #[test]
    fn test_validate_empty_user_agent() {
        let settings = Settings { user_agent: Some(String::new()), ..Default::default() };
        let result = settings.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "user_agent"));
    }

    #[test]
    fn test_validate_blank_base_url() {
        let settings = Settings { base_url: Some("  ".into()), ..Default::default() };
        let result = settings.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "base_url"));
    }

    #[test]
    fn test_validate_populated_settings() {
        let settings = Settings {
            api_key: Some("key".into()),
            base_url: Some("https://api.search.brave.com/res/v1".into()),
            timeout_secs: Some(1),
            max_retries: Some(0),
            user_agent: Some("agent/1.0".into()),
            default_country: Some("US".into()),
            default_search_lang: Some("en".into()),
            default_ui_lang: Some("en-US".into()),
        };
        assert!(settings.validate().is_ok());
    }
}
