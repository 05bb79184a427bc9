//! Client settings with layered loading.
//!
//! This module provides settings management using figment for layered
//! loading from multiple sources:
//!
//! 1. Environment variables (BRAVE_SEARCH_*)
//! 2. TOML config file (if BRAVE_SEARCH_CONFIG_FILE set)
//! 3. Built-in defaults
//!
//! Every field is optional. An unset field means "keep whatever the client
//! would otherwise use", so a `Settings` value can be merged over a client
//! configuration without clobbering it.

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Environment variable prefix for all settings.
pub const ENV_PREFIX: &str = "BRAVE_SEARCH_";

/// Environment variable naming an optional TOML settings file.
pub const CONFIG_FILE_ENV: &str = "BRAVE_SEARCH_CONFIG_FILE";

/// Brave Search client settings.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (BRAVE_SEARCH_*)
/// 2. TOML config file (if BRAVE_SEARCH_CONFIG_FILE set)
/// 3. Built-in defaults (all unset)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Subscription token sent as `X-Subscription-Token`.
    ///
    /// Set via BRAVE_SEARCH_API_KEY environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// API root, e.g. `https://api.search.brave.com/res/v1`.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Per-attempt timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Additional attempts after the first.
    #[serde(default)]
    pub max_retries: Option<u32>,

    /// User-Agent string for API requests.
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Fallback `country` parameter.
    #[serde(default)]
    pub default_country: Option<String>,

    /// Fallback `search_lang` parameter.
    #[serde(default)]
    pub default_search_lang: Option<String>,

    /// Fallback `ui_lang` parameter.
    #[serde(default)]
    pub default_ui_lang: Option<String>,
}

impl Settings {
    /// Timeout as Duration, if set.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Load settings from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `BRAVE_SEARCH_`
    /// 2. TOML file from `BRAVE_SEARCH_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var(CONFIG_FILE_ENV) {
            tracing::debug!(path = %config_path, "loading settings file");
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into()),
        );

        let settings: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        settings.validate()?;

        Ok(settings)
    }

    /// Return the API key or explain how to provide one.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the API key is unset or empty.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().filter(|key| !key.is_empty()).ok_or_else(|| ConfigError::Missing {
            field: "api_key".into(),
            hint: "Set BRAVE_SEARCH_API_KEY environment variable".into(),
        })
    }
}
