//! Client configuration and the options that build it.
//!
//! A [`ClientConfig`] is resolved once per client from an API key and an
//! ordered list of [`ClientOption`]s. Options are applied in the order given
//! and the first invalid one aborts resolution; later options are not
//! applied.

use std::fmt;
use std::time::Duration;

use brave_search_core::Settings;
use url::Url;

use super::BraveError;

/// Default base URL for Brave Search API.
pub const DEFAULT_BASE_URL: &str = "https://api.search.brave.com/res/v1";

/// Default per-attempt timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Default user agent.
pub const DEFAULT_USER_AGENT: &str = concat!("brave-search-rs/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_COUNTRY: &str = "US";
pub const DEFAULT_SEARCH_LANG: &str = "en";
pub const DEFAULT_UI_LANG: &str = "en-US";

/// Resolved, read-only client configuration.
#[derive(Clone)]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
    timeout: Duration,
    max_retries: u32,
    user_agent: String,
    default_country: String,
    default_search_lang: String,
    default_ui_lang: String,
    http_client: Option<reqwest::Client>,
}

impl ClientConfig {
    /// Resolve a configuration from an API key and options.
    ///
    /// The key is checked before any option runs.
    pub fn resolve(
        api_key: impl Into<String>,
        options: impl IntoIterator<Item = ClientOption>,
    ) -> Result<Self, BraveError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(BraveError::MissingApiKey);
        }

        let mut config = Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_country: DEFAULT_COUNTRY.to_string(),
            default_search_lang: DEFAULT_SEARCH_LANG.to_string(),
            default_ui_lang: DEFAULT_UI_LANG.to_string(),
            http_client: None,
        };

        for option in options {
            option.apply(&mut config)?;
        }

        Ok(config)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn default_country(&self) -> &str {
        &self.default_country
    }

    pub fn default_search_lang(&self) -> &str {
        &self.default_search_lang
    }

    pub fn default_ui_lang(&self) -> &str {
        &self.default_ui_lang
    }

    /// Caller-supplied transport, if any.
    pub fn http_client(&self) -> Option<&reqwest::Client> {
        self.http_client.as_ref()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("user_agent", &self.user_agent)
            .field("default_country", &self.default_country)
            .field("default_search_lang", &self.default_search_lang)
            .field("default_ui_lang", &self.default_ui_lang)
            .field("http_client", &self.http_client.is_some())
            .finish()
    }
}

/// A single change to a draft [`ClientConfig`].
#[derive(Debug, Clone)]
pub enum ClientOption {
    /// Per-attempt timeout; must be non-zero.
    Timeout(Duration),
    /// Retries after the first attempt; must be non-negative.
    MaxRetries(i64),
    UserAgent(String),
    /// API root; must be an absolute http(s) URL.
    BaseUrl(String),
    /// Shared transport to use instead of a default-built one.
    HttpClient(reqwest::Client),
    DefaultCountry(String),
    DefaultSearchLanguage(String),
    DefaultUiLanguage(String),
    /// Merge every field that is set; unset fields leave the draft alone.
    Settings(Settings),
}

impl ClientOption {
    fn apply(self, config: &mut ClientConfig) -> Result<(), BraveError> {
        match self {
            ClientOption::Timeout(timeout) => {
                if timeout.is_zero() {
                    return Err(BraveError::InvalidParameters("timeout must be greater than zero".into()));
                }
                config.timeout = timeout;
            }
            ClientOption::MaxRetries(retries) => {
                config.max_retries = u32::try_from(retries)
                    .map_err(|_| BraveError::InvalidParameters(format!("max retries out of range: {retries}")))?;
            }
            ClientOption::UserAgent(user_agent) => config.user_agent = user_agent,
            ClientOption::BaseUrl(base_url) => {
                validate_base_url(&base_url)?;
                config.base_url = base_url;
            }
            ClientOption::HttpClient(client) => config.http_client = Some(client),
            ClientOption::DefaultCountry(country) => config.default_country = country,
            ClientOption::DefaultSearchLanguage(lang) => config.default_search_lang = lang,
            ClientOption::DefaultUiLanguage(lang) => config.default_ui_lang = lang,
            ClientOption::Settings(settings) => merge_settings(config, settings)?,
        }
        Ok(())
    }
}

fn validate_base_url(base_url: &str) -> Result<(), BraveError> {
    let url = Url::parse(base_url).map_err(|e| BraveError::InvalidParameters(format!("invalid base URL: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(BraveError::InvalidParameters(format!("unsupported base URL scheme: {}", url.scheme())));
    }
    Ok(())
}

fn merge_settings(config: &mut ClientConfig, settings: Settings) -> Result<(), BraveError> {
    let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());

    if let Some(api_key) = non_empty(settings.api_key) {
        config.api_key = api_key;
    }
    if let Some(base_url) = non_empty(settings.base_url) {
        validate_base_url(&base_url)?;
        config.base_url = base_url;
    }
    if let Some(timeout) = settings.timeout_secs.filter(|secs| *secs > 0) {
        config.timeout = Duration::from_secs(timeout);
    }
    if let Some(retries) = settings.max_retries {
        config.max_retries = retries;
    }
    if let Some(user_agent) = non_empty(settings.user_agent) {
        config.user_agent = user_agent;
    }
    if let Some(country) = non_empty(settings.default_country) {
        config.default_country = country;
    }
    if let Some(lang) = non_empty(settings.default_search_lang) {
        config.default_search_lang = lang;
    }
    if let Some(lang) = non_empty(settings.default_ui_lang) {
        config.default_ui_lang = lang;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::resolve("test-api-key", []).unwrap();
        assert_eq!(config.api_key(), "test-api-key");
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.max_retries(), 2);
        assert_eq!(config.user_agent(), DEFAULT_USER_AGENT);
        assert_eq!(config.default_country(), "US");
        assert_eq!(config.default_search_lang(), "en");
        assert_eq!(config.default_ui_lang(), "en-US");
        assert!(config.http_client().is_none());
    }

    #[test]
    fn test_missing_key_checked_before_options() {
        let result = ClientConfig::resolve("", [ClientOption::MaxRetries(-1)]);
        assert!(matches!(result, Err(BraveError::MissingApiKey)));
    }

    #[test]
    fn test_options_applied_in_order() {
        let config = ClientConfig::resolve(
            "key",
            [
                ClientOption::Timeout(Duration::from_secs(60)),
                ClientOption::UserAgent("first".into()),
                ClientOption::DefaultCountry("UK".into()),
                ClientOption::UserAgent("second".into()),
                ClientOption::MaxRetries(0),
            ],
        )
        .unwrap();

        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert_eq!(config.user_agent(), "second");
        assert_eq!(config.default_country(), "UK");
        assert_eq!(config.max_retries(), 0);
    }

    #[test]
    fn test_first_invalid_option_aborts() {
        let result = ClientConfig::resolve(
            "key",
            [ClientOption::MaxRetries(-1), ClientOption::BaseUrl("not a url".into())],
        );
        assert!(matches!(result, Err(BraveError::InvalidParameters(msg)) if msg.contains("retries")));

        let result = ClientConfig::resolve(
            "key",
            [ClientOption::BaseUrl("ftp://example.com".into()), ClientOption::MaxRetries(-1)],
        );
        assert!(matches!(result, Err(BraveError::InvalidParameters(msg)) if msg.contains("scheme")));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = ClientConfig::resolve("key", [ClientOption::Timeout(Duration::ZERO)]);
        assert!(matches!(result, Err(BraveError::InvalidParameters(_))));
    }

    #[test]
    fn test_settings_merge_only_set_fields() {
        let settings = Settings {
            api_key: Some(String::new()),
            default_search_lang: Some("jp".into()),
            max_retries: Some(5),
            ..Default::default()
        };
        let config = ClientConfig::resolve(
            "key",
            [ClientOption::DefaultCountry("JP".into()), ClientOption::Settings(settings)],
        )
        .unwrap();

        assert_eq!(config.api_key(), "key");
        assert_eq!(config.default_country(), "JP");
        assert_eq!(config.default_search_lang(), "jp");
        assert_eq!(config.max_retries(), 5);
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_settings_can_replace_key() {
        let settings = Settings { api_key: Some("from-settings".into()), ..Default::default() };
        let config = ClientConfig::resolve("key", [ClientOption::Settings(settings)]).unwrap();
        assert_eq!(config.api_key(), "from-settings");
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ClientConfig::resolve("super-secret", []).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
