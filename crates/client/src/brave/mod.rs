//! Brave Search API client.
//!
//! Provides a client for the Brave Web Search API with bounded retries,
//! request validation, explicit gzip decoding and typed errors.
//!
//! ### Request pipeline
//!
//! - **Endpoint**: `https://api.search.brave.com/res/v1/web/search`
//! - **Authentication**: Uses `X-Subscription-Token` header.
//! - **Validation**: empty queries and queries over 400 chars / 50 words are
//!   rejected before any network activity.
//! - **Retries**: transport errors and 5xx responses are retried up to
//!   `max_retries` times, waiting `100ms * 2^attempt` between attempts.
//!   Cancellation aborts an in-flight attempt, a body read or the wait.
//! - **Decoding**: gzip bodies are inflated when `Content-Encoding` says so;
//!   anything but a 200 becomes an [`ApiError`].
//! - **Rate limits**: `X-RateLimit-*` headers of the final response are
//!   attached to the result or the error.

pub mod decode;
pub mod error;
pub mod options;
pub mod rate_limit;
pub mod request;
pub mod response;
mod shortcuts;

pub use error::{ApiError, BraveError, ErrorKind};
pub use options::{ClientConfig, ClientOption};
pub use rate_limit::RateLimit;
pub use request::{Freshness, LocationHints, ResultFilter, SafeSearch, SearchParams, Units};
pub use response::{
    ButtonResult, DeepResults, MetaUrl, MixedResponse, MixedResultRef, OpaqueSection, Profile, QueryInfo,
    SearchResponse, SearchResult, Thumbnail, WebResults,
};

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use brave_search_core::Settings;
use reqwest::{StatusCode, header};
use tokio_util::sync::CancellationToken;
use url::Url;

/// First backoff delay; doubles after every failed attempt.
const BASE_BACKOFF: Duration = Duration::from_millis(100);

const HEADER_SUBSCRIPTION_TOKEN: &str = "X-Subscription-Token";

/// Brave Search API client.
///
/// Cheap to clone; clones share the configuration and the transport.
#[derive(Debug, Clone)]
pub struct BraveClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl BraveClient {
    /// Create a new Brave client from an API key and options, applied in order.
    pub fn new(api_key: impl Into<String>, options: impl IntoIterator<Item = ClientOption>) -> Result<Self, BraveError> {
        let config = ClientConfig::resolve(api_key, options)?;

        let http = match config.http_client() {
            Some(client) => client.clone(),
            None => reqwest::Client::builder()
                .timeout(config.timeout())
                .no_gzip()
                .build()
                .map_err(|e| BraveError::Network(Arc::new(e)))?,
        };

        Ok(Self { http, config: Arc::new(config) })
    }

    /// Start a builder that records options and resolves them at `build()`.
    pub fn builder(api_key: impl Into<String>) -> BraveClientBuilder {
        BraveClientBuilder { api_key: api_key.into(), options: Vec::new() }
    }

    /// Create a client from loaded settings. The API key must be set.
    pub fn from_settings(settings: Settings) -> Result<Self, BraveError> {
        let api_key = settings.api_key.clone().unwrap_or_default();
        Self::new(api_key, [ClientOption::Settings(settings)])
    }

    /// Create a new Brave client from environment variables and the
    /// optional settings file.
    pub fn from_env() -> Result<Self, BraveError> {
        let settings = Settings::load().map_err(|e| BraveError::InvalidParameters(e.to_string()))?;
        Self::from_settings(settings)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Execute a web search query.
    ///
    /// `params` is copied; unset locale fields, count and safe search are
    /// filled from the client defaults. `cancel` aborts the call at any
    /// point after validation, including mid-request.
    pub async fn search(
        &self,
        cancel: &CancellationToken,
        query: &str,
        params: Option<&SearchParams>,
    ) -> Result<SearchResponse, BraveError> {
        request::validate_query(query)?;

        let params = SearchParams::resolve(params, query, &self.config);
        params.validate()?;

        let url = params.build_url(self.config.base_url(), request::WEB_SEARCH_PATH)?;

        let start = Instant::now();
        tracing::debug!("searching Brave API: query={}", params.query);

        let response = self.dispatch(cancel, &url, params.location.as_ref()).await?;
        let status = response.status();
        tracing::debug!("Brave API response status: {}", status);

        if status != StatusCode::OK {
            return Err(Self::error_from_response(cancel, response).await);
        }

        let headers = response.headers().clone();
        let rate_limit = RateLimit::from_headers(&headers);
        let body = until_cancelled(cancel, response.bytes()).await??;

        let body = decode::decompress(&headers, body).map_err(|e| ApiError::invalid_response(status, e, rate_limit))?;
        let mut search_response =
            decode::decode_search_response(&body).map_err(|e| ApiError::invalid_response(status, e, rate_limit))?;
        search_response.rate_limit = rate_limit;

        tracing::debug!(
            "search completed in {:?}, {} results, {} requests remaining",
            start.elapsed(),
            search_response.result_count(),
            rate_limit.remaining
        );

        Ok(search_response)
    }

    /// Send the request, retrying transport errors and 5xx responses.
    ///
    /// Returns the first response with a status below 500. Once attempts are
    /// exhausted the last failure is returned as an error.
    async fn dispatch(
        &self,
        cancel: &CancellationToken,
        url: &Url,
        location: Option<&LocationHints>,
    ) -> Result<reqwest::Response, BraveError> {
        if cancel.is_cancelled() {
            return Err(BraveError::Cancelled);
        }

        let max_retries = self.config.max_retries();
        let mut attempt = 0;

        loop {
            let failure = match until_cancelled(cancel, self.request(url, location).send()).await? {
                Ok(response) if response.status().as_u16() < 500 => return Ok(response),
                other => other,
            };

            if attempt >= max_retries {
                return Err(match failure {
                    Ok(response) => Self::error_from_response(cancel, response).await,
                    Err(e) => BraveError::from(e),
                });
            }

            let delay = backoff_delay(attempt);
            match &failure {
                Ok(response) => tracing::warn!(
                    status = %response.status(),
                    attempt = attempt + 1,
                    ?delay,
                    "Brave API server error, retrying"
                ),
                Err(e) => tracing::warn!(error = %e, attempt = attempt + 1, ?delay, "Brave API request failed, retrying"),
            }
            // Release the connection before sleeping.
            drop(failure);

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::warn!(attempt = attempt + 1, "Brave API request cancelled during backoff");
                    return Err(BraveError::Cancelled);
                }
                _ = tokio::time::sleep(delay) => {}
            }

            attempt += 1;
        }
    }

    fn request(&self, url: &Url, location: Option<&LocationHints>) -> reqwest::RequestBuilder {
        let mut request = self
            .http
            .get(url.clone())
            .timeout(self.config.timeout())
            .header(header::ACCEPT, "application/json")
            .header(header::ACCEPT_ENCODING, "gzip")
            .header(header::USER_AGENT, self.config.user_agent())
            .header(HEADER_SUBSCRIPTION_TOKEN, self.config.api_key())
            .header(header::CACHE_CONTROL, "no-cache");

        if let Some(location) = location {
            for (name, value) in location.headers() {
                request = request.header(name, value);
            }
        }

        request
    }

    /// Classify a non-200 response, draining its body for diagnostics.
    async fn error_from_response(cancel: &CancellationToken, response: reqwest::Response) -> BraveError {
        let status = response.status();
        let headers = response.headers().clone();
        let rate_limit = RateLimit::from_headers(&headers);

        let drained = match until_cancelled(cancel, response.bytes()).await {
            Ok(drained) => drained,
            Err(cancelled) => return cancelled,
        };
        let body = match drained {
            Ok(bytes) => decode::decompress(&headers, bytes)
                .map(|b| String::from_utf8_lossy(&b).into_owned())
                .unwrap_or_default(),
            Err(e) => {
                tracing::debug!("failed to drain error body: {}", e);
                String::new()
            }
        };

        BraveError::Api(ApiError::from_status(status, rate_limit, body))
    }
}

/// Run `fut` unless `cancel` fires first.
async fn until_cancelled<F: Future>(cancel: &CancellationToken, fut: F) -> Result<F::Output, BraveError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tracing::debug!("Brave API request cancelled in flight");
            Err(BraveError::Cancelled)
        }
        output = fut => Ok(output),
    }
}

/// Delay before retry number `attempt + 1`: `100ms * 2^attempt`.
fn backoff_delay(attempt: u32) -> Duration {
    BASE_BACKOFF.saturating_mul(1u32.checked_shl(attempt).unwrap_or(u32::MAX))
}

/// Records options for [`BraveClient`] in call order.
#[derive(Debug)]
pub struct BraveClientBuilder {
    api_key: String,
    options: Vec<ClientOption>,
}

impl BraveClientBuilder {
    pub fn option(mut self, option: ClientOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn timeout(self, timeout: Duration) -> Self {
        self.option(ClientOption::Timeout(timeout))
    }

    pub fn max_retries(self, retries: i64) -> Self {
        self.option(ClientOption::MaxRetries(retries))
    }

    pub fn user_agent(self, user_agent: impl Into<String>) -> Self {
        self.option(ClientOption::UserAgent(user_agent.into()))
    }

    pub fn base_url(self, base_url: impl Into<String>) -> Self {
        self.option(ClientOption::BaseUrl(base_url.into()))
    }

    pub fn http_client(self, client: reqwest::Client) -> Self {
        self.option(ClientOption::HttpClient(client))
    }

    pub fn default_country(self, country: impl Into<String>) -> Self {
        self.option(ClientOption::DefaultCountry(country.into()))
    }

    pub fn default_search_language(self, lang: impl Into<String>) -> Self {
        self.option(ClientOption::DefaultSearchLanguage(lang.into()))
    }

    pub fn default_ui_language(self, lang: impl Into<String>) -> Self {
        self.option(ClientOption::DefaultUiLanguage(lang.into()))
    }

    pub fn settings(self, settings: Settings) -> Self {
        self.option(ClientOption::Settings(settings))
    }

    pub fn build(self) -> Result<BraveClient, BraveError> {
        BraveClient::new(self.api_key, self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_new_missing_key() {
        let result = BraveClient::new("", []);
        assert!(matches!(result, Err(BraveError::MissingApiKey)));
    }

    #[test]
    fn test_from_settings_missing_key() {
        let result = BraveClient::from_settings(Settings::default());
        assert!(matches!(result, Err(BraveError::MissingApiKey)));
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            api_key: Some("settings-key".into()),
            default_country: Some("JP".into()),
            timeout_secs: Some(5),
            ..Default::default()
        };
        let client = BraveClient::from_settings(settings).unwrap();
        assert_eq!(client.config().api_key(), "settings-key");
        assert_eq!(client.config().default_country(), "JP");
        assert_eq!(client.config().timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_builder_applies_options_in_order() {
        let client = BraveClient::builder("key")
            .user_agent("custom-agent")
            .timeout(Duration::from_secs(60))
            .default_country("UK")
            .max_retries(4)
            .build()
            .unwrap();

        assert_eq!(client.config().user_agent(), "custom-agent");
        assert_eq!(client.config().timeout(), Duration::from_secs(60));
        assert_eq!(client.config().default_country(), "UK");
        assert_eq!(client.config().max_retries(), 4);
    }

    #[test]
    fn test_builder_rejects_negative_retries() {
        let result = BraveClient::builder("key").max_retries(-1).build();
        assert!(matches!(result, Err(BraveError::InvalidParameters(_))));
    }

    #[test]
    fn test_backoff_doubles() {
        assert_eq!(backoff_delay(0), Duration::from_millis(100));
        assert_eq!(backoff_delay(1), Duration::from_millis(200));
        assert_eq!(backoff_delay(2), Duration::from_millis(400));
        assert_eq!(backoff_delay(5), Duration::from_millis(3200));
    }

    #[test]
    fn test_backoff_saturates() {
        assert_eq!(backoff_delay(64), BASE_BACKOFF.saturating_mul(u32::MAX));
    }

    #[tokio::test]
    async fn test_empty_query_rejected_without_network() {
        let client = BraveClient::builder("key").base_url("http://127.0.0.1:9").build().unwrap();
        let result = client.search(&CancellationToken::new(), "", Some(&SearchParams::recommended())).await;
        assert!(matches!(result, Err(BraveError::EmptyQuery)));
    }

    #[tokio::test]
    async fn test_long_query_rejected_without_network() {
        let client = BraveClient::builder("key").base_url("http://127.0.0.1:9").build().unwrap();
        let result = client.search(&CancellationToken::new(), &"a".repeat(401), None).await;
        assert!(matches!(result, Err(BraveError::QueryTooLong)));
    }

    #[tokio::test]
    async fn test_pre_cancelled_token() {
        let client = BraveClient::builder("key").base_url("http://127.0.0.1:9").build().unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = client.search(&cancel, "rust", None).await;
        assert!(matches!(result, Err(BraveError::Cancelled)));
    }
}
