//! Brave API client error types.
//!
//! Every failure surfaced by the client is a [`BraveError`]. HTTP-level
//! failures carry an [`ApiError`] with the status code, the status line and
//! an [`ErrorKind`], so callers can classify errors without parsing text.

use std::fmt;
use std::sync::Arc;

use reqwest::StatusCode;

use super::rate_limit::RateLimit;

/// Flat classification of every error the client can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingApiKey,
    EmptyQuery,
    QueryTooLong,
    InvalidParameters,
    Unauthorized,
    Forbidden,
    NotFound,
    RateLimit,
    ServerError,
    /// Non-success status with no dedicated kind (e.g. 400, 204, 302).
    UnexpectedStatus,
    /// A 200 response whose body could not be decoded.
    InvalidResponse,
    Network,
    Cancelled,
}

impl ErrorKind {
    /// Kind for a non-200 HTTP status.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ErrorKind::Unauthorized,
            StatusCode::FORBIDDEN => ErrorKind::Forbidden,
            StatusCode::NOT_FOUND => ErrorKind::NotFound,
            StatusCode::TOO_MANY_REQUESTS => ErrorKind::RateLimit,
            s if s.as_u16() >= 500 => ErrorKind::ServerError,
            _ => ErrorKind::UnexpectedStatus,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ErrorKind::MissingApiKey => "missing API key",
            ErrorKind::EmptyQuery => "query cannot be empty",
            ErrorKind::QueryTooLong => "query too long (max 400 chars or 50 words)",
            ErrorKind::InvalidParameters => "invalid parameters",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::NotFound => "not found",
            ErrorKind::RateLimit => "rate limit exceeded",
            ErrorKind::ServerError => "server error",
            ErrorKind::UnexpectedStatus => "unexpected status code",
            ErrorKind::InvalidResponse => "invalid response",
            ErrorKind::Network => "network error",
            ErrorKind::Cancelled => "request cancelled",
        };
        f.write_str(text)
    }
}

/// Error returned by the Brave Search API, or derived from its response.
#[derive(Debug, Clone, thiserror::Error)]
#[error("brave search API error: {message} (status: {status}): {kind}")]
pub struct ApiError {
    /// HTTP status code of the final response.
    pub status: u16,
    /// Human-readable message, usually the HTTP status line.
    pub message: String,
    pub kind: ErrorKind,
    /// Rate limit window reported by the final response.
    pub rate_limit: RateLimit,
    /// Drained response body, kept for diagnostics only.
    pub body: String,
}

impl ApiError {
    /// Build an error for a non-200 response.
    pub fn from_status(status: StatusCode, rate_limit: RateLimit, body: String) -> Self {
        Self { status: status.as_u16(), message: status.to_string(), kind: ErrorKind::from_status(status), rate_limit, body }
    }

    /// Build an error for a 200 response whose body is unusable.
    pub fn invalid_response(status: StatusCode, detail: impl fmt::Display, rate_limit: RateLimit) -> Self {
        Self {
            status: status.as_u16(),
            message: format!("failed to parse response: {detail}"),
            kind: ErrorKind::InvalidResponse,
            rate_limit,
            body: String::new(),
        }
    }

    pub fn is_rate_limit(&self) -> bool {
        self.kind == ErrorKind::RateLimit || self.status == StatusCode::TOO_MANY_REQUESTS.as_u16()
    }

    pub fn is_auth_error(&self) -> bool {
        self.kind == ErrorKind::Unauthorized || self.status == StatusCode::UNAUTHORIZED.as_u16()
    }

    pub fn is_server_error(&self) -> bool {
        self.kind == ErrorKind::ServerError || self.status >= 500
    }
}

/// Errors from Brave Search API client.
#[derive(Debug, thiserror::Error)]
pub enum BraveError {
    /// API key was empty at construction.
    #[error("missing API key")]
    MissingApiKey,

    /// Query was empty.
    #[error("query cannot be empty")]
    EmptyQuery,

    /// Query exceeded 400 characters or 50 words.
    #[error("query too long (max 400 chars or 50 words)")]
    QueryTooLong,

    /// An option or parameter value was rejected.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// HTTP status or body classification.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Transport failure (connect, timeout, body read), after retries.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// The caller's cancellation token fired.
    #[error("request cancelled")]
    Cancelled,
}

impl From<reqwest::Error> for BraveError {
    fn from(err: reqwest::Error) -> Self {
        BraveError::Network(Arc::new(err))
    }
}

impl BraveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BraveError::MissingApiKey => ErrorKind::MissingApiKey,
            BraveError::EmptyQuery => ErrorKind::EmptyQuery,
            BraveError::QueryTooLong => ErrorKind::QueryTooLong,
            BraveError::InvalidParameters(_) => ErrorKind::InvalidParameters,
            BraveError::Api(api) => api.kind,
            BraveError::Network(_) => ErrorKind::Network,
            BraveError::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// The API error, if this failure came from an HTTP response.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            BraveError::Api(api) => Some(api),
            _ => None,
        }
    }

    /// HTTP status of the final response, if there was one.
    pub fn status(&self) -> Option<u16> {
        self.as_api_error().map(|api| api.status)
    }

    pub fn is_rate_limit(&self) -> bool {
        self.as_api_error().is_some_and(ApiError::is_rate_limit)
    }

    pub fn is_auth_error(&self) -> bool {
        self.as_api_error().is_some_and(ApiError::is_auth_error)
    }

    pub fn is_server_error(&self) -> bool {
        self.as_api_error().is_some_and(ApiError::is_server_error)
    }

    /// True when the transport reported a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, BraveError::Network(e) if e.is_timeout())
    }
}
