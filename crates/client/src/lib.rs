//! Typed client for the Brave Web Search API.
//!
//! This crate builds search requests from structured parameters, sends them
//! with bounded retries and decodes the (optionally gzipped) JSON response
//! into typed results.

pub mod brave;

pub use brave::{
    ApiError, BraveClient, BraveClientBuilder, BraveError, ClientConfig, ClientOption, ErrorKind, Freshness,
    LocationHints, RateLimit, ResultFilter, SafeSearch, SearchParams, SearchResponse, SearchResult, Units,
};

pub use tokio_util::sync::CancellationToken;

/// Version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
