//! Rate limit metadata reported by the Brave API.
//!
//! Brave sends one value per policy window, comma-separated, e.g.
//! `X-RateLimit-Limit: 10, 15000` (per second, per month). Only the first
//! window is kept.

use reqwest::header::HeaderMap;
use serde::Serialize;

pub const HEADER_LIMIT: &str = "X-RateLimit-Limit";
pub const HEADER_REMAINING: &str = "X-RateLimit-Remaining";
pub const HEADER_RESET: &str = "X-RateLimit-Reset";

/// Quota window for the calling credential. Absent headers read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    /// Seconds until the window resets.
    pub reset: u64,
}

impl RateLimit {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            limit: first_value(headers, HEADER_LIMIT),
            remaining: first_value(headers, HEADER_REMAINING),
            reset: first_value(headers, HEADER_RESET),
        }
    }
}

fn first_value(headers: &HeaderMap, name: &str) -> u64 {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .and_then(|token| token.trim().parse().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_parses_first_window() {
        let map = headers(&[
            ("x-ratelimit-limit", "10, 15000"),
            ("x-ratelimit-remaining", "9, 14999"),
            ("x-ratelimit-reset", "1, 1419704"),
        ]);
        assert_eq!(RateLimit::from_headers(&map), RateLimit { limit: 10, remaining: 9, reset: 1 });
    }

    #[test]
    fn test_single_value() {
        let map = headers(&[("x-ratelimit-limit", "50")]);
        assert_eq!(RateLimit::from_headers(&map), RateLimit { limit: 50, remaining: 0, reset: 0 });
    }

    #[test]
    fn test_missing_headers_are_zero() {
        assert_eq!(RateLimit::from_headers(&HeaderMap::new()), RateLimit::default());
    }

    #[test]
    fn test_garbage_is_treated_as_absent() {
        let map = headers(&[
            ("x-ratelimit-limit", "lots, 15000"),
            ("x-ratelimit-remaining", "-1"),
            ("x-ratelimit-reset", "3"),
        ]);
        assert_eq!(RateLimit::from_headers(&map), RateLimit { limit: 0, remaining: 0, reset: 3 });
    }
}
