//! Brave Search API request types, validation and URL construction.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use url::Url;

use super::BraveError;
use super::options::ClientConfig;

/// Path of the web search endpoint, relative to the base URL.
pub const WEB_SEARCH_PATH: &str = "/web/search";

/// Default number of results per page.
pub const DEFAULT_COUNT: u32 = 20;

/// Default page offset.
pub const DEFAULT_OFFSET: u32 = 0;

/// Default safe search level.
pub const DEFAULT_SAFESEARCH: SafeSearch = SafeSearch::Moderate;

/// Maximum query length in characters.
pub const MAX_QUERY_CHARS: usize = 400;

/// Maximum number of whitespace-separated query terms.
pub const MAX_QUERY_WORDS: usize = 50;

/// Search request parameters for the Brave Web Search API.
///
/// `Default` leaves everything unset (booleans false). Use
/// [`SearchParams::recommended`] for the library's preferred starting point.
/// Unset locale fields are filled from the client's defaults at search time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParams {
    /// Search query. Overwritten by the `query` argument of `search`.
    pub query: String,

    /// Country code (ISO 3166-1 alpha-2, e.g., "US").
    pub country: Option<String>,

    /// Content language (ISO 639-1, e.g., "en").
    pub search_lang: Option<String>,

    /// UI/response metadata language (e.g., "en-US").
    pub ui_lang: Option<String>,

    /// Number of results (default 20).
    pub count: Option<u32>,

    /// Page offset; only sent when greater than zero.
    pub offset: Option<u32>,

    /// Safe search level (default moderate).
    pub safesearch: Option<SafeSearch>,

    pub freshness: Option<Freshness>,

    /// Highlight query terms in snippets. Always sent.
    pub text_decorations: bool,

    /// Spell-check the query. Always sent.
    pub spellcheck: bool,

    /// Restrict the response to these sections (sent comma-joined).
    pub result_filter: Vec<ResultFilter>,

    /// Goggles URL or inline definition for custom re-ranking.
    pub goggles: Option<String>,

    pub units: Option<Units>,

    /// Enable up to 5 extra snippets per result.
    pub extra_snippets: bool,

    /// Request a summary key for the summarizer endpoint.
    pub summary: bool,

    /// Optional client location sent as `X-Loc-*` headers.
    pub location: Option<LocationHints>,
}

impl SearchParams {
    /// Parameters with the library defaults: count 20, offset 0, moderate
    /// safe search, text decorations and spellcheck on.
    pub fn recommended() -> Self {
        Self {
            count: Some(DEFAULT_COUNT),
            offset: Some(DEFAULT_OFFSET),
            safesearch: Some(DEFAULT_SAFESEARCH),
            text_decorations: true,
            spellcheck: true,
            ..Default::default()
        }
    }

    /// Copy `params` (or start empty), set the query and fill unset fields
    /// from the client configuration and library defaults.
    pub(crate) fn resolve(params: Option<&SearchParams>, query: &str, config: &ClientConfig) -> SearchParams {
        let mut resolved = params.cloned().unwrap_or_default();
        resolved.query = query.to_string();

        fill(&mut resolved.country, config.default_country());
        fill(&mut resolved.search_lang, config.default_search_lang());
        fill(&mut resolved.ui_lang, config.default_ui_lang());

        if resolved.count.is_none_or(|count| count == 0) {
            resolved.count = Some(DEFAULT_COUNT);
        }
        resolved.safesearch.get_or_insert(DEFAULT_SAFESEARCH);

        resolved
    }

    /// Check parameter values that cannot be expressed by the types alone.
    pub(crate) fn validate(&self) -> Result<(), BraveError> {
        match self.freshness {
            Some(Freshness::Range { from, to }) if from > to => Err(BraveError::InvalidParameters(format!(
                "freshness range starts after it ends: {from}to{to}"
            ))),
            _ => Ok(()),
        }
    }

    /// Query-string pairs in wire order. Empty and zero values are omitted,
    /// except `text_decorations` and `spellcheck` which are always present.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        push_str(&mut pairs, "q", Some(&self.query));
        push_str(&mut pairs, "country", self.country.as_ref());
        push_str(&mut pairs, "search_lang", self.search_lang.as_ref());
        push_str(&mut pairs, "ui_lang", self.ui_lang.as_ref());
        if let Some(count) = self.count.filter(|c| *c > 0) {
            pairs.push(("count", count.to_string()));
        }
        if let Some(offset) = self.offset.filter(|o| *o > 0) {
            pairs.push(("offset", offset.to_string()));
        }
        if let Some(safesearch) = self.safesearch {
            pairs.push(("safesearch", safesearch.to_string()));
        }
        if let Some(freshness) = &self.freshness {
            pairs.push(("freshness", freshness.to_string()));
        }
        pairs.push(("text_decorations", self.text_decorations.to_string()));
        pairs.push(("spellcheck", self.spellcheck.to_string()));
        if !self.result_filter.is_empty() {
            let joined = self.result_filter.iter().map(ResultFilter::as_str).collect::<Vec<_>>().join(",");
            pairs.push(("result_filter", joined));
        }
        push_str(&mut pairs, "goggles", self.goggles.as_ref());
        if let Some(units) = self.units {
            pairs.push(("units", units.to_string()));
        }
        if self.extra_snippets {
            pairs.push(("extra_snippets", "true".to_string()));
        }
        if self.summary {
            pairs.push(("summary", "true".to_string()));
        }

        pairs
    }

    /// Build the full request URL for `path` under `base_url`.
    pub fn build_url(&self, base_url: &str, path: &str) -> Result<Url, BraveError> {
        let joined = join_path(base_url, path);
        let mut url =
            Url::parse(&joined).map_err(|e| BraveError::InvalidParameters(format!("invalid URL {joined}: {e}")))?;
        url.query_pairs_mut().extend_pairs(self.query_pairs());
        Ok(url)
    }
}

fn fill(field: &mut Option<String>, default: &str) {
    if field.as_deref().is_none_or(str::is_empty) {
        *field = Some(default.to_string());
    }
}

fn push_str(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&String>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        pairs.push((key, value.clone()));
    }
}

/// Join a base URL and an endpoint path with exactly one `/` between them.
pub fn join_path(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Validate a raw query before any network activity.
pub fn validate_query(query: &str) -> Result<(), BraveError> {
    if query.is_empty() {
        return Err(BraveError::EmptyQuery);
    }

    if query.chars().count() > MAX_QUERY_CHARS || query.split_whitespace().count() > MAX_QUERY_WORDS {
        return Err(BraveError::QueryTooLong);
    }

    Ok(())
}

/// Safe search filtering levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SafeSearch {
    Off,
    Moderate,
    Strict,
}

impl SafeSearch {
    pub fn as_str(self) -> &'static str {
        match self {
            SafeSearch::Off => "off",
            SafeSearch::Moderate => "moderate",
            SafeSearch::Strict => "strict",
        }
    }
}

impl fmt::Display for SafeSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SafeSearch {
    type Err = BraveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(SafeSearch::Off),
            "moderate" => Ok(SafeSearch::Moderate),
            "strict" => Ok(SafeSearch::Strict),
            other => Err(BraveError::InvalidParameters(format!("unknown safesearch level: {other}"))),
        }
    }
}

/// Recency filter for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Freshness {
    /// Past day (`pd`).
    Day,
    /// Past week (`pw`).
    Week,
    /// Past month (`pm`).
    Month,
    /// Past year (`py`).
    Year,
    /// Inclusive date range, sent as `YYYY-MM-DDtoYYYY-MM-DD`.
    Range { from: NaiveDate, to: NaiveDate },
}

impl fmt::Display for Freshness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Freshness::Day => f.write_str("pd"),
            Freshness::Week => f.write_str("pw"),
            Freshness::Month => f.write_str("pm"),
            Freshness::Year => f.write_str("py"),
            Freshness::Range { from, to } => write!(f, "{}to{}", from.format("%Y-%m-%d"), to.format("%Y-%m-%d")),
        }
    }
}

impl FromStr for Freshness {
    type Err = BraveError;

    /// Accepts the wire codes (`pd`), the long names (`day`) or a date range.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pd" | "day" => return Ok(Freshness::Day),
            "pw" | "week" => return Ok(Freshness::Week),
            "pm" | "month" => return Ok(Freshness::Month),
            "py" | "year" => return Ok(Freshness::Year),
            _ => {}
        }

        let invalid = || BraveError::InvalidParameters(format!("invalid freshness: {s}"));
        let (from, to) = s.split_once("to").ok_or_else(invalid)?;
        let from = NaiveDate::parse_from_str(from, "%Y-%m-%d").map_err(|_| invalid())?;
        let to = NaiveDate::parse_from_str(to, "%Y-%m-%d").map_err(|_| invalid())?;
        Ok(Freshness::Range { from, to })
    }
}

/// Measurement system for unit-bearing results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Units {
    Metric,
    Imperial,
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        })
    }
}

impl FromStr for Units {
    type Err = BraveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            other => Err(BraveError::InvalidParameters(format!("unknown units: {other}"))),
        }
    }
}

/// Response sections that can be requested via `result_filter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultFilter {
    Discussions,
    Faq,
    Infobox,
    News,
    Query,
    Summarizer,
    Videos,
    Web,
    Locations,
}

impl ResultFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultFilter::Discussions => "discussions",
            ResultFilter::Faq => "faq",
            ResultFilter::Infobox => "infobox",
            ResultFilter::News => "news",
            ResultFilter::Query => "query",
            ResultFilter::Summarizer => "summarizer",
            ResultFilter::Videos => "videos",
            ResultFilter::Web => "web",
            ResultFilter::Locations => "locations",
        }
    }
}

impl fmt::Display for ResultFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResultFilter {
    type Err = BraveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "discussions" => Ok(ResultFilter::Discussions),
            "faq" => Ok(ResultFilter::Faq),
            "infobox" => Ok(ResultFilter::Infobox),
            "news" => Ok(ResultFilter::News),
            "query" => Ok(ResultFilter::Query),
            "summarizer" => Ok(ResultFilter::Summarizer),
            "videos" => Ok(ResultFilter::Videos),
            "web" => Ok(ResultFilter::Web),
            "locations" => Ok(ResultFilter::Locations),
            other => Err(BraveError::InvalidParameters(format!("unknown result filter: {other}"))),
        }
    }
}

/// Client location hints, used by Brave to rank local results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationHints {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// IANA timezone, e.g. "America/New_York".
    pub timezone: Option<String>,
    pub city: Option<String>,
    /// State or region code.
    pub state: Option<String>,
    pub state_name: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

impl LocationHints {
    /// `X-Loc-*` headers for every field that is set.
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = Vec::new();
        if let Some(lat) = self.latitude {
            headers.push(("X-Loc-Lat", lat.to_string()));
        }
        if let Some(long) = self.longitude {
            headers.push(("X-Loc-Long", long.to_string()));
        }
        push_str(&mut headers, "X-Loc-Timezone", self.timezone.as_ref());
        push_str(&mut headers, "X-Loc-City", self.city.as_ref());
        push_str(&mut headers, "X-Loc-State", self.state.as_ref());
        push_str(&mut headers, "X-Loc-State-Name", self.state_name.as_ref());
        push_str(&mut headers, "X-Loc-Country", self.country.as_ref());
        push_str(&mut headers, "X-Loc-Postal-Code", self.postal_code.as_ref());
        headers
    }
}
