//! Brave Search API response types.
//!
//! The `web` section, query metadata and the mixed-results index are typed.
//! Every other section keeps its `type` tag and carries its payload as raw
//! JSON, untouched.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use super::rate_limit::RateLimit;

/// Top-level response from the Web Search endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    /// Response discriminator, `"search"` for a web search.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discussions: Option<OpaqueSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faq: Option<OpaqueSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infobox: Option<OpaqueSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<OpaqueSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mixed: Option<MixedResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub news: Option<OpaqueSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<QueryInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub videos: Option<OpaqueSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web: Option<WebResults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summarizer: Option<OpaqueSection>,

    /// Rate limit window reported alongside this response.
    #[serde(skip)]
    pub rate_limit: RateLimit,
}

/// A section whose payload is not modelled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OpaqueSection {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Box<RawValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Box<RawValue>>,
}

/// Web search results container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebResults {
    #[serde(rename = "type")]
    pub kind: String,
    pub results: Vec<SearchResult>,
    pub family_friendly: bool,
}

/// Individual web search result.
///
/// Timestamps (`page_age`, `page_fetched`, `age`) are passed through as the
/// API formats them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub is_source_local: bool,
    pub is_source_both: bool,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_age: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_fetched: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub family_friendly: bool,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    pub is_live: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deep_results: Option<DeepResults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_url: Option<MetaUrl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Thumbnail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    /// Present only when `extra_snippets` was requested.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_snippets: Vec<String>,
}

/// Source profile of a result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub url: String,
    pub long_name: String,
    /// Logo URL.
    pub img: String,
}

/// Extra links attached to a result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeepResults {
    pub buttons: Vec<ButtonResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonResult {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub url: String,
}

/// Parsed pieces of a result URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaUrl {
    pub scheme: String,
    pub netloc: String,
    pub hostname: String,
    pub favicon: String,
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thumbnail {
    pub src: String,
    pub original: String,
    pub logo: bool,
}

/// Query metadata echoed by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryInfo {
    pub original: String,
    /// Spellchecked query, when Brave altered it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altered: Option<String>,
    pub show_strict_warning: bool,
    pub is_navigational: bool,
    pub is_news_breaking: bool,
    pub spellcheck_off: bool,
    pub country: String,
    pub bad_results: bool,
    pub should_fallback: bool,
    pub postal_code: String,
    pub city: String,
    pub header_country: String,
    #[serde(alias = "moreResultsAvailable")]
    pub more_results_available: bool,
    pub state: String,
}

/// Display order of results across sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixedResponse {
    #[serde(rename = "type")]
    pub kind: String,
    pub main: Vec<MixedResultRef>,
    pub top: Vec<MixedResultRef>,
    pub side: Vec<MixedResultRef>,
}

/// Reference to a result in another section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixedResultRef {
    #[serde(rename = "type")]
    pub kind: String,
    pub index: usize,
    /// Whether the whole section is referenced.
    pub all: bool,
}

impl SearchResponse {
    /// Web results, empty when the section is missing.
    pub fn web_results(&self) -> &[SearchResult] {
        self.web.as_ref().map(|w| w.results.as_slice()).unwrap_or_default()
    }

    /// Check if there are more results available.
    pub fn has_more_results(&self) -> bool {
        self.query.as_ref().is_some_and(|q| q.more_results_available)
    }

    /// Get the number of web results.
    pub fn result_count(&self) -> usize {
        self.web_results().len()
    }

    pub fn first_result(&self) -> Option<&SearchResult> {
        self.web_results().first()
    }

    pub fn is_web_result_empty(&self) -> bool {
        self.web_results().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE_JSON: &str = include_str!("../../tests/fixtures/web_search_response.json");

    #[test]
    fn test_deserialize_fixture() {
        let response: SearchResponse = serde_json::from_str(FIXTURE_JSON).unwrap();
        assert_eq!(response.kind, "search");
        assert_eq!(response.result_count(), 3);

        let first = response.first_result().unwrap();
        assert_eq!(first.title, "The Go Programming Language");
        assert_eq!(first.url, "https://go.dev/");
        assert!(first.description.contains("Go is an open source programming language"));
        assert_eq!(first.profile.as_ref().unwrap().name, "Go");
        assert_eq!(first.meta_url.as_ref().unwrap().hostname, "go.dev");
        assert_eq!(first.deep_results.as_ref().unwrap().buttons.len(), 2);
        assert_eq!(first.page_age.as_deref(), Some("2024-05-01T00:00:00"));

        let query = response.query.as_ref().unwrap();
        assert_eq!(query.original, "go programming");
        assert!(response.has_more_results());
        assert!(response.web.as_ref().unwrap().family_friendly);
    }

    #[test]
    fn test_mixed_index_is_typed() {
        let response: SearchResponse = serde_json::from_str(FIXTURE_JSON).unwrap();
        let mixed = response.mixed.unwrap();
        assert_eq!(mixed.main.len(), 4);
        assert_eq!(mixed.main[0], MixedResultRef { kind: "web".into(), index: 0, all: false });
        assert_eq!(mixed.main[3], MixedResultRef { kind: "news".into(), index: 0, all: true });
    }

    #[test]
    fn test_opaque_sections_preserved_verbatim() {
        let json = r#"{"type":"search","news":{"type":"news","results":[{"title":"A",  "odd" : [1,2]}]},
            "infobox":{"type":"graph","data":{"label":"x"}}}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();

        let news = response.news.unwrap();
        assert_eq!(news.kind, "news");
        assert_eq!(news.results.unwrap().get(), r#"[{"title":"A",  "odd" : [1,2]}]"#);
        assert!(news.data.is_none());

        let infobox = response.infobox.unwrap();
        assert_eq!(infobox.data.unwrap().get(), r#"{"label":"x"}"#);
    }

    #[test]
    fn test_empty_results() {
        let json = r#"{"type": "search", "query": {"original": "test"}, "web": {"type": "search", "results": []}}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.result_count(), 0);
        assert!(response.is_web_result_empty());
        assert!(response.first_result().is_none());
        assert!(!response.has_more_results());
    }

    #[test]
    fn test_missing_sections() {
        let response: SearchResponse = serde_json::from_str(r#"{"type":"search"}"#).unwrap();
        assert!(response.web_results().is_empty());
        assert!(!response.has_more_results());
        assert_eq!(response.rate_limit, RateLimit::default());
    }

    #[test]
    fn test_extra_snippets() {
        let json = r#"{"web": {"results": [{"title": "T", "url": "https://t.example", "extra_snippets": ["a", "b"]}]}}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.web_results()[0].extra_snippets, vec!["a", "b"]);
    }
}
