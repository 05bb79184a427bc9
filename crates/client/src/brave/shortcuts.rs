//! One-parameter search shortcuts.
//!
//! Each starts from [`SearchParams::recommended`], sets a single field and
//! delegates to [`BraveClient::search`].

use tokio_util::sync::CancellationToken;

use super::{BraveClient, BraveError, Freshness, ResultFilter, SafeSearch, SearchParams, SearchResponse, Units};

impl BraveClient {
    async fn search_preset(
        &self,
        cancel: &CancellationToken,
        query: &str,
        customize: impl FnOnce(&mut SearchParams),
    ) -> Result<SearchResponse, BraveError> {
        let mut params = SearchParams::recommended();
        customize(&mut params);
        self.search(cancel, query, Some(&params)).await
    }

    pub async fn search_with_country(
        &self,
        cancel: &CancellationToken,
        query: &str,
        country: impl Into<String>,
    ) -> Result<SearchResponse, BraveError> {
        let country = country.into();
        self.search_preset(cancel, query, |p| p.country = Some(country)).await
    }

    pub async fn search_with_language(
        &self,
        cancel: &CancellationToken,
        query: &str,
        search_lang: impl Into<String>,
    ) -> Result<SearchResponse, BraveError> {
        let search_lang = search_lang.into();
        self.search_preset(cancel, query, |p| p.search_lang = Some(search_lang)).await
    }

    /// Search restricted to the news section.
    pub async fn search_news(&self, cancel: &CancellationToken, query: &str) -> Result<SearchResponse, BraveError> {
        self.search_preset(cancel, query, |p| p.result_filter = vec![ResultFilter::News]).await
    }

    /// Search restricted to the videos section.
    pub async fn search_videos(&self, cancel: &CancellationToken, query: &str) -> Result<SearchResponse, BraveError> {
        self.search_preset(cancel, query, |p| p.result_filter = vec![ResultFilter::Videos]).await
    }

    pub async fn search_with_safe_search(
        &self,
        cancel: &CancellationToken,
        query: &str,
        safesearch: SafeSearch,
    ) -> Result<SearchResponse, BraveError> {
        self.search_preset(cancel, query, |p| p.safesearch = Some(safesearch)).await
    }

    pub async fn search_with_freshness(
        &self,
        cancel: &CancellationToken,
        query: &str,
        freshness: Freshness,
    ) -> Result<SearchResponse, BraveError> {
        self.search_preset(cancel, query, |p| p.freshness = Some(freshness)).await
    }

    pub async fn search_with_pagination(
        &self,
        cancel: &CancellationToken,
        query: &str,
        count: u32,
        offset: u32,
    ) -> Result<SearchResponse, BraveError> {
        self.search_preset(cancel, query, |p| {
            p.count = Some(count);
            p.offset = Some(offset);
        })
        .await
    }

    /// Search with `summary` enabled.
    pub async fn search_summary(&self, cancel: &CancellationToken, query: &str) -> Result<SearchResponse, BraveError> {
        self.search_preset(cancel, query, |p| p.summary = true).await
    }

    pub async fn search_with_units(
        &self,
        cancel: &CancellationToken,
        query: &str,
        units: Units,
    ) -> Result<SearchResponse, BraveError> {
        self.search_preset(cancel, query, |p| p.units = Some(units)).await
    }

    /// Search limited to the past day.
    pub async fn search_recent(&self, cancel: &CancellationToken, query: &str) -> Result<SearchResponse, BraveError> {
        self.search_with_freshness(cancel, query, Freshness::Day).await
    }
}
