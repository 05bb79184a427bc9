//! brave-search command line entry point.
//!
//! Runs one web search and prints the results. Settings come from
//! `BRAVE_SEARCH_*` environment variables and the optional TOML file named by
//! `BRAVE_SEARCH_CONFIG_FILE`. Logging goes to stderr so stdout stays clean
//! for `--json` output.

use anyhow::{Context, Result};
use brave_search_client::{
    BraveClient, CancellationToken, Freshness, SafeSearch, SearchParams, SearchResponse, Units,
};
use brave_search_core::Settings;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Search the web with the Brave Search API.
#[derive(Debug, Parser)]
#[command(name = "brave-search", version)]
struct Args {
    /// Search query.
    query: String,

    /// Number of results.
    #[arg(long)]
    count: Option<u32>,

    /// Result page offset.
    #[arg(long)]
    offset: Option<u32>,

    /// Country code, e.g. US.
    #[arg(long)]
    country: Option<String>,

    /// Content language, e.g. en.
    #[arg(long)]
    search_lang: Option<String>,

    /// UI language, e.g. en-US.
    #[arg(long)]
    ui_lang: Option<String>,

    /// off, moderate or strict.
    #[arg(long)]
    safesearch: Option<SafeSearch>,

    /// day, week, month, year or YYYY-MM-DDtoYYYY-MM-DD.
    #[arg(long)]
    freshness: Option<Freshness>,

    /// metric or imperial.
    #[arg(long)]
    units: Option<Units>,

    /// Ask for extra snippets per result.
    #[arg(long)]
    extra_snippets: bool,

    /// Print the raw response as JSON.
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON.
    #[arg(long)]
    log_json: bool,
}

impl Args {
    /// Flags layered over the recommended parameters.
    fn params(&self) -> SearchParams {
        let base = SearchParams::recommended();
        SearchParams {
            count: self.count.or(base.count),
            offset: self.offset.or(base.offset),
            country: self.country.clone(),
            search_lang: self.search_lang.clone(),
            ui_lang: self.ui_lang.clone(),
            safesearch: self.safesearch.or(base.safesearch),
            freshness: self.freshness,
            units: self.units,
            extra_snippets: self.extra_snippets,
            ..base
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    if args.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let settings = Settings::load().context("failed to load settings")?;
    settings.require_api_key()?;
    let client = BraveClient::from_settings(settings).context("failed to create client")?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, cancelling search");
            on_interrupt.cancel();
        }
    });

    let response = client.search(&cancel, &args.query, Some(&args.params())).await?;
    tracing::debug!(
        limit = response.rate_limit.limit,
        remaining = response.rate_limit.remaining,
        reset = response.rate_limit.reset,
        "rate limit window"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_results(&args.query, &response);
    }

    Ok(())
}

fn print_results(query: &str, response: &SearchResponse) {
    println!("Searching for: {query}\n");
    println!("Found {} results\n", response.result_count());

    for (i, result) in response.web_results().iter().enumerate() {
        println!("{}. {}", i + 1, result.title);
        println!("   URL: {}", result.url);
        if !result.description.is_empty() {
            println!("   Description: {}", result.description);
        }
        if let Some(profile) = &result.profile {
            println!("   Source: {}", profile.name);
        }
        println!();
    }

    if response.has_more_results() {
        println!("More results are available.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse() {
        let argv = ["brave-search", "rust async", "--count", "5", "--freshness", "week", "--units", "metric"];
        let args = Args::try_parse_from(argv).unwrap();
        assert_eq!(args.query, "rust async");

        let params = args.params();
        assert_eq!(params.count, Some(5));
        assert_eq!(params.freshness, Some(Freshness::Week));
        assert_eq!(params.units, Some(Units::Metric));
        assert!(params.spellcheck);
        assert!(params.text_decorations);
        assert_eq!(params.safesearch, Some(SafeSearch::Moderate));
    }

    #[test]
    fn test_args_reject_unknown_safesearch() {
        assert!(Args::try_parse_from(["brave-search", "q", "--safesearch", "loose"]).is_err());
    }
}
