use super::{SearchProvider, keep_new};
use crate::config::FetchConfig;
use crate::error::{HarvestError, SearchError};
use crate::filter::UrlFilter;
use crate::results::SearchResult;
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use std::time::Duration;
use url::Url;

const DDG_HTML_URL: &str = "https://html.duckduckgo.com/html/";

pub const ENGINE_DOMAINS: &[&str] = &["duckduckgo.com"];

static RESULT_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.result__a").expect("valid result selector"));

/// DuckDuckGo's script-free HTML endpoint, no API key required
pub struct DuckDuckGoSearch {
    client: Client,
    filter: UrlFilter,
}

impl DuckDuckGoSearch {
    pub fn new(config: &FetchConfig, filter: UrlFilter) -> Result<Self, HarvestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| HarvestError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, filter })
    }
}

/// Extracts the target of a DuckDuckGo redirect link
/// (`//duckduckgo.com/l/?uddg=<target>&...`); direct links pass through
pub fn resolve_href(href: &str) -> Option<String> {
    let absolute = if href.starts_with("//") {
        format!("https:{}", href)
    } else {
        href.to_string()
    };

    let url = Url::parse(&absolute).ok()?;
    if let Some((_, target)) = url.query_pairs().find(|(key, _)| key == "uddg") {
        return Some(target.into_owned());
    }

    matches!(url.scheme(), "http" | "https").then(|| url.to_string())
}

/// Extracts result links from the HTML endpoint's response, unfiltered
pub fn parse_results(html: &str) -> Vec<SearchResult> {
    let doc = Html::parse_document(html);

    doc.select(&RESULT_LINK)
        .filter_map(|anchor| {
            let url = resolve_href(anchor.value().attr("href")?)?;
            let title = anchor.text().collect::<String>().trim().to_string();
            Some(SearchResult {
                url,
                title: (!title.is_empty()).then_some(title),
            })
        })
        .collect()
}

/// A response with no result links must at least carry the no-results
/// notice; anything else is a challenge page or a changed layout
pub fn check_results_page(html: &str, found: usize) -> Result<(), SearchError> {
    if found > 0 || html.contains("no-results") {
        return Ok(());
    }
    Err(SearchError::Parse(
        "DuckDuckGo response has no result list".to_string(),
    ))
}

#[async_trait]
impl SearchProvider for DuckDuckGoSearch {
    async fn search(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let response = self
            .client
            .post(DDG_HTML_URL)
            .form(&[("q", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SearchError::Status {
                status: response.status().as_u16(),
            });
        }

        let html = response.text().await?;
        let candidates = parse_results(&html);
        check_results_page(&html, candidates.len())?;

        let mut collected = Vec::with_capacity(num_results);
        keep_new(&self.filter, candidates, &mut collected, num_results);

        ::log::info!(
            "DuckDuckGo returned {} results for: {}",
            collected.len(),
            query
        );
        Ok(collected)
    }

    fn name(&self) -> &'static str {
        "duckduckgo"
    }
}
