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

const GOOGLE_URL: &str = "https://www.google.com/search";

/// Result pages requested before giving up on filling the quota
const MAX_PAGES: usize = 3;

/// Links into these domains are navigation, not results
pub const ENGINE_DOMAINS: &[&str] = &[
    "google.com",
    "googleusercontent.com",
    "gstatic.com",
    "youtube.com",
    "webcache.googleusercontent.com",
];

static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid anchor selector"));
static HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h3").expect("valid heading selector"));

/// Scrapes Google's HTML result pages
pub struct GoogleSearch {
    client: Client,
    filter: UrlFilter,
}

impl GoogleSearch {
    pub fn new(config: &FetchConfig, filter: UrlFilter) -> Result<Self, HarvestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| HarvestError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, filter })
    }

    async fn fetch_page(&self, query: &str, num: usize, start: usize) -> Result<String, SearchError> {
        let num = num.to_string();
        let start = start.to_string();

        let response = self
            .client
            .get(GOOGLE_URL)
            .query(&[
                ("q", query),
                ("num", num.as_str()),
                ("hl", "en"),
                ("start", start.as_str()),
                ("safe", "active"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SearchError::Status {
                status: response.status().as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Resolves a result anchor's href to the target URL.
///
/// Google wraps results as `/url?q=<target>&...` when scripts are off.
pub fn resolve_href(href: &str) -> Option<String> {
    if href.starts_with("/url?") {
        let wrapped = Url::parse("https://www.google.com").ok()?.join(href).ok()?;
        return wrapped
            .query_pairs()
            .find(|(key, _)| key == "q" || key == "url")
            .map(|(_, target)| target.into_owned());
    }

    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }

    None
}

/// Whether Google served its rate-limit interstitial instead of results
pub fn is_blocked_page(html: &str) -> bool {
    html.contains("/sorry/") || html.contains("unusual traffic from your computer")
}

/// Extracts candidate result links from a result page, unfiltered
pub fn parse_results(html: &str) -> Vec<SearchResult> {
    let doc = Html::parse_document(html);

    doc.select(&ANCHOR)
        .filter_map(|anchor| {
            let url = resolve_href(anchor.value().attr("href")?)?;
            let title = anchor
                .select(&HEADING)
                .next()
                .map(|h| h.text().collect::<String>().trim().to_string())
                .filter(|t| !t.is_empty());
            Some(SearchResult { url, title })
        })
        .collect()
}

#[async_trait]
impl SearchProvider for GoogleSearch {
    async fn search(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let mut collected = Vec::with_capacity(num_results);

        for page in 0..MAX_PAGES {
            if collected.len() >= num_results {
                break;
            }

            let html = self
                .fetch_page(query, num_results + 2, page * (num_results + 2))
                .await?;
            if is_blocked_page(&html) {
                if collected.is_empty() {
                    return Err(SearchError::Parse(
                        "Google answered with a captcha page".to_string(),
                    ));
                }
                ::log::warn!(
                    "Google started answering with a captcha, keeping {} results",
                    collected.len()
                );
                break;
            }

            let candidates = parse_results(&html);
            ::log::debug!(
                "Google page {} returned {} candidate links",
                page,
                candidates.len()
            );

            if keep_new(&self.filter, candidates, &mut collected, num_results) == 0 {
                if html.contains("did not match any documents") {
                    ::log::info!("Google found no results for: {}", query);
                } else if page == 0 {
                    ::log::warn!("Google returned no usable links for: {}", query);
                }
                break;
            }
        }

        ::log::info!("Google returned {} results for: {}", collected.len(), query);
        Ok(collected)
    }

    fn name(&self) -> &'static str {
        "google"
    }
}
