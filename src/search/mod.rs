//! Search providers turning a query into result URLs

pub mod duckduckgo;
pub mod google;

pub use duckduckgo::DuckDuckGoSearch;
pub use google::GoogleSearch;

use crate::config::{HarvestConfig, SearchEngine};
use crate::error::{HarvestError, SearchError};
use crate::filter::UrlFilter;
use crate::results::SearchResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Turns a query into an ordered list of result URLs
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Search `query`, returning at most `num_results` results in rank order
    async fn search(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

/// Serves a fixed URL list regardless of the query
#[derive(Debug, Clone, Default)]
pub struct StaticSearch {
    urls: Vec<String>,
}

impl StaticSearch {
    pub fn new(urls: Vec<String>) -> Self {
        Self { urls }
    }
}

#[async_trait]
impl SearchProvider for StaticSearch {
    async fn search(
        &self,
        _query: &str,
        num_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        Ok(self
            .urls
            .iter()
            .take(num_results)
            .map(SearchResult::new)
            .collect())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Appends filtered, not yet seen candidates to `collected` up to `limit`.
/// Returns how many were added.
pub(crate) fn keep_new(
    filter: &UrlFilter,
    candidates: Vec<SearchResult>,
    collected: &mut Vec<SearchResult>,
    limit: usize,
) -> usize {
    let before = collected.len();

    for candidate in candidates {
        if collected.len() >= limit {
            break;
        }
        let Some(url) = filter.accept(&candidate.url) else {
            continue;
        };
        if collected.iter().any(|existing| existing.url == url) {
            continue;
        }
        collected.push(SearchResult {
            url,
            title: candidate.title,
        });
    }

    collected.len() - before
}

/// Create the provider selected by the configuration
pub fn from_config(config: &HarvestConfig) -> Result<Arc<dyn SearchProvider>, HarvestError> {
    let filter_for = |engine_domains: &[&str]| {
        UrlFilter::for_search(
            engine_domains,
            &config.include_patterns,
            &config.exclude_patterns,
        )
        .map_err(|e| HarvestError::Config(format!("invalid URL pattern: {}", e)))
    };

    let provider: Arc<dyn SearchProvider> = match config.search_engine {
        SearchEngine::Google => Arc::new(GoogleSearch::new(
            &config.fetch,
            filter_for(google::ENGINE_DOMAINS)?,
        )?),
        SearchEngine::DuckDuckGo => Arc::new(DuckDuckGoSearch::new(
            &config.fetch,
            filter_for(duckduckgo::ENGINE_DOMAINS)?,
        )?),
        SearchEngine::Static => Arc::new(StaticSearch::new(config.urls.clone())),
    };

    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_search_caps_results() {
        let provider = StaticSearch::new(vec![
            "https://a.example".to_string(),
            "https://b.example".to_string(),
            "https://c.example".to_string(),
        ]);

        let results = provider.search("ignored", 2).await.unwrap();
        assert_eq!(
            results,
            vec![
                SearchResult::new("https://a.example"),
                SearchResult::new("https://b.example"),
            ]
        );
    }

    #[tokio::test]
    async fn test_static_search_empty() {
        let results = StaticSearch::default().search("q", 10).await.unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_keep_new_dedupes_across_pages() {
        let filter = UrlFilter::for_search(&["google.com"], &[], &[]).unwrap();
        let mut collected = Vec::new();

        let first_page = vec![
            SearchResult::new("https://a.example/paper#abstract"),
            SearchResult::new("/search?q=next"),
            SearchResult::new("https://www.google.com/preferences"),
            SearchResult::new("https://b.example/paper"),
        ];
        assert_eq!(keep_new(&filter, first_page, &mut collected, 3), 2);

        let second_page = vec![
            SearchResult::new("https://a.example/paper"),
            SearchResult::new("https://c.example/paper"),
            SearchResult::new("https://d.example/paper"),
        ];
        assert_eq!(keep_new(&filter, second_page, &mut collected, 3), 1);

        let urls: Vec<&str> = collected.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://a.example/paper",
                "https://b.example/paper",
                "https://c.example/paper",
            ]
        );
    }

    #[test]
    fn test_from_config_rejects_bad_pattern() {
        let config = HarvestConfig {
            exclude_patterns: vec!["[".to_string()],
            ..HarvestConfig::default()
        };
        assert!(matches!(from_config(&config), Err(HarvestError::Config(_))));
    }

    #[test]
    fn test_from_config_names() {
        let mut config = HarvestConfig::default();
        assert_eq!(from_config(&config).unwrap().name(), "google");

        config.search_engine = SearchEngine::DuckDuckGo;
        assert_eq!(from_config(&config).unwrap().name(), "duckduckgo");

        config.search_engine = SearchEngine::Static;
        assert_eq!(from_config(&config).unwrap().name(), "static");
    }
}
