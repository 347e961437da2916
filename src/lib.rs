pub mod aggregator;
pub mod config;
pub mod error;
pub mod fetchers;
pub mod filter;
pub mod nlp;
pub mod parsers;
pub mod report;
pub mod results;
pub mod search;

#[cfg(test)]
mod testing;

// Re-export commonly used types for convenience
pub use config::HarvestConfig;
pub use error::HarvestError;
pub use results::{FrequencyTable, HarvestResults, SearchResult, UrlKeywordMap};

use aggregator::AggregateOptions;
use fetchers::Fetcher;
use nlp::{PosTagger, RuleTagger};
use search::SearchProvider;
use std::sync::Arc;

/// Builder for one search → fetch → extract → aggregate run
pub struct Harvest {
    config: HarvestConfig,
    search: Option<Arc<dyn SearchProvider>>,
    fetcher: Option<Arc<dyn Fetcher>>,
    tagger: Option<Arc<dyn PosTagger>>,
}

impl Harvest {
    /// Create a new Harvest builder for the given query
    pub fn new(query: impl Into<String>) -> Self {
        Self::with_config(HarvestConfig {
            query: query.into(),
            ..HarvestConfig::default()
        })
    }

    /// Create a builder from a full configuration
    pub fn with_config(config: HarvestConfig) -> Self {
        Self {
            config,
            search: None,
            fetcher: None,
            tagger: None,
        }
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(path: impl AsRef<std::path::Path>) -> Result<Self, HarvestError> {
        Ok(Self::with_config(HarvestConfig::from_file(path)?))
    }

    /// Set the number of search results to process
    pub fn with_num_results(mut self, num_results: usize) -> Self {
        self.config.num_results = num_results;
        self
    }

    /// Set the maximum number of concurrent page fetches
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.config.max_concurrency = max_concurrency;
        self
    }

    /// Use this search provider instead of the configured one
    pub fn with_search_provider(mut self, search: Arc<dyn SearchProvider>) -> Self {
        self.search = Some(search);
        self
    }

    /// Use this fetcher instead of the configured one
    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Use this tagger instead of loading the nlprule model
    pub fn with_tagger(mut self, tagger: Arc<dyn PosTagger>) -> Self {
        self.tagger = Some(tagger);
        self
    }

    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    /// Run the search step.
    ///
    /// Zero results is an error: there would be nothing to process.
    pub async fn search(&self) -> Result<Vec<SearchResult>, HarvestError> {
        self.config.validate()?;

        let provider = match &self.search {
            Some(provider) => Arc::clone(provider),
            None => search::from_config(&self.config)?,
        };

        ::log::info!(
            "Searching {} for {:?} ({} results)",
            provider.name(),
            self.config.query,
            self.config.num_results
        );
        let results = provider
            .search(&self.config.query, self.config.num_results)
            .await?;

        if results.is_empty() {
            return Err(HarvestError::EmptyResults {
                query: self.config.query.clone(),
            });
        }

        Ok(results)
    }

    /// Fetch, extract and tag every result and aggregate the keywords
    pub async fn process(
        &self,
        results: Vec<SearchResult>,
    ) -> Result<HarvestResults, HarvestError> {
        if results.is_empty() {
            return Err(HarvestError::EmptyResults {
                query: self.config.query.clone(),
            });
        }

        let tagger = match &self.tagger {
            Some(tagger) => Arc::clone(tagger),
            None => {
                let path = self.config.tokenizer_path.clone();
                // model loading reads and deserializes a large file
                let tagger = tokio::task::spawn_blocking(move || RuleTagger::from_path(path))
                    .await
                    .map_err(|e| HarvestError::Tagger(e.to_string()))??;
                Arc::new(tagger)
            }
        };

        let fetcher = match &self.fetcher {
            Some(fetcher) => Arc::clone(fetcher),
            None => {
                let mut config = self.config.clone();
                config.apply_env();
                fetchers::from_config(&config.fetch, config.max_concurrency)?
            }
        };

        let urls = results.into_iter().map(|result| result.url).collect();
        let options = AggregateOptions {
            max_concurrency: self.config.max_concurrency,
            keywords_per_url: self.config.keywords_per_url,
        };

        let outcome = aggregator::process_urls(urls, Arc::clone(&fetcher), tagger, options).await;
        fetcher.shutdown().await;
        outcome
    }

    /// Search, then process the results
    pub async fn run(&self) -> Result<HarvestResults, HarvestError> {
        let results = self.search().await?;
        self.process(results).await
    }
}
