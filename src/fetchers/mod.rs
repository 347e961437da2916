pub mod http;
pub mod webdriver;

pub use http::HttpFetcher;
pub use webdriver::WebDriverFetcher;

use crate::config::{FetchBackend, FetchConfig};
use crate::error::{FetchError, HarvestError};
use async_trait::async_trait;
use std::sync::Arc;

/// Retrieves the HTML of a page
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url`, returning its body as text.
    ///
    /// Every failure is reported as a `FetchError`, none are retried.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;

    /// Backend name for logging
    fn name(&self) -> &'static str;

    /// Release held resources once the run is over
    async fn shutdown(&self) {}
}

/// Create the fetcher selected by the configuration
pub fn from_config(config: &FetchConfig, max_sessions: usize) -> Result<Arc<dyn Fetcher>, HarvestError> {
    let fetcher: Arc<dyn Fetcher> = match config.backend {
        FetchBackend::Http => Arc::new(HttpFetcher::new(config)?),
        FetchBackend::WebDriver => Arc::new(WebDriverFetcher::new(config, max_sessions)),
    };
    Ok(fetcher)
}
