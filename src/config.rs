use crate::error::HarvestError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Query used when none is given on the command line or in a config file
pub const DEFAULT_QUERY: &str =
    "Crime reporting papers site:researchgate.net OR site:sciencedirect.com OR site:springer.com";

/// Which search provider produces the result URLs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchEngine {
    /// Google HTML results
    #[default]
    Google,
    /// DuckDuckGo HTML results
    DuckDuckGo,
    /// Fixed list from `HarvestConfig::urls`
    Static,
}

/// How pages are retrieved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchBackend {
    /// Plain HTTP GET
    #[default]
    Http,
    /// Rendered through a WebDriver session
    WebDriver,
}

/// Configuration for page retrieval
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Retrieval backend
    pub backend: FetchBackend,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    pub user_agent: String,

    /// URL for the WebDriver instance
    pub webdriver_url: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            backend: FetchBackend::default(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            webdriver_url: default_webdriver_url(),
        }
    }
}

/// Configuration for the reporter and its chart
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Number of keywords plotted
    pub top_n: usize,

    /// Where the SVG chart is written
    pub chart_path: PathBuf,

    /// Chart caption
    pub chart_title: String,

    /// Chart width in pixels
    pub width: u32,

    /// Chart height in pixels
    pub height: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            chart_path: PathBuf::from("keywords.svg"),
            chart_title: "Top 10 Distinctive Features in Crime Reporting Papers".to_string(),
            width: 1000,
            height: 500,
        }
    }
}

/// Full configuration of a harvest run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// Search query
    pub query: String,

    /// Number of search results to process
    pub num_results: usize,

    /// Search provider
    pub search_engine: SearchEngine,

    /// URLs served by the static search provider
    pub urls: Vec<String>,

    /// Maximum number of pages fetched concurrently
    pub max_concurrency: usize,

    /// Keywords kept per URL for the summary
    pub keywords_per_url: usize,

    /// Path to the nlprule English tokenizer binary
    pub tokenizer_path: PathBuf,

    /// Regex patterns a result URL must match (any of them)
    pub include_patterns: Vec<String>,

    /// Regex patterns that drop a result URL
    pub exclude_patterns: Vec<String>,

    pub fetch: FetchConfig,

    pub report: ReportConfig,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY.to_string(),
            num_results: 10,
            search_engine: SearchEngine::default(),
            urls: Vec::new(),
            max_concurrency: default_max_concurrency(),
            keywords_per_url: 5,
            tokenizer_path: PathBuf::from("en_tokenizer.bin"),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            fetch: FetchConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl HarvestConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, HarvestError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, HarvestError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides (`WEBDRIVER_URL`)
    pub fn apply_env(&mut self) {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.fetch.webdriver_url = webdriver_url;
            }
        }
    }

    /// Reject values the pipeline cannot run with
    pub fn validate(&self) -> Result<(), HarvestError> {
        if self.max_concurrency == 0 {
            return Err(HarvestError::Config(
                "max_concurrency must be at least 1".to_string(),
            ));
        }
        if self.num_results == 0 {
            return Err(HarvestError::Config(
                "num_results must be at least 1".to_string(),
            ));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(HarvestError::Config(
                "fetch.timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.search_engine == SearchEngine::Static && self.urls.is_empty() {
            ::log::warn!("Static search engine selected with an empty URL list");
        }
        Ok(())
    }
}

/// Default value for max_concurrency
fn default_max_concurrency() -> usize {
    5
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}
