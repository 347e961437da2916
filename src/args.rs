use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use yield_keywords::HarvestConfig;
use yield_keywords::config::{FetchBackend, SearchEngine};

#[derive(Parser, Debug)]
#[command(name = "yield-keywords")]
#[command(about = "Searches the web, scrapes the results and charts their most frequent keywords")]
#[command(version)]
pub struct Args {
    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Search query
    #[arg(short, long)]
    pub query: Option<String>,

    /// Number of search results to process
    #[arg(short, long)]
    pub num_results: Option<usize>,

    /// Number of pages fetched concurrently
    #[arg(short, long)]
    pub concurrency: Option<usize>,

    /// Search provider
    #[arg(short, long, value_enum)]
    pub engine: Option<EngineArg>,

    /// Result URL for the static engine (repeatable)
    #[arg(short, long = "url")]
    pub urls: Vec<String>,

    /// Page retrieval backend
    #[arg(short, long, value_enum)]
    pub backend: Option<BackendArg>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Path to the nlprule English tokenizer binary
    #[arg(long)]
    pub tokenizer: Option<PathBuf>,

    /// Where to write the SVG chart
    #[arg(long)]
    pub chart: Option<PathBuf>,

    /// Number of keywords to chart
    #[arg(long)]
    pub top: Option<usize>,

    /// Print the results as JSON instead of the text report
    #[arg(long)]
    pub json: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum EngineArg {
    Google,
    Duckduckgo,
    Static,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    Http,
    Webdriver,
}

impl Args {
    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply(&self, config: &mut HarvestConfig) {
        if let Some(query) = &self.query {
            config.query = query.clone();
        }
        if let Some(num_results) = self.num_results {
            config.num_results = num_results;
        }
        if let Some(concurrency) = self.concurrency {
            config.max_concurrency = concurrency;
        }
        if let Some(engine) = self.engine {
            config.search_engine = match engine {
                EngineArg::Google => SearchEngine::Google,
                EngineArg::Duckduckgo => SearchEngine::DuckDuckGo,
                EngineArg::Static => SearchEngine::Static,
            };
        }
        if !self.urls.is_empty() {
            config.urls = self.urls.clone();
            // URLs on the command line imply the static engine unless one was chosen
            if self.engine.is_none() {
                config.search_engine = SearchEngine::Static;
            }
        }
        if let Some(backend) = self.backend {
            config.fetch.backend = match backend {
                BackendArg::Http => FetchBackend::Http,
                BackendArg::Webdriver => FetchBackend::WebDriver,
            };
        }
        if let Some(timeout) = self.timeout {
            config.fetch.timeout_secs = timeout;
        }
        if let Some(tokenizer) = &self.tokenizer {
            config.tokenizer_path = tokenizer.clone();
        }
        if let Some(chart) = &self.chart {
            config.report.chart_path = chart.clone();
        }
        if let Some(top) = self.top {
            config.report.top_n = top;
        }
    }
}
