use thiserror::Error;

/// Failure to retrieve a single page
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, TLS, connection reset, ...)
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// No response within the configured timeout
    #[error("timed out after {timeout_secs}s fetching {url}")]
    Timeout { url: String, timeout_secs: u64 },

    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Response body is not text (PDF, image, archive, ...)
    #[error("non-text response ({content_type}) from {url}")]
    NotText { url: String, content_type: String },

    /// WebDriver command failed
    #[error("WebDriver failed on {url}: {message}")]
    WebDriver { url: String, message: String },

    /// No WebDriver session could be opened
    #[error("no WebDriver session available for {url}")]
    NoSession { url: String },
}

/// Failure of the search step
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("search provider returned HTTP {status}")]
    Status { status: u16 },

    /// Response is not a result page (captcha, consent wall, changed layout)
    #[error("could not read search results: {0}")]
    Parse(String),
}

/// Why a single URL contributed nothing to the run
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("no title, description or paragraph text found")]
    NoContent,

    #[error("no noun or adjective keywords found")]
    NoKeywords,

    #[error("keyword tagging aborted: {0}")]
    Tagger(String),
}

/// Run-level failures surfaced to the user
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("search for {query:?} returned no results, nothing to process")]
    EmptyResults { query: String },

    #[error("no URLs to process")]
    NoUrls,

    #[error("no keywords were extracted from any page")]
    EmptyFrequency,

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to load NLP model: {0}")]
    Tagger(String),

    #[error("failed to render chart: {0}")]
    Chart(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
