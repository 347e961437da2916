use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for filtering the links a search provider returns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlFilterConfig {
    /// Domains whose links are never results (the search engine itself, its CDNs)
    #[serde(default)]
    pub excluded_domains: Vec<String>,

    /// Regex patterns for URLs to include (if empty, all URLs are included unless excluded)
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Regex patterns for URLs to exclude (these take precedence over include patterns)
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

impl Default for UrlFilterConfig {
    fn default() -> Self {
        Self {
            excluded_domains: Vec::new(),
            include_patterns: Vec::new(),
            exclude_patterns: default_exclude_patterns(),
        }
    }
}

/// Static assets never make useful result pages
fn default_exclude_patterns() -> Vec<String> {
    vec![r"\.(jpg|jpeg|png|gif|css|js|ico|svg|woff|woff2|ttf|eot|zip)$".to_string()]
}

/// Decides which raw search-result links are worth fetching
#[derive(Debug)]
pub struct UrlFilter {
    config: UrlFilterConfig,
    include_regexes: Vec<Regex>,
    exclude_regexes: Vec<Regex>,
}

impl UrlFilter {
    /// Create a new URL filter from configuration
    pub fn new(config: UrlFilterConfig) -> Result<Self, regex::Error> {
        let include_regexes = config
            .include_patterns
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;

        let exclude_regexes = config
            .exclude_patterns
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            config,
            include_regexes,
            exclude_regexes,
        })
    }

    /// Build a filter that also drops the given search-engine domains,
    /// on top of user patterns
    pub fn for_search(
        excluded_domains: &[&str],
        include_patterns: &[String],
        exclude_patterns: &[String],
    ) -> Result<Self, regex::Error> {
        let mut patterns = default_exclude_patterns();
        patterns.extend(exclude_patterns.iter().cloned());

        Self::new(UrlFilterConfig {
            excluded_domains: excluded_domains.iter().map(|d| d.to_string()).collect(),
            include_patterns: include_patterns.to_vec(),
            exclude_patterns: patterns,
        })
    }

    /// Determine if a URL is an acceptable search result
    pub fn should_keep(&self, url: &Url) -> bool {
        if !matches!(url.scheme(), "http" | "https") {
            return false;
        }

        if self.is_excluded_domain(url) {
            return false;
        }

        // Exclusions take precedence
        let url_str = url.as_str();
        if self.exclude_regexes.iter().any(|re| re.is_match(url_str)) {
            return false;
        }

        self.include_regexes.is_empty() || self.include_regexes.iter().any(|re| re.is_match(url_str))
    }

    /// A host matches an excluded domain when it equals it or is a subdomain of it
    fn is_excluded_domain(&self, url: &Url) -> bool {
        let Some(host) = url.host_str() else {
            return true;
        };
        self.config.excluded_domains.iter().any(|domain| {
            host == domain
                || host
                    .strip_suffix(domain.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    /// Create a normalized version of the URL (e.g., removing fragments)
    pub fn normalize_url(&self, url: &Url) -> Url {
        let mut normalized = url.clone();
        normalized.set_fragment(None);
        normalized
    }

    /// Parse and filter one absolute link, returning its normalized form
    pub fn accept(&self, link: &str) -> Option<String> {
        let Ok(url) = Url::parse(link) else {
            ::log::trace!("Skipping unparseable link: {}", link);
            return None;
        };
        if !self.should_keep(&url) {
            ::log::trace!("URL filter rejected: {}", url);
            return None;
        }
        Some(self.normalize_url(&url).to_string())
    }
}
