use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lemmas of one page, in token order, duplicates kept
pub type KeywordList = Vec<String>;

/// A URL returned by a search provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// URL of the result page
    pub url: String,

    /// Result title, when the provider shows one
    pub title: Option<String>,
}

impl SearchResult {
    /// Create a result with no title
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
        }
    }
}

/// Keywords extracted from one successfully processed page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageKeywords {
    /// URL the page was fetched from
    pub url: String,

    /// Every keyword of the page, not truncated
    pub keywords: KeywordList,
}

/// Occurrence count per lemma, remembering first-insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(String, usize)>", into = "Vec<(String, usize)>")]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `lemma`
    pub fn add(&mut self, lemma: &str) {
        self.add_count(lemma, 1);
    }

    /// Count `count` more occurrences of `lemma`
    pub fn add_count(&mut self, lemma: &str, count: usize) {
        match self.index.get(lemma) {
            Some(&pos) => self.entries[pos].1 += count,
            None => {
                self.index.insert(lemma.to_string(), self.entries.len());
                self.entries.push((lemma.to_string(), count));
            }
        }
    }

    /// Count every lemma of a keyword sequence
    pub fn update<I, S>(&mut self, lemmas: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for lemma in lemmas {
            self.add(lemma.as_ref());
        }
    }

    /// Occurrences of `lemma` (0 when never seen)
    pub fn get(&self, lemma: &str) -> usize {
        self.index
            .get(lemma)
            .map(|&pos| self.entries[pos].1)
            .unwrap_or(0)
    }

    /// Number of distinct lemmas
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Entries in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries
            .iter()
            .map(|(lemma, count)| (lemma.as_str(), *count))
    }

    /// The `n` most frequent lemmas, highest count first.
    ///
    /// Ties keep first-insertion order.
    pub fn most_common(&self, n: usize) -> Vec<(String, usize)> {
        let mut ranked = self.entries.clone();
        // stable: equal counts stay in insertion order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

impl From<Vec<(String, usize)>> for FrequencyTable {
    fn from(entries: Vec<(String, usize)>) -> Self {
        let mut table = Self::new();
        for (lemma, count) in entries {
            table.add_count(&lemma, count);
        }
        table
    }
}

impl From<FrequencyTable> for Vec<(String, usize)> {
    fn from(table: FrequencyTable) -> Self {
        table.entries
    }
}

/// Top keywords per URL, in the order pages completed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlKeywordMap {
    entries: Vec<(String, KeywordList)>,
}

impl UrlKeywordMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the first `limit` keywords of a page.
    ///
    /// Empty keyword lists are never stored. A URL seen twice keeps its
    /// latest keywords in its original position.
    pub fn insert(&mut self, url: &str, keywords: &[String], limit: usize) {
        if keywords.is_empty() || limit == 0 {
            return;
        }
        let top: KeywordList = keywords.iter().take(limit).cloned().collect();
        match self.entries.iter_mut().find(|(existing, _)| existing == url) {
            Some(entry) => entry.1 = top,
            None => self.entries.push((url.to_string(), top)),
        }
    }

    pub fn get(&self, url: &str) -> Option<&KeywordList> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == url)
            .map(|(_, keywords)| keywords)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.get(url).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in completion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &KeywordList)> {
        self.entries
            .iter()
            .map(|(url, keywords)| (url.as_str(), keywords))
    }
}

/// Everything a harvest run produces
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarvestResults {
    /// Keyword counts across all pages
    pub frequencies: FrequencyTable,

    /// Leading keywords of each page
    pub url_keywords: UrlKeywordMap,

    /// Number of URLs handed to the worker pool
    pub urls_processed: usize,

    /// Number of URLs that contributed nothing
    pub urls_skipped: usize,
}

impl HarvestResults {
    /// Merge one page into the tables
    pub fn record(&mut self, page: &PageKeywords, keywords_per_url: usize) {
        self.frequencies.update(&page.keywords);
        self.url_keywords
            .insert(&page.url, &page.keywords, keywords_per_url);
    }
}
