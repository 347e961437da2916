//! Test doubles shared by the unit tests

use crate::error::FetchError;
use crate::fetchers::Fetcher;
use crate::nlp::{PosTag, PosTagger, TaggedToken};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Tags words from a fixed table; unknown words are `PosTag::Other`
#[derive(Debug, Default)]
pub struct LexiconTagger {
    entries: HashMap<String, (String, PosTag)>,
}

impl LexiconTagger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, word: &str, lemma: &str, pos: PosTag) -> Self {
        self.entries
            .insert(word.to_string(), (lemma.to_string(), pos));
        self
    }

    /// Tags every listed word as a noun with itself as lemma
    pub fn nouns(words: &[&str]) -> Self {
        words
            .iter()
            .fold(Self::new(), |tagger, word| tagger.with(word, word, PosTag::Noun))
    }
}

impl PosTagger for LexiconTagger {
    fn tag(&self, text: &str) -> Vec<TaggedToken> {
        let mut tokens = Vec::new();
        let mut current = String::new();

        let flush = |word: &mut String, tokens: &mut Vec<TaggedToken>| {
            if word.is_empty() {
                return;
            }
            let token = match self.entries.get(word.as_str()) {
                Some((lemma, pos)) => TaggedToken::new(word.clone(), lemma.clone(), *pos),
                None => TaggedToken::new(word.clone(), word.clone(), PosTag::Other),
            };
            tokens.push(token);
            word.clear();
        };

        for c in text.chars() {
            if c.is_alphanumeric() {
                current.push(c);
            } else {
                flush(&mut current, &mut tokens);
                if !c.is_whitespace() {
                    tokens.push(TaggedToken::new(c, c, PosTag::Punctuation));
                }
            }
        }
        flush(&mut current, &mut tokens);

        tokens
    }

    fn name(&self) -> &'static str {
        "lexicon"
    }
}

/// What the mock fetcher answers for a URL
#[derive(Debug, Clone)]
pub enum MockPage {
    Html(String),
    Status(u16),
}

/// Serves canned pages; unknown URLs answer 404
#[derive(Debug, Default)]
pub struct MockFetcher {
    pages: HashMap<String, MockPage>,
    calls: AtomicUsize,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_html(mut self, url: &str, html: &str) -> Self {
        self.pages
            .insert(url.to_string(), MockPage::Html(html.to_string()));
        self
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.pages.insert(url.to_string(), MockPage::Status(status));
        self
    }

    /// Number of fetches performed so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // let other workers interleave
        tokio::task::yield_now().await;

        match self.pages.get(url) {
            Some(MockPage::Html(html)) => Ok(html.clone()),
            Some(MockPage::Status(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// A page with a title and paragraphs
pub fn page(title: &str, paragraphs: &[&str]) -> String {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<p>{}</p>", p))
        .collect();
    format!(
        "<html><head><title>{}</title></head><body>{}</body></html>",
        title, body
    )
}
