//! Keyword extraction on top of a part-of-speech tagger
//!
//! The tagger is injected as a trait object so the pipeline can run against
//! the nlprule English model in production and a fixed lexicon in tests.

pub mod rule_tagger;

pub use rule_tagger::RuleTagger;

use crate::results::KeywordList;

/// Coarse part-of-speech categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    Noun,
    ProperNoun,
    Adjective,
    Verb,
    Adverb,
    Pronoun,
    Determiner,
    Adposition,
    Conjunction,
    Numeral,
    Punctuation,
    Other,
}

impl PosTag {
    /// Map a Penn Treebank tag onto the coarse categories
    pub fn from_penn(tag: &str) -> Self {
        match tag {
            "NN" | "NNS" => PosTag::Noun,
            "NNP" | "NNPS" => PosTag::ProperNoun,
            "JJ" | "JJR" | "JJS" => PosTag::Adjective,
            "PRP" | "PRP$" | "WP" | "WP$" | "EX" => PosTag::Pronoun,
            "DT" | "PDT" | "WDT" => PosTag::Determiner,
            "IN" | "TO" => PosTag::Adposition,
            "CC" => PosTag::Conjunction,
            "CD" => PosTag::Numeral,
            "SENT_END" | "PCT" | "." | "," | ":" | "``" | "''" | "-LRB-" | "-RRB-" => {
                PosTag::Punctuation
            }
            t if t.starts_with("VB") || t == "MD" => PosTag::Verb,
            t if t.starts_with("RB") || t == "WRB" => PosTag::Adverb,
            _ => PosTag::Other,
        }
    }

    /// Whether tokens with this tag are kept as keywords
    pub fn is_keyword(&self) -> bool {
        matches!(self, PosTag::Noun | PosTag::Adjective)
    }
}

/// A token with its lemma and part of speech
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    /// Surface text
    pub text: String,
    /// Dictionary form
    pub lemma: String,
    pub pos: PosTag,
}

impl TaggedToken {
    pub fn new(text: impl Into<String>, lemma: impl Into<String>, pos: PosTag) -> Self {
        Self {
            text: text.into(),
            lemma: lemma.into(),
            pos,
        }
    }

    /// Non-empty and made only of alphabetic characters
    pub fn is_alpha(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(char::is_alphabetic)
    }
}

/// Tokenizes, tags and lemmatizes text
pub trait PosTagger: Send + Sync {
    /// Tag `text`, returning tokens in source order
    fn tag(&self, text: &str) -> Vec<TaggedToken>;

    /// Name for logging
    fn name(&self) -> &'static str;
}

/// Lemmas of the alphabetic nouns and adjectives of `text`, in token order.
///
/// Text is lower-cased before tagging. Duplicates are kept.
pub fn extract_features(tagger: &dyn PosTagger, text: &str) -> KeywordList {
    if text.trim().is_empty() {
        return Vec::new();
    }

    tagger
        .tag(&text.to_lowercase())
        .into_iter()
        .filter(|token| token.is_alpha() && token.pos.is_keyword())
        .map(|token| token.lemma)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::LexiconTagger;

    #[test]
    fn test_extract_features_keeps_nouns_only_here() {
        let tagger = LexiconTagger::new()
            .with("suspect", "suspect", PosTag::Noun)
            .with("fled", "flee", PosTag::Verb)
            .with("quickly", "quickly", PosTag::Adverb);

        let keywords = extract_features(&tagger, "The suspect fled quickly.");
        assert_eq!(keywords, vec!["suspect".to_string()]);
    }

    #[test]
    fn test_extract_features_returns_lemmas_in_order_with_duplicates() {
        let tagger = LexiconTagger::new()
            .with("crimes", "crime", PosTag::Noun)
            .with("violent", "violent", PosTag::Adjective)
            .with("crime", "crime", PosTag::Noun)
            .with("rose", "rise", PosTag::Verb);

        let keywords = extract_features(&tagger, "Violent crimes rose, violent crime too");
        assert_eq!(keywords, vec!["violent", "crime", "violent", "crime"]);
    }

    #[test]
    fn test_extract_features_lowercases_before_tagging() {
        let tagger = LexiconTagger::new().with("police", "police", PosTag::Noun);
        assert_eq!(extract_features(&tagger, "POLICE Police"), vec!["police", "police"]);
    }

    #[test]
    fn test_extract_features_drops_non_alpha_tokens() {
        let tagger = LexiconTagger::new()
            .with("covid19", "covid19", PosTag::Noun)
            .with("2020", "2020", PosTag::Noun)
            .with("data", "data", PosTag::Noun);

        assert_eq!(extract_features(&tagger, "covid19 2020 data"), vec!["data"]);
    }

    #[test]
    fn test_extract_features_excludes_proper_nouns() {
        let tagger = LexiconTagger::new().with("interpol", "interpol", PosTag::ProperNoun);
        assert!(extract_features(&tagger, "Interpol").is_empty());
    }

    #[test]
    fn test_extract_features_empty_input() {
        let tagger = LexiconTagger::new();
        assert!(extract_features(&tagger, "").is_empty());
        assert!(extract_features(&tagger, "   ").is_empty());
    }

    #[test]
    fn test_from_penn() {
        assert_eq!(PosTag::from_penn("NN"), PosTag::Noun);
        assert_eq!(PosTag::from_penn("NNS"), PosTag::Noun);
        assert_eq!(PosTag::from_penn("NNP"), PosTag::ProperNoun);
        assert_eq!(PosTag::from_penn("JJR"), PosTag::Adjective);
        assert_eq!(PosTag::from_penn("VBD"), PosTag::Verb);
        assert_eq!(PosTag::from_penn("RB"), PosTag::Adverb);
        assert_eq!(PosTag::from_penn("DT"), PosTag::Determiner);
        assert_eq!(PosTag::from_penn("CD"), PosTag::Numeral);
        assert_eq!(PosTag::from_penn("SYM"), PosTag::Other);
        assert_eq!(PosTag::from_penn(""), PosTag::Other);
    }

    #[test]
    fn test_is_alpha() {
        assert!(TaggedToken::new("théft", "théft", PosTag::Noun).is_alpha());
        assert!(!TaggedToken::new("e-mail", "e-mail", PosTag::Noun).is_alpha());
        assert!(!TaggedToken::new("", "", PosTag::Noun).is_alpha());
    }
}
