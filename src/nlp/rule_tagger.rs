use super::{PosTag, PosTagger, TaggedToken};
use crate::error::HarvestError;
use nlprule::Tokenizer;
use std::path::Path;

/// Placeholder tags nlprule attaches besides the real readings
const MARKER_TAGS: &[&str] = &["", "UNKNOWN", "SENT_START", "SENT_END"];

/// Tagger backed by the nlprule English tokenizer model
pub struct RuleTagger {
    tokenizer: Tokenizer,
}

impl RuleTagger {
    /// Load the tokenizer binary (`en_tokenizer.bin`) from disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, HarvestError> {
        let path = path.as_ref();
        ::log::info!("Loading NLP model from {}", path.display());

        let tokenizer = Tokenizer::new(path)
            .map_err(|e| HarvestError::Tagger(format!("{}: {}", path.display(), e)))?;

        Ok(Self { tokenizer })
    }
}

/// Choose one `(pos, lemma)` reading for a token.
///
/// nlprule keeps every reading that survives disambiguation, in no
/// significant order. Marker tags are ignored; a noun or adjective reading
/// wins over the others, then the first remaining one. A token with no real
/// reading is a word missing from the dictionary and is taken as a noun.
/// Empty lemmas fall back to the surface text.
pub(crate) fn pick_reading<'a>(readings: &[(&'a str, &'a str)], surface: &'a str) -> (&'a str, PosTag) {
    let mut tagged = readings
        .iter()
        .filter(|(pos, _)| !MARKER_TAGS.contains(pos))
        .map(|&(pos, lemma)| (PosTag::from_penn(pos), lemma))
        .peekable();

    let Some(&(first_pos, first_lemma)) = tagged.peek() else {
        return (surface, PosTag::Noun);
    };

    let (pos, lemma) = tagged
        .find(|(pos, _)| pos.is_keyword())
        .unwrap_or((first_pos, first_lemma));

    let lemma = if lemma.is_empty() { surface } else { lemma };
    (lemma, pos)
}

impl PosTagger for RuleTagger {
    fn tag(&self, text: &str) -> Vec<TaggedToken> {
        let mut tagged = Vec::new();

        for sentence in self.tokenizer.pipe(text) {
            for token in sentence.tokens() {
                let word = token.word();
                let surface = word.text().as_str();
                if surface.is_empty() {
                    // sentence-start marker
                    continue;
                }

                let readings: Vec<(&str, &str)> = word
                    .tags()
                    .iter()
                    .map(|data| (data.pos().as_str(), data.lemma().as_str()))
                    .collect();
                let (lemma, pos) = pick_reading(&readings, surface);

                tagged.push(TaggedToken::new(surface, lemma, pos));
            }
        }

        tagged
    }

    fn name(&self) -> &'static str {
        "nlprule"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noun_reading_wins_regardless_of_order() {
        let verb_first = [("VBP", "report"), ("NN", "report"), ("", "")];
        assert_eq!(pick_reading(&verb_first, "report"), ("report", PosTag::Noun));

        let noun_first = [("NN", "report"), ("VBP", "report")];
        assert_eq!(pick_reading(&noun_first, "report"), ("report", PosTag::Noun));
    }

    #[test]
    fn test_adjective_reading_is_kept() {
        let readings = [("RB", "violent"), ("JJ", "violent"), ("SENT_END", "")];
        assert_eq!(pick_reading(&readings, "violent"), ("violent", PosTag::Adjective));
    }

    #[test]
    fn test_plural_noun_lemma() {
        let readings = [("", ""), ("VBZ", "report"), ("NNS", "report")];
        assert_eq!(pick_reading(&readings, "reports"), ("report", PosTag::Noun));
    }

    #[test]
    fn test_non_keyword_reading_when_no_noun_or_adjective() {
        let readings = [("", ""), ("VBD", "flee"), ("VBN", "flee"), ("SENT_END", "")];
        assert_eq!(pick_reading(&readings, "fled"), ("flee", PosTag::Verb));

        let readings = [("DT", "the")];
        assert_eq!(pick_reading(&readings, "the"), ("the", PosTag::Determiner));
    }

    #[test]
    fn test_unknown_word_is_a_noun() {
        let readings = [("", ""), ("UNKNOWN", "")];
        assert_eq!(pick_reading(&readings, "cybercrime"), ("cybercrime", PosTag::Noun));
        assert_eq!(pick_reading(&[], "cybercrime"), ("cybercrime", PosTag::Noun));
    }

    #[test]
    fn test_empty_lemma_falls_back_to_surface() {
        let readings = [("NN", "")];
        assert_eq!(pick_reading(&readings, "victim"), ("victim", PosTag::Noun));
    }

    #[test]
    fn test_missing_model_file() {
        let result = RuleTagger::from_path("/nonexistent/en_tokenizer.bin");
        assert!(matches!(result, Err(HarvestError::Tagger(_))));
    }
}
