//! Porter-stemming text normalizer.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};

use crate::text::TextNormalizer;

static TOKEN_RE: OnceLock<Regex> = OnceLock::new();

/// Word/punctuation tokenizer: runs of word characters, or runs of
/// anything that is neither word nor whitespace.
fn token_re() -> &'static Regex {
    TOKEN_RE.get_or_init(|| Regex::new(r"\w+|[^\w\s]+").expect("static regex is valid"))
}

/// Minimum surviving token length; anything shorter carries too little
/// signal for term weighting.
const MIN_TOKEN_LEN: usize = 3;

/// The classic 127-word English stopword list. Function words only;
/// content-bearing words always survive filtering.
const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such",
    "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can",
    "will", "just", "don", "should", "now",
];

/// English-language normalizer: tokenizes, strips punctuation inside
/// tokens, lowercases, drops stopwords and short tokens, then applies
/// Porter stemming.
pub struct PorterNormalizer {
    stemmer: Stemmer,
    stopwords: HashSet<&'static str>,
}

impl PorterNormalizer {
    pub fn new() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
            stopwords: STOPWORDS.iter().copied().collect(),
        }
    }
}

impl Default for PorterNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer for PorterNormalizer {
    fn normalize(&self, raw_text: &str) -> String {
        let mut terms: Vec<String> = Vec::new();

        for token in token_re().find_iter(raw_text) {
            let stripped: String = token
                .as_str()
                .chars()
                .filter(|c| !c.is_ascii_punctuation())
                .collect();
            if stripped.is_empty() {
                continue;
            }

            let lowered = stripped.to_lowercase();
            if self.stopwords.contains(lowered.as_str()) {
                continue;
            }
            if lowered.chars().count() < MIN_TOKEN_LEN {
                continue;
            }

            terms.push(self.stemmer.stem(&lowered).into_owned());
        }

        terms.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_stems() {
        let normalizer = PorterNormalizer::new();
        assert_eq!(normalizer.normalize("Running Cats"), "run cat");
    }

    #[test]
    fn test_drops_stopwords() {
        let normalizer = PorterNormalizer::new();
        let normalized = normalizer.normalize("the jaguar and the lion");
        assert_eq!(normalized, "jaguar lion");
    }

    #[test]
    fn test_drops_short_tokens() {
        let normalizer = PorterNormalizer::new();
        // "Go" survives stopword filtering but is shorter than 3 chars.
        let normalized = normalizer.normalize("Go west young traveler");
        assert!(!normalized.contains("go"));
        assert!(normalized.contains("west"));
    }

    #[test]
    fn test_strips_punctuation_tokens() {
        let normalizer = PorterNormalizer::new();
        let normalized = normalizer.normalize("jaguar!!! (cars, engines...)");
        assert_eq!(normalized, "jaguar car engin");
    }

    #[test]
    fn test_empty_input() {
        let normalizer = PorterNormalizer::new();
        assert_eq!(normalizer.normalize(""), "");
        assert_eq!(normalizer.normalize("   \n\t"), "");
    }

    #[test]
    fn test_punctuation_inside_word() {
        let normalizer = PorterNormalizer::new();
        // "it's" tokenizes as it / ' / s; "it" is a stopword, the
        // apostrophe strips to nothing and "s" is too short.
        let normalized = normalizer.normalize("it's fine");
        assert_eq!(normalized, "fine");
    }
}
