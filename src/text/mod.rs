//! Text normalization abstraction.
//!
//! # Implementations
//! - [`porter::PorterNormalizer`] — tokenize, strip punctuation, drop
//!   stopwords and short tokens, lowercase, Porter-stem.

pub mod porter;

/// Capability trait preparing raw text for term-weight computation.
///
/// The same normalizer must be applied both when a document enters a
/// corpus and when a document is scored against that corpus, otherwise
/// term statistics will not line up.
pub trait TextNormalizer {
    /// Normalize raw text into a whitespace-delimited term sequence.
    fn normalize(&self, raw_text: &str) -> String;
}
