//! Tf-idf term weighting over a fixed corpus of normalized documents.

use std::collections::{BTreeMap, HashMap};

/// Idf assigned to terms that never occur in the corpus. Chosen above
/// the in-corpus floor of 1.0 so that unseen query terms are not
/// weighted below universal ones.
pub const DEFAULT_IDF: f64 = 1.5;

/// Per-corpus term-weight model.
///
/// Construction ingests the corpus once, recording the document count
/// and a per-term document-frequency table. Idf values are computed
/// lazily and cached; both the table and the cache are scoped to this
/// instance and die with it.
#[derive(Debug, Clone)]
pub struct TfIdf {
    num_docs: usize,
    term_doc_counts: HashMap<String, usize>,
    idf_cache: HashMap<String, f64>,
}

impl TfIdf {
    /// Build the model from a corpus of normalized, whitespace-delimited
    /// documents.
    pub fn new<I, S>(corpus_docs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut num_docs = 0;
        let mut term_doc_counts: HashMap<String, usize> = HashMap::new();

        for doc in corpus_docs {
            num_docs += 1;

            let unique_terms: std::collections::HashSet<&str> =
                doc.as_ref().split_whitespace().collect();
            for term in unique_terms {
                *term_doc_counts.entry(term.to_string()).or_insert(0) += 1;
            }
        }

        Self {
            num_docs,
            term_doc_counts,
            idf_cache: HashMap::new(),
        }
    }

    pub fn num_docs(&self) -> usize {
        self.num_docs
    }

    /// Tf-idf weight for each distinct term in the given document.
    ///
    /// The document does not have to be part of the corpus; a query
    /// document is scored against the corpus statistics as-is.
    pub fn term_weights(&mut self, doc: &str) -> BTreeMap<String, f64> {
        let terms: Vec<&str> = doc.split_whitespace().collect();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for term in &terms {
            *counts.entry(term).or_insert(0) += 1;
        }
        let max_count = counts.values().copied().max().unwrap_or(0);

        let mut weights = BTreeMap::new();
        for (term, count) in counts {
            let tf = if max_count == 0 {
                0.0
            } else {
                count as f64 / max_count as f64
            };
            let idf = self.idf(term);
            weights.insert(term.to_string(), tf * idf);
        }
        weights
    }

    /// Inverse document frequency of a term: `1 + ln(N / df)`, or
    /// [`DEFAULT_IDF`] for a term absent from the corpus.
    ///
    /// Adding 1 keeps every in-corpus idf at or above 1.0, so a tf-idf
    /// product is never dragged below its tf factor.
    pub fn idf(&mut self, term: &str) -> f64 {
        if let Some(&cached) = self.idf_cache.get(term) {
            return cached;
        }

        let Some(&doc_count) = self.term_doc_counts.get(term) else {
            return DEFAULT_IDF;
        };

        let idf = 1.0 + (self.num_docs as f64 / doc_count as f64).ln();
        self.idf_cache.insert(term.to_string(), idf);
        idf
    }
}
