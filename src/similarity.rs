//! Content and category similarity scoring, and their fusion into a
//! ranked ordering of candidate meanings.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use ndarray::ArrayView1;
use serde::Serialize;

use crate::graph::KnowledgeGraph;
use crate::text::TextNormalizer;
use crate::tfidf::TfIdf;

/// One candidate's similarity breakdown against a user graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateScore {
    pub title: String,
    /// Tf-idf cosine similarity over topic descriptions.
    pub content: f64,
    /// Cosine similarity over category weight vectors.
    pub category: f64,
    /// `alpha * content + (1 - alpha) * category`.
    pub composite: f64,
}

/// Compute the cosine similarity between two f64 slices.
///
/// A zero norm is substituted with 1, so degenerate input (empty or
/// all-zero vectors) yields a defined similarity of `0.0` rather than a
/// division error or NaN. Mismatched lengths also return `0.0`.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    if a.is_empty() {
        return 0.0;
    }

    let a = ArrayView1::from(a);
    let b = ArrayView1::from(b);

    let dot = a.dot(&b);
    let norm_a = nonzero_norm(a);
    let norm_b = nonzero_norm(b);

    dot / (norm_a * norm_b)
}

fn nonzero_norm(v: ArrayView1<'_, f64>) -> f64 {
    let sum_sq = v.dot(&v);
    if sum_sq == 0.0 {
        1.0
    } else {
        sum_sq.sqrt()
    }
}

/// Cosine similarity between two weight mappings.
///
/// The key sets are unioned; a key missing on one side contributes
/// weight 0 there. Both vectors are projected in sorted key order so
/// every index refers to the same key on both sides.
pub fn aligned_similarity(
    user_weights: &BTreeMap<String, f64>,
    candidate_weights: &BTreeMap<String, f64>,
) -> f64 {
    let keys: BTreeSet<&String> = user_weights.keys().chain(candidate_weights.keys()).collect();

    let user_vector: Vec<f64> = keys
        .iter()
        .map(|k| user_weights.get(*k).copied().unwrap_or(0.0))
        .collect();
    let candidate_vector: Vec<f64> = keys
        .iter()
        .map(|k| candidate_weights.get(*k).copied().unwrap_or(0.0))
        .collect();

    cosine_similarity(&user_vector, &candidate_vector)
}

/// Content similarity of each candidate to the user's interests, based
/// on the text descriptions of their topics.
///
/// The term-weight corpus is built over the candidate documents only;
/// the user document is scored as a query against those statistics.
pub fn content_scores<N: TextNormalizer>(
    candidate_graphs: &BTreeMap<String, KnowledgeGraph>,
    user_graph: &KnowledgeGraph,
    normalizer: &N,
) -> BTreeMap<String, f64> {
    let user_query =
        normalizer.normalize(&user_graph.topic_descriptions().collect::<Vec<_>>().join(" "));

    let candidate_docs: BTreeMap<&String, String> = candidate_graphs
        .iter()
        .map(|(title, graph)| {
            let doc = graph.topic_descriptions().collect::<Vec<_>>().join(" ");
            (title, normalizer.normalize(&doc))
        })
        .collect();

    let mut model = TfIdf::new(candidate_docs.values());
    let user_weights = model.term_weights(&user_query);

    candidate_docs
        .into_iter()
        .map(|(title, doc)| {
            let candidate_weights = model.term_weights(&doc);
            (title.clone(), aligned_similarity(&user_weights, &candidate_weights))
        })
        .collect()
}

/// Category similarity of each candidate to the user's interests, based
/// on overlap of weighted categories in their graphs.
pub fn category_scores(
    candidate_graphs: &BTreeMap<String, KnowledgeGraph>,
    user_graph: &KnowledgeGraph,
) -> BTreeMap<String, f64> {
    let user_weights = user_graph.category_weights();

    candidate_graphs
        .iter()
        .map(|(title, graph)| {
            let candidate_weights = graph.category_weights();
            (title.clone(), aligned_similarity(&user_weights, &candidate_weights))
        })
        .collect()
}

/// Fuse per-signal scores into a descending ranking.
///
/// Ties on the composite score break lexicographically by candidate
/// title, keeping the ordering deterministic regardless of input order.
pub fn rank_scored(
    content: &BTreeMap<String, f64>,
    category: &BTreeMap<String, f64>,
    alpha: f64,
) -> Vec<CandidateScore> {
    let mut ranked: Vec<CandidateScore> = content
        .iter()
        .map(|(title, &content_sim)| {
            let category_sim = category.get(title).copied().unwrap_or(0.0);
            CandidateScore {
                title: title.clone(),
                content: content_sim,
                category: category_sim,
                composite: alpha * content_sim + (1.0 - alpha) * category_sim,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.composite
            .partial_cmp(&a.composite)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.title.cmp(&b.title))
    });
    ranked
}

/// Compare each candidate to the user's interests and return the ranked
/// candidates, most user-relevant first.
pub fn score_candidates<N: TextNormalizer>(
    candidate_graphs: &BTreeMap<String, KnowledgeGraph>,
    user_graph: &KnowledgeGraph,
    normalizer: &N,
    alpha: f64,
) -> Vec<CandidateScore> {
    let content = content_scores(candidate_graphs, user_graph, normalizer);
    let category = category_scores(candidate_graphs, user_graph);
    rank_scored(&content, &category, alpha)
}
