//! Candidate ranking orchestration.
//!
//! For one resolved ambiguous entity the ranker:
//! 1. builds the originating user's interest graph,
//! 2. builds one single-topic graph per candidate meaning,
//! 3. scores every candidate against the user graph,
//! 4. emits the descending ranking as the disambiguation result.

pub mod entities;

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::errors::Result;
use crate::graph::KnowledgeGraph;
use crate::kb::KnowledgeBaseClient;
use crate::similarity::{score_candidates, CandidateScore};
use crate::text::TextNormalizer;
use crate::types::RankerConfig;

pub use entities::{
    qualify_entities, AnnotatedCandidate, CandidateMeaning, DetectionScore, ResolvedEntity,
};

/// Ranks the candidate meanings of resolved entities against their
/// originating users' interest graphs.
pub struct CandidateRanker<'a, K, N> {
    kb: &'a K,
    normalizer: &'a N,
    config: RankerConfig,
}

impl<'a, K, N> CandidateRanker<'a, K, N>
where
    K: KnowledgeBaseClient,
    N: TextNormalizer,
{
    pub fn new(kb: &'a K, normalizer: &'a N, config: RankerConfig) -> Self {
        Self {
            kb,
            normalizer,
            config,
        }
    }

    /// Rank one entity's candidate meanings, most user-relevant first.
    pub fn rank(&self, entity: &ResolvedEntity) -> Result<Vec<CandidateScore>> {
        debug!(entity = %entity.id(), user = %entity.user_id, "ranking candidates");

        let threshold = self.config.path_length_threshold;
        let user_graph = KnowledgeGraph::from_user(self.kb, &entity.user_id, threshold)?;

        let mut candidate_graphs = BTreeMap::new();
        for title in &entity.candidate_meanings {
            let graph =
                KnowledgeGraph::from_topics(self.kb, std::slice::from_ref(title), threshold)?;
            candidate_graphs.insert(title.clone(), graph);
        }

        Ok(score_candidates(
            &candidate_graphs,
            &user_graph,
            self.normalizer,
            self.config.alpha,
        ))
    }

    /// Rank every entity, isolating failures: one entity's knowledge-base
    /// failure is recorded in its own slot and does not abort the rest.
    pub fn rank_all<'e, I>(&self, entities: I) -> BTreeMap<String, Result<Vec<CandidateScore>>>
    where
        I: IntoIterator<Item = &'e ResolvedEntity>,
    {
        let mut results = BTreeMap::new();
        for entity in entities {
            let outcome = self.rank(entity);
            if let Err(err) = &outcome {
                warn!(entity = %entity.id(), error = %err, "ranking failed for entity");
            }
            results.insert(entity.id(), outcome);
        }
        results
    }
}
