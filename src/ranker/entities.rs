//! Entity and candidate value types, plus qualification of annotated
//! entities for ranking.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-service detection score attached to a candidate by an upstream
/// entity-detection service. A cross-check input; ranking itself never
/// reads the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionScore {
    pub service: String,
    pub score: f64,
}

/// A candidate resource that an ambiguous surface form could denote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMeaning {
    pub title: String,
    pub resource_uri: String,
    pub detection: DetectionScore,
}

/// One annotated row from a labeled dataset: a candidate meaning of a
/// surface form in a short text, with a human judgment of relevance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedCandidate {
    pub surface_form: String,
    pub short_text: String,
    pub meaning: String,
    /// True when a rater marked this meaning as the intended one.
    pub relevant: bool,
    pub user_key: String,
}

impl AnnotatedCandidate {
    /// Identity of the entity this row belongs to.
    pub fn entity_id(&self) -> String {
        format!("{}_{}", self.surface_form, self.short_text)
    }
}

/// An ambiguous entity whose intended meaning has been resolved by
/// human annotation, ready for candidate ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedEntity {
    pub surface_form: String,
    pub short_text: String,
    /// Distinct candidate meaning titles, in first-seen order.
    pub candidate_meanings: Vec<String>,
    /// Distinct meanings annotated as intended, in first-seen order.
    pub intended_meanings: Vec<String>,
    /// Identifier of the user who wrote the short text.
    pub user_id: String,
}

impl ResolvedEntity {
    pub fn id(&self) -> String {
        format!("{}_{}", self.surface_form, self.short_text)
    }
}

/// Group annotated rows by entity and keep those that qualify for
/// ranking: more than one distinct candidate meaning (ambiguous) and
/// exactly one unanimous intended meaning (resolved).
pub fn qualify_entities<I>(rows: I) -> BTreeMap<String, ResolvedEntity>
where
    I: IntoIterator<Item = AnnotatedCandidate>,
{
    let mut grouped: BTreeMap<String, Vec<AnnotatedCandidate>> = BTreeMap::new();
    for row in rows {
        grouped.entry(row.entity_id()).or_default().push(row);
    }

    let mut resolved = BTreeMap::new();
    for (entity_id, rows) in grouped {
        let mut candidate_meanings: Vec<String> = Vec::new();
        let mut intended_meanings: Vec<String> = Vec::new();

        for row in &rows {
            if !candidate_meanings.contains(&row.meaning) {
                candidate_meanings.push(row.meaning.clone());
            }
            if row.relevant && !intended_meanings.contains(&row.meaning) {
                intended_meanings.push(row.meaning.clone());
            }
        }

        // Ambiguous: several distinct candidates. Resolved: the raters
        // converged on a single intended meaning.
        if candidate_meanings.len() < 2 || intended_meanings.len() != 1 {
            continue;
        }

        let first = &rows[0];
        resolved.insert(
            entity_id,
            ResolvedEntity {
                surface_form: first.surface_form.clone(),
                short_text: first.short_text.clone(),
                candidate_meanings,
                intended_meanings,
                user_id: first.user_key.clone(),
            },
        );
    }
    resolved
}
