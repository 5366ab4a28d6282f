//! Knowledge-base client abstraction.
//!
//! # Implementations
//! - [`mediawiki::MediaWikiClient`] — MediaWiki Action API backend via `reqwest`.

pub mod mediawiki;

use crate::errors::Result;

/// Capability trait for knowledge-base lookups consumed during graph
/// construction.
///
/// Calls are blocking; one call is issued per topic (description) and per
/// topic/category (parent categories), with no batching or cross-graph
/// caching. Retries and backoff, where appropriate, belong to the
/// implementation, not the caller.
pub trait KnowledgeBaseClient {
    /// Titles of the topics in which the given user has shown interest,
    /// in the knowledge base's preferred order, without duplicates.
    fn user_interests(&self, user_id: &str) -> Result<Vec<String>>;

    /// Textual description of the given topic. May be empty when the
    /// knowledge base has nothing usable; the caller substitutes the
    /// title itself in that case.
    fn description(&self, topic_title: &str) -> Result<String>;

    /// Titles of the direct parent categories of the given topic or
    /// category.
    fn parent_categories(&self, title: &str) -> Result<Vec<String>>;
}
