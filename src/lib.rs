//! # sensegraph-rs
//!
//! Ranks the candidate meanings of an ambiguous named entity (a surface
//! form that could denote several knowledge-base topics) by estimated
//! relevance to a specific user's known interests.
//!
//! ## Architecture
//!
//! - **Bipartite topic/category graphs**: a [`graph::KnowledgeGraph`] models
//!   either a user's interest profile or a single candidate meaning's
//!   topical context, with bounded category-hierarchy expansion
//! - **Two-signal scoring**: tf-idf cosine similarity over topic
//!   descriptions fused with cosine similarity over category weights
//! - **Capability seams**: knowledge-base access and text normalization are
//!   traits, so backends swap without touching graph or scoring logic

pub mod errors;
pub mod types;

pub mod nodes;

pub mod graph;
pub mod kb;
pub mod text;

pub mod similarity;
pub mod tfidf;

pub mod ranker;

pub use errors::{KbError, Result, SensegraphError};
