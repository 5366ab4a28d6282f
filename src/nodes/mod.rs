//! Node types for the knowledge graph.
//!
//! Two node types:
//! - [`topic::TopicNode`] — a knowledge-base article/resource with a
//!   textual description
//! - [`category::CategoryNode`] — a classificatory grouping reached from
//!   one or more topics, carrying frequency and hop-distance counters

pub mod category;
pub mod topic;

pub use category::CategoryNode;
pub use topic::TopicNode;
