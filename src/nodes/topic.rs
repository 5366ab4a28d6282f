//! TopicNode — a knowledge-base topic with a textual description.

use serde::{Deserialize, Serialize};

/// A single knowledge-base article/resource. Identity is the title,
/// which is unique within a graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicNode {
    pub title: String,
    /// Textual description of the topic. When the knowledge base has no
    /// usable description this holds the title itself.
    pub description: String,
}

impl TopicNode {
    /// Create a topic node, falling back to the title as its own
    /// description when `description` is empty or whitespace.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        let title = title.into();
        let description = description.into();
        let description = if description.trim().is_empty() {
            title.clone()
        } else {
            description
        };
        Self { title, description }
    }
}
