//! CategoryNode — a classificatory grouping reached from topic nodes.

use serde::{Deserialize, Serialize};

/// A category in the knowledge graph. Identity is the title, unique
/// within a graph; the node is created once and only its counters
/// mutate afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub title: String,
    /// Number of distinct topics or traversal paths that reached this
    /// category. Starts at 1.
    frequency: u32,
    /// Hop count from the nearest topic that reached this category.
    /// 1 for a direct parent category of a topic, greater when reached
    /// transitively through another category.
    distance: u32,
}

impl CategoryNode {
    /// Create a category reached directly from a topic (`distance = 1`).
    pub fn new(title: impl Into<String>) -> Self {
        Self::at_distance(title, 1)
    }

    /// Create a category reached at the given hop distance.
    pub fn at_distance(title: impl Into<String>, distance: u32) -> Self {
        debug_assert!(distance >= 1, "category distance starts at 1");
        Self {
            title: title.into(),
            frequency: 1,
            distance,
        }
    }

    /// Record another topic or traversal path reaching this category.
    pub fn increment_frequency(&mut self) {
        self.frequency += 1;
    }

    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    pub fn distance(&self) -> u32 {
        self.distance
    }

    /// `1/p`, the inverse path distance between this category and the
    /// topic it connects to. Larger means semantically closer.
    pub fn inverse_distance(&self) -> f64 {
        1.0 / f64::from(self.distance)
    }

    /// Weight of this category within its graph: `frequency * distance`.
    pub fn weight(&self) -> f64 {
        f64::from(self.frequency) * f64::from(self.distance)
    }
}
