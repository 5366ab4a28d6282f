//! Knowledge graph construction.
//!
//! A [`KnowledgeGraph`] is a lightweight bipartite topic/category graph
//! representing either a user's interest profile or a single candidate
//! meaning's topical context. It is built once from a seed topic list
//! (or a user identifier resolved to one), read-only afterwards, and
//! discarded after scoring.

use std::collections::{BTreeMap, VecDeque};

use crate::errors::{Result, SensegraphError};
use crate::kb::KnowledgeBaseClient;
use crate::nodes::{CategoryNode, TopicNode};

/// Bipartite graph of topic and category nodes, keyed by title.
///
/// Categories connect conceptually to topics, never to other categories:
/// a category reached through another category is stored as an ordinary
/// [`CategoryNode`] whose `distance` exceeds 1. Nodes are never replaced
/// once created; re-reaching a category only bumps its frequency.
#[derive(Debug, Clone)]
pub struct KnowledgeGraph {
    topic_nodes: BTreeMap<String, TopicNode>,
    category_nodes: BTreeMap<String, CategoryNode>,
    path_length_threshold: u32,
}

impl KnowledgeGraph {
    /// Build a graph from either an explicit topic list or a user
    /// identifier.
    ///
    /// When both are supplied the topic list takes precedence; when
    /// neither is supplied construction fails with
    /// [`SensegraphError::Configuration`].
    pub fn build<K: KnowledgeBaseClient>(
        kb: &K,
        topic_titles: Option<&[String]>,
        user_id: Option<&str>,
        path_length_threshold: u32,
    ) -> Result<Self> {
        match (topic_titles, user_id) {
            (Some(titles), _) => Self::from_topics(kb, titles, path_length_threshold),
            (None, Some(user)) => Self::from_user(kb, user, path_length_threshold),
            (None, None) => Err(SensegraphError::Configuration(
                "must provide either topic titles or a user id to build a knowledge graph"
                    .to_string(),
            )),
        }
    }

    /// Build a graph from an explicit ordered list of topic titles.
    ///
    /// An empty list yields an empty graph; that is valid, not an error.
    pub fn from_topics<K: KnowledgeBaseClient>(
        kb: &K,
        topic_titles: &[String],
        path_length_threshold: u32,
    ) -> Result<Self> {
        let mut graph = Self {
            topic_nodes: BTreeMap::new(),
            category_nodes: BTreeMap::new(),
            path_length_threshold,
        };

        for title in topic_titles {
            if graph.topic_nodes.contains_key(title) {
                continue;
            }
            let description = kb.description(title)?;
            graph
                .topic_nodes
                .insert(title.clone(), TopicNode::new(title.clone(), description));
            graph.expand_categories(kb, title)?;
        }

        Ok(graph)
    }

    /// Build a user's interest graph by resolving the user's topics of
    /// interest through the knowledge base.
    ///
    /// A user with no recorded interests yields an empty graph.
    pub fn from_user<K: KnowledgeBaseClient>(
        kb: &K,
        user_id: &str,
        path_length_threshold: u32,
    ) -> Result<Self> {
        let titles = kb.user_interests(user_id)?;
        Self::from_topics(kb, &titles, path_length_threshold)
    }

    /// Add the parent categories originating from one seed topic, out to
    /// the path-length threshold.
    ///
    /// Expansion runs over an explicit worklist rather than recursion, so
    /// raising the threshold never risks unbounded call depth. Each
    /// worklist entry is a node title paired with its hop distance from
    /// the seed topic (0 for the topic itself).
    fn expand_categories<K: KnowledgeBaseClient>(
        &mut self,
        kb: &K,
        topic_title: &str,
    ) -> Result<()> {
        let mut worklist: VecDeque<(String, u32)> = VecDeque::new();
        worklist.push_back((topic_title.to_string(), 0));

        while let Some((src_title, src_distance)) = worklist.pop_front() {
            for category_title in kb.parent_categories(&src_title)? {
                if let Some(existing) = self.category_nodes.get_mut(&category_title) {
                    // Already in the graph: count the new path, do not
                    // re-traverse through it.
                    existing.increment_frequency();
                    continue;
                }

                let distance = src_distance + 1;
                self.category_nodes.insert(
                    category_title.clone(),
                    CategoryNode::at_distance(category_title.clone(), distance),
                );

                if distance < self.path_length_threshold {
                    worklist.push_back((category_title, distance));
                }
            }
        }

        Ok(())
    }

    /// Titles of the topics in this graph.
    pub fn topic_titles(&self) -> impl Iterator<Item = &str> {
        self.topic_nodes.keys().map(String::as_str)
    }

    /// Descriptions of the topics in this graph.
    pub fn topic_descriptions(&self) -> impl Iterator<Item = &str> {
        self.topic_nodes.values().map(|t| t.description.as_str())
    }

    /// Mapping of category title to weight for every category in this graph.
    pub fn category_weights(&self) -> BTreeMap<String, f64> {
        self.category_nodes
            .iter()
            .map(|(title, node)| (title.clone(), node.weight()))
            .collect()
    }

    pub fn topic(&self, title: &str) -> Option<&TopicNode> {
        self.topic_nodes.get(title)
    }

    pub fn category(&self, title: &str) -> Option<&CategoryNode> {
        self.category_nodes.get(title)
    }

    pub fn topic_count(&self) -> usize {
        self.topic_nodes.len()
    }

    pub fn category_count(&self) -> usize {
        self.category_nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topic_nodes.is_empty() && self.category_nodes.is_empty()
    }

    pub fn path_length_threshold(&self) -> u32 {
        self.path_length_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// In-memory knowledge base backed by fixture maps.
    #[derive(Default)]
    struct FixtureKb {
        descriptions: HashMap<String, String>,
        categories: HashMap<String, Vec<String>>,
        interests: HashMap<String, Vec<String>>,
    }

    impl FixtureKb {
        fn with_topic(mut self, title: &str, description: &str, categories: &[&str]) -> Self {
            self.descriptions
                .insert(title.to_string(), description.to_string());
            self.categories.insert(
                title.to_string(),
                categories.iter().map(|c| c.to_string()).collect(),
            );
            self
        }

        fn with_category_parents(mut self, title: &str, parents: &[&str]) -> Self {
            self.categories.insert(
                title.to_string(),
                parents.iter().map(|c| c.to_string()).collect(),
            );
            self
        }

        fn with_user(mut self, user: &str, interests: &[&str]) -> Self {
            self.interests.insert(
                user.to_string(),
                interests.iter().map(|t| t.to_string()).collect(),
            );
            self
        }
    }

    impl KnowledgeBaseClient for FixtureKb {
        fn user_interests(&self, user_id: &str) -> crate::Result<Vec<String>> {
            Ok(self.interests.get(user_id).cloned().unwrap_or_default())
        }

        fn description(&self, topic_title: &str) -> crate::Result<String> {
            Ok(self
                .descriptions
                .get(topic_title)
                .cloned()
                .unwrap_or_default())
        }

        fn parent_categories(&self, title: &str) -> crate::Result<Vec<String>> {
            Ok(self.categories.get(title).cloned().unwrap_or_default())
        }
    }

    fn titles(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_neither_topics_nor_user_is_configuration_error() {
        let kb = FixtureKb::default();
        let result = KnowledgeGraph::build(&kb, None, None, 1);
        assert!(matches!(
            result.unwrap_err(),
            SensegraphError::Configuration(_)
        ));
    }

    #[test]
    fn test_topics_take_precedence_over_user() {
        let kb = FixtureKb::default()
            .with_topic("Jaguar", "A large cat.", &["Category:Felines"])
            .with_topic("Python", "A snake.", &["Category:Snakes"])
            .with_user("alice", &["Python"]);

        let topics = titles(&["Jaguar"]);
        let graph = KnowledgeGraph::build(&kb, Some(&topics), Some("alice"), 1).unwrap();
        assert!(graph.topic("Jaguar").is_some());
        assert!(graph.topic("Python").is_none());
    }

    #[test]
    fn test_empty_topic_list_yields_empty_graph() {
        let kb = FixtureKb::default();
        let graph = KnowledgeGraph::from_topics(&kb, &[], 1).unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.topic_count(), 0);
        assert_eq!(graph.category_count(), 0);
    }

    #[test]
    fn test_user_with_no_interests_yields_empty_graph() {
        let kb = FixtureKb::default();
        let graph = KnowledgeGraph::from_user(&kb, "nobody", 1).unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn test_missing_description_falls_back_to_title() {
        let kb = FixtureKb::default().with_category_parents("Obscure topic", &[]);
        let topics = titles(&["Obscure topic"]);
        let graph = KnowledgeGraph::from_topics(&kb, &topics, 1).unwrap();
        assert_eq!(graph.topic("Obscure topic").unwrap().description, "Obscure topic");
    }

    #[test]
    fn test_default_threshold_direct_categories_only() {
        let kb = FixtureKb::default()
            .with_topic("Jaguar", "A large cat.", &["Category:Felines"])
            .with_category_parents("Category:Felines", &["Category:Mammals"]);

        let topics = titles(&["Jaguar"]);
        let graph = KnowledgeGraph::from_topics(&kb, &topics, 1).unwrap();

        // Only the direct parent; the grandparent stays out at threshold 1.
        assert_eq!(graph.category_count(), 1);
        let felines = graph.category("Category:Felines").unwrap();
        assert_eq!(felines.distance(), 1);
        assert_eq!(felines.frequency(), 1);
        assert!(graph.category("Category:Mammals").is_none());
    }

    #[test]
    fn test_shared_category_frequency() {
        let kb = FixtureKb::default()
            .with_topic("Jaguar", "A large cat.", &["Category:Felines"])
            .with_topic("Lion", "Another large cat.", &["Category:Felines"])
            .with_topic("Wolf", "A canine.", &["Category:Canines"]);

        let topics = titles(&["Jaguar", "Lion", "Wolf"]);
        let graph = KnowledgeGraph::from_topics(&kb, &topics, 1).unwrap();

        let topic_order: Vec<&str> = graph.topic_titles().collect();
        assert_eq!(topic_order, ["Jaguar", "Lion", "Wolf"]);

        assert_eq!(graph.category("Category:Felines").unwrap().frequency(), 2);
        assert_eq!(graph.category("Category:Canines").unwrap().frequency(), 1);

        let weights = graph.category_weights();
        assert_eq!(weights["Category:Felines"], 2.0);
        assert_eq!(weights["Category:Canines"], 1.0);
    }

    #[test]
    fn test_raised_threshold_expands_transitively() {
        let kb = FixtureKb::default()
            .with_topic("Jaguar", "A large cat.", &["Category:Felines"])
            .with_category_parents("Category:Felines", &["Category:Mammals"])
            .with_category_parents("Category:Mammals", &["Category:Animals"]);

        let topics = titles(&["Jaguar"]);
        let graph = KnowledgeGraph::from_topics(&kb, &topics, 2).unwrap();
        assert_eq!(graph.path_length_threshold(), 2);

        // Felines at distance 1 expands; Mammals lands at distance 2,
        // which meets the threshold and stops there.
        assert_eq!(graph.category_count(), 2);
        assert_eq!(graph.category("Category:Felines").unwrap().distance(), 1);
        assert_eq!(graph.category("Category:Mammals").unwrap().distance(), 2);
        assert!(graph.category("Category:Animals").is_none());

        let weights = graph.category_weights();
        assert_eq!(weights["Category:Mammals"], 2.0); // frequency 1 * distance 2
    }

    #[test]
    fn test_rereached_category_not_retraversed() {
        // Both topics lead to Felines; the second arrival must only bump
        // frequency, not re-expand the hierarchy behind it.
        let kb = FixtureKb::default()
            .with_topic("Jaguar", "A large cat.", &["Category:Felines"])
            .with_topic("Lion", "Another large cat.", &["Category:Felines"])
            .with_category_parents("Category:Felines", &["Category:Mammals"]);

        let topics = titles(&["Jaguar", "Lion"]);
        let graph = KnowledgeGraph::from_topics(&kb, &topics, 2).unwrap();

        assert_eq!(graph.category("Category:Felines").unwrap().frequency(), 2);
        // Mammals reached once, during Jaguar's expansion only.
        assert_eq!(graph.category("Category:Mammals").unwrap().frequency(), 1);
    }

    #[test]
    fn test_duplicate_seed_topics_processed_once() {
        let kb = FixtureKb::default().with_topic("Jaguar", "A large cat.", &["Category:Felines"]);

        let topics = titles(&["Jaguar", "Jaguar"]);
        let graph = KnowledgeGraph::from_topics(&kb, &topics, 1).unwrap();

        assert_eq!(graph.topic_count(), 1);
        assert_eq!(graph.category("Category:Felines").unwrap().frequency(), 1);
    }

    #[test]
    fn test_kb_failure_propagates() {
        struct FailingKb;
        impl KnowledgeBaseClient for FailingKb {
            fn user_interests(&self, _: &str) -> crate::Result<Vec<String>> {
                Err(crate::KbError::Network("down".to_string()).into())
            }
            fn description(&self, _: &str) -> crate::Result<String> {
                Err(crate::KbError::Network("down".to_string()).into())
            }
            fn parent_categories(&self, _: &str) -> crate::Result<Vec<String>> {
                Err(crate::KbError::Network("down".to_string()).into())
            }
        }

        let topics = titles(&["Anything"]);
        let result = KnowledgeGraph::from_topics(&FailingKb, &topics, 1);
        assert!(matches!(
            result.unwrap_err(),
            SensegraphError::KnowledgeBase(_)
        ));
    }
}
