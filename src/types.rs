//! Core data types shared across the crate

use serde::{Deserialize, Serialize};

/// Suffix of the column flagging positive sentiment about a topic
pub const POSITIVE_SUFFIX: &str = " - positive";
/// Suffix of the column flagging negative sentiment about a topic
pub const NEGATIVE_SUFFIX: &str = " - negative";

/// Ordered list of topic names
///
/// Every component takes the topic set as input, so the same code serves any
/// taxonomy. Order matters: it fixes the layout of review vectors and of
/// every [`TopicScores`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicSet {
    topics: Vec<String>,
}

impl TopicSet {
    /// Create a topic set from names
    pub fn new<I, S>(topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            topics: topics.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of topics
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Topic names in configured order
    pub fn names(&self) -> &[String] {
        &self.topics
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.topics.iter().map(String::as_str)
    }

    /// Name of the positive indicator column for a topic
    pub fn positive_column(topic: &str) -> String {
        format!("{topic}{POSITIVE_SUFFIX}")
    }

    /// Name of the negative indicator column for a topic
    pub fn negative_column(topic: &str) -> String {
        format!("{topic}{NEGATIVE_SUFFIX}")
    }

    /// All indicator column names, positive before negative per topic
    pub fn indicator_columns(&self) -> Vec<String> {
        self.topics
            .iter()
            .flat_map(|t| [Self::positive_column(t), Self::negative_column(t)])
            .collect()
    }
}

/// One float per topic, aligned with a [`TopicSet`]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicScores(pub Vec<f64>);

impl TopicScores {
    pub fn get(&self, topic_idx: usize) -> f64 {
        self.0.get(topic_idx).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// Element-wise absolute difference
    pub fn abs_diff(&self, other: &TopicScores) -> TopicScores {
        TopicScores(
            self.0
                .iter()
                .zip(other.0.iter())
                .map(|(a, b)| (a - b).abs())
                .collect(),
        )
    }
}
