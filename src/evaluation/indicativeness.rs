//! Per-topic indicativeness scores over review subsets

use crate::features::IndicatorMatrix;
use crate::types::TopicScores;

/// Positive and negative mention counts for one topic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentCounts {
    pub positive: usize,
    pub negative: usize,
}

impl SentimentCounts {
    /// `(positive - negative) / (positive + negative)`, or 0 with no mentions
    pub fn indicativeness(&self) -> f64 {
        let total = self.positive + self.negative;
        if total == 0 {
            return 0.0;
        }
        (self.positive as f64 - self.negative as f64) / total as f64
    }
}

/// Count mentions per topic over the given reviews
pub fn count_sentiment(indicators: &IndicatorMatrix, reviews: &[usize]) -> Vec<SentimentCounts> {
    let mut counts = vec![SentimentCounts::default(); indicators.num_topics()];
    for &review in reviews {
        for (topic, c) in counts.iter_mut().enumerate() {
            c.positive += indicators.positive(review, topic) as usize;
            c.negative += indicators.negative(review, topic) as usize;
        }
    }
    counts
}

/// Indicativeness score of every topic over a subset of reviews
pub fn score_subset(indicators: &IndicatorMatrix, reviews: &[usize]) -> TopicScores {
    TopicScores(
        count_sentiment(indicators, reviews)
            .iter()
            .map(SentimentCounts::indicativeness)
            .collect(),
    )
}

/// Indicativeness score of every topic over all reviews
pub fn score_all(indicators: &IndicatorMatrix) -> TopicScores {
    let all: Vec<usize> = (0..indicators.len()).collect();
    score_subset(indicators, &all)
}
