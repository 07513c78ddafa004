//! Cross-hotel aggregation of deviation samples

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::evaluator::{HotelDeviations, IndicativenessEvaluator, ScoredHotel};
use super::sampler::hotel_rng;
use crate::types::TopicSet;

/// Mean and population standard deviation of a sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviationStats {
    pub mean: f64,
    pub std_dev: f64,
    pub samples: usize,
}

impl DeviationStats {
    /// Summarize a sample; an empty sample gives all zeros
    pub fn from_samples(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Self {
            mean,
            std_dev: variance.sqrt(),
            samples: values.len(),
        }
    }
}

/// Top-K and random-K statistics for one topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicComparison {
    pub topic: String,
    pub top_k: DeviationStats,
    pub random_k: DeviationStats,
}

/// Evaluation result over many hotels, one entry per topic in topic order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub subset_size: usize,
    pub trials: usize,
    /// Hotels that contributed (non-empty ones)
    pub hotels: usize,
    pub topics: Vec<TopicComparison>,
}

/// Pools per-topic deviation samples across hotels
#[derive(Debug, Clone)]
pub struct DeviationCollector {
    topics: TopicSet,
    top_k: Vec<Vec<f64>>,
    random_k: Vec<Vec<f64>>,
    hotels: usize,
}

impl DeviationCollector {
    pub fn new(topics: TopicSet) -> Self {
        let n = topics.len();
        Self {
            topics,
            top_k: vec![Vec::new(); n],
            random_k: vec![Vec::new(); n],
            hotels: 0,
        }
    }

    /// Add one hotel's top-K deviation and all its random-K samples
    pub fn add(&mut self, deviations: &HotelDeviations) {
        self.hotels += 1;
        for (t, values) in self.top_k.iter_mut().enumerate() {
            values.push(deviations.top_k.get(t));
        }
        for sample in &deviations.random_k {
            for (t, values) in self.random_k.iter_mut().enumerate() {
                values.push(sample.get(t));
            }
        }
    }

    pub fn finish(self, evaluator: &IndicativenessEvaluator) -> EvaluationReport {
        let topics = self
            .topics
            .iter()
            .zip(self.top_k.iter().zip(self.random_k.iter()))
            .map(|(topic, (top, random))| TopicComparison {
                topic: topic.to_string(),
                top_k: DeviationStats::from_samples(top),
                random_k: DeviationStats::from_samples(random),
            })
            .collect();

        EvaluationReport {
            subset_size: evaluator.subset_size,
            trials: evaluator.trials,
            hotels: self.hotels,
            topics,
        }
    }
}

/// Evaluate every hotel in parallel and aggregate the deviations
///
/// Hotel `i` draws its random subsets from `hotel_rng(seed, i)`, so the
/// report depends only on the inputs and the seed.
pub fn evaluate_hotels(
    hotels: &[ScoredHotel],
    topics: &TopicSet,
    evaluator: &IndicativenessEvaluator,
    seed: u64,
) -> EvaluationReport {
    let per_hotel: Vec<Option<HotelDeviations>> = hotels
        .par_iter()
        .enumerate()
        .map(|(i, hotel)| evaluator.evaluate_hotel(hotel, &mut hotel_rng(seed, i)))
        .collect();

    let mut collector = DeviationCollector::new(topics.clone());
    for (hotel, deviations) in hotels.iter().zip(&per_hotel) {
        let Some(deviations) = deviations else {
            tracing::debug!(hotel = %hotel.name, "skipping hotel without reviews");
            continue;
        };
        if deviations.effective_k < evaluator.subset_size {
            tracing::debug!(
                hotel = %deviations.hotel,
                subset_size = deviations.effective_k,
                "subset size clamped to review count"
            );
        }
        collector.add(deviations);
    }
    collector.finish(evaluator)
}
