//! Indicativeness evaluation
//!
//! Measures how closely a small review subset reproduces a hotel's per-topic
//! sentiment signal. The PageRank top-K subset is compared against random
//! subsets of the same size, and the deviations are pooled across hotels.

pub mod aggregate;
pub mod evaluator;
pub mod indicativeness;
pub mod sampler;

pub use aggregate::{
    evaluate_hotels, DeviationCollector, DeviationStats, EvaluationReport, TopicComparison,
};
pub use evaluator::{HotelDeviations, IndicativenessEvaluator, ScoredHotel};
pub use indicativeness::{score_all, score_subset, SentimentCounts};
