//! Top-K vs. random-K indicativeness evaluation for one hotel

use rand::Rng;

use super::indicativeness::{score_all, score_subset};
use super::sampler::sample_without_replacement;
use crate::errors::{Error, Result};
use crate::features::IndicatorMatrix;
use crate::table::ReviewTable;
use crate::types::{TopicScores, TopicSet};

/// A hotel's reviews with their PageRank scores
///
/// Review index `i` refers to row `i` of both `indicators` and `scores`; this
/// order is the tie-breaker when scores are equal.
#[derive(Debug, Clone)]
pub struct ScoredHotel {
    pub name: String,
    pub indicators: IndicatorMatrix,
    pub scores: Vec<f64>,
}

impl ScoredHotel {
    /// `indicators` and `scores` must describe the same reviews in the same
    /// order.
    pub fn new(name: impl Into<String>, indicators: IndicatorMatrix, scores: Vec<f64>) -> Self {
        debug_assert_eq!(indicators.len(), scores.len(), "one score per review");
        Self {
            name: name.into(),
            indicators,
            scores,
        }
    }

    /// Load a scored table, reading flags for `topics` and the score column
    ///
    /// Row order of the table is kept as review order.
    pub fn from_table(
        name: impl Into<String>,
        table: &ReviewTable,
        topics: &TopicSet,
        score_column: &str,
    ) -> Result<Self> {
        let indicators = IndicatorMatrix::from_table(table, topics)?;
        let col = table.require_column(score_column)?;
        let scores = table
            .column(col)
            .enumerate()
            .map(|(row, cell)| match cell.trim().parse::<f64>() {
                Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
                _ => Err(Error::InvalidScore {
                    column: score_column.to_string(),
                    row,
                    value: cell.to_string(),
                }),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(name, indicators, scores))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Indices of the `k` highest-scored reviews, ties by lower index
    pub fn top_k(&self, k: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.scores.len()).collect();
        order.sort_by(|&a, &b| self.scores[b].total_cmp(&self.scores[a]));
        order.truncate(k);
        order
    }
}

/// Deviations of one hotel's subset estimates from its full-corpus scores
#[derive(Debug, Clone, PartialEq)]
pub struct HotelDeviations {
    pub hotel: String,
    /// Subset size actually used after clamping
    pub effective_k: usize,
    pub top_k: TopicScores,
    /// One entry per random trial
    pub random_k: Vec<TopicScores>,
}

/// Compares PageRank-selected subsets against random subsets of equal size
#[derive(Debug, Clone, PartialEq)]
pub struct IndicativenessEvaluator {
    /// Reviews per subset (K)
    pub subset_size: usize,
    /// Random trials per hotel (R)
    pub trials: usize,
}

impl Default for IndicativenessEvaluator {
    fn default() -> Self {
        Self {
            subset_size: 10,
            trials: 100,
        }
    }
}

impl IndicativenessEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subset_size(mut self, subset_size: usize) -> Self {
        self.subset_size = subset_size;
        self
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Subset size for a hotel, clamped to its review count
    pub fn effective_k(&self, hotel: &ScoredHotel) -> usize {
        self.subset_size.min(hotel.len())
    }

    /// Indicativeness of every topic over the given reviews
    pub fn score_subset(&self, hotel: &ScoredHotel, reviews: &[usize]) -> TopicScores {
        score_subset(&hotel.indicators, reviews)
    }

    /// |top-K estimate − full estimate| per topic
    pub fn top_k_deviation(&self, hotel: &ScoredHotel) -> TopicScores {
        let full = score_all(&hotel.indicators);
        let top = score_subset(&hotel.indicators, &hotel.top_k(self.effective_k(hotel)));
        top.abs_diff(&full)
    }

    /// |random-K estimate − full estimate| per topic, once per trial
    ///
    /// Each trial draws K distinct reviews; trials are independent.
    pub fn random_k_deviation<R: Rng + ?Sized>(
        &self,
        hotel: &ScoredHotel,
        rng: &mut R,
    ) -> Vec<TopicScores> {
        if hotel.is_empty() {
            return Vec::new();
        }
        let full = score_all(&hotel.indicators);
        let k = self.effective_k(hotel);

        (0..self.trials)
            .map(|_| {
                let draw = sample_without_replacement(rng, hotel.len(), k);
                score_subset(&hotel.indicators, &draw).abs_diff(&full)
            })
            .collect()
    }

    /// Both deviation measures for one hotel; `None` for a hotel with no reviews
    pub fn evaluate_hotel<R: Rng + ?Sized>(
        &self,
        hotel: &ScoredHotel,
        rng: &mut R,
    ) -> Option<HotelDeviations> {
        if hotel.is_empty() {
            return None;
        }
        Some(HotelDeviations {
            hotel: hotel.name.clone(),
            effective_k: self.effective_k(hotel),
            top_k: self.top_k_deviation(hotel),
            random_k: self.random_k_deviation(hotel, rng),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn staff_hotel(scores: Vec<f64>) -> ScoredHotel {
        let indicators = IndicatorMatrix::from_topic_columns(&[(vec![1, 0, 1], vec![0, 1, 0])]);
        ScoredHotel::new("h", indicators, scores)
    }

    #[test]
    fn test_top_k_deviation_example() {
        // Top two by score are the first two rows
        let hotel = staff_hotel(vec![0.5, 0.3, 0.2]);
        let eval = IndicativenessEvaluator::new().with_subset_size(2);

        let dev = eval.top_k_deviation(&hotel);
        assert!((dev.get(0) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_top_k_ties_by_index() {
        let hotel = staff_hotel(vec![0.2, 0.4, 0.4]);
        assert_eq!(hotel.top_k(2), vec![1, 2]);

        let tied = staff_hotel(vec![0.3, 0.3, 0.3]);
        assert_eq!(tied.top_k(2), vec![0, 1]);
    }

    #[test]
    fn test_k_clamped_to_review_count() {
        let indicators =
            IndicatorMatrix::from_topic_columns(&[(vec![1, 0, 1, 1], vec![0, 1, 0, 0])]);
        let hotel = ScoredHotel::new("small", indicators, vec![0.25; 4]);
        let eval = IndicativenessEvaluator::new().with_subset_size(10).with_trials(5);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        assert_eq!(eval.effective_k(&hotel), 4);
        let samples = eval.random_k_deviation(&hotel, &mut rng);
        assert_eq!(samples.len(), 5);
        // Every trial covers the whole hotel, so there is no deviation
        assert!(samples.iter().all(|s| s.get(0).abs() < 1e-12));
        assert!(eval.top_k_deviation(&hotel).get(0).abs() < 1e-12);

        let deviations = eval.evaluate_hotel(&hotel, &mut rng).unwrap();
        assert_eq!(deviations.hotel, "small");
        assert_eq!(deviations.effective_k, 4);
        assert_eq!(deviations.random_k.len(), 5);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "one score per review")]
    fn test_mismatched_lengths_rejected() {
        let indicators = IndicatorMatrix::from_rows(1, vec![vec![1, 0], vec![0, 1]]);
        ScoredHotel::new("h", indicators, vec![1.0]);
    }

    #[test]
    fn test_random_k_reproducible_with_seed() {
        let rows: Vec<Vec<u8>> = (0..40)
            .map(|i| vec![(i % 3 == 0) as u8, (i % 4 == 0) as u8])
            .collect();
        let hotel = ScoredHotel::new("h", IndicatorMatrix::from_rows(1, rows), vec![0.025; 40]);
        let eval = IndicativenessEvaluator::new();

        let a = eval.random_k_deviation(&hotel, &mut ChaCha8Rng::seed_from_u64(9));
        let b = eval.random_k_deviation(&hotel, &mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(a.len(), 100);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_hotel_is_noop() {
        let hotel = ScoredHotel::new("empty", IndicatorMatrix::from_rows(2, vec![]), vec![]);
        let eval = IndicativenessEvaluator::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        assert!(eval.random_k_deviation(&hotel, &mut rng).is_empty());
        assert!(eval.evaluate_hotel(&hotel, &mut rng).is_none());
    }

    #[test]
    fn test_from_table_reads_scores() {
        let table = ReviewTable::from_reader(
            "Staff - positive,Staff - negative,PageRank Score\n1,0,0.6\n0,1,0.4\n".as_bytes(),
        )
        .unwrap();
        let topics = TopicSet::new(["Staff"]);
        let hotel = ScoredHotel::from_table("h", &table, &topics, "PageRank Score").unwrap();

        assert_eq!(hotel.scores, vec![0.6, 0.4]);
        assert_eq!(hotel.top_k(1), vec![0]);
    }

    #[test]
    fn test_from_table_rejects_bad_score() {
        let table = ReviewTable::from_reader(
            "Staff - positive,Staff - negative,PageRank Score\n1,0,abc\n".as_bytes(),
        )
        .unwrap();
        let err = ScoredHotel::from_table("h", &table, &TopicSet::new(["Staff"]), "PageRank Score")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidScore { row: 0, .. }));
    }
}
