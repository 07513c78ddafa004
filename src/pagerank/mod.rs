//! PageRank over review similarity graphs
//!
//! This module provides the weighted power-iteration PageRank used to score
//! reviews within a hotel.

pub mod standard;

pub use standard::StandardPageRank;

/// Result of a PageRank computation
#[derive(Debug, Clone)]
pub struct PageRankResult {
    /// Scores for each node (indexed by review index)
    pub scores: Vec<f64>,
    /// Number of iterations performed
    pub iterations: usize,
    /// Final convergence delta
    pub delta: f64,
    /// Whether the algorithm converged before the iteration cap
    pub converged: bool,
}

impl PageRankResult {
    /// Create a new PageRank result
    pub fn new(scores: Vec<f64>, iterations: usize, delta: f64, converged: bool) -> Self {
        Self {
            scores,
            iterations,
            delta,
            converged,
        }
    }

    /// Review indices ordered by descending score, ties by lower index
    pub fn ranking(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.scores.len()).collect();
        // Stable sort keeps index order among equal scores
        order.sort_by(|&a, &b| self.scores[b].total_cmp(&self.scores[a]));
        order
    }

    /// The `n` best `(review, score)` pairs, ties by lower index
    pub fn top_n(&self, n: usize) -> Vec<(u32, f64)> {
        self.ranking()
            .into_iter()
            .take(n)
            .map(|i| (i as u32, self.scores[i]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranking_ties_by_index() {
        let result = PageRankResult::new(vec![0.2, 0.4, 0.2, 0.2], 3, 0.0, true);
        assert_eq!(result.ranking(), vec![1, 0, 2, 3]);
        assert_eq!(result.top_n(3), vec![(1, 0.4), (0, 0.2), (2, 0.2)]);
        assert!(result.top_n(0).is_empty());
    }
}
