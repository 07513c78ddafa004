//! Weighted PageRank by power iteration
//!
//! Teleportation is the only source of uniform mass. Isolated reviews are not
//! treated as dangling nodes whose mass is redistributed, so the raw vector
//! leaks probability each sweep and is rescaled to a distribution at the end.

use super::PageRankResult;
use crate::graph::csr::CsrGraph;

/// PageRank scorer for review similarity graphs
#[derive(Debug, Clone, PartialEq)]
pub struct StandardPageRank {
    /// Probability of following an edge rather than teleporting
    pub damping: f64,
    pub max_iterations: usize,
    /// Stop once the L1 change between sweeps falls below this
    pub tolerance: f64,
}

impl Default for StandardPageRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

impl StandardPageRank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Score every review of one hotel's graph
    ///
    /// Hitting the iteration cap is not an error: the last iterate is
    /// returned with `converged == false`.
    pub fn run(&self, graph: &CsrGraph) -> PageRankResult {
        let n = graph.num_nodes;
        if n <= 1 {
            return PageRankResult::new(vec![1.0; n], 0, 0.0, true);
        }

        let mut current = vec![1.0 / n as f64; n];
        let mut next = vec![0.0; n];
        let mut iterations = 0;
        let mut delta = f64::INFINITY;

        while iterations < self.max_iterations && delta >= self.tolerance {
            delta = self.sweep(graph, &current, &mut next);
            std::mem::swap(&mut current, &mut next);
            iterations += 1;
        }

        let mass: f64 = current.iter().sum();
        if mass > 0.0 {
            current.iter_mut().for_each(|s| *s /= mass);
        }

        PageRankResult::new(current, iterations, delta, delta < self.tolerance)
    }

    /// One synchronous update of `next` from `current`; returns the L1 change
    fn sweep(&self, graph: &CsrGraph, current: &[f64], next: &mut [f64]) -> f64 {
        next.fill((1.0 - self.damping) / graph.num_nodes as f64);

        for (review, &score) in current.iter().enumerate() {
            let strength = graph.strength(review as u32);
            if strength <= 0.0 {
                continue;
            }
            let share = self.damping * score / strength;
            for (neighbor, weight) in graph.neighbors(review as u32) {
                next[neighbor as usize] += share * weight;
            }
        }

        current.iter().zip(next.iter()).map(|(a, b)| (a - b).abs()).sum()
    }
}
