//! Reproducible subset sampling
//!
//! All randomness flows through a caller-supplied [`rand::Rng`]; nothing here
//! touches thread-local or global generators.

use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Draw `k` distinct review indices from `0..n`, uniformly at random
///
/// `k` is clamped to `n`, so asking for more reviews than exist returns a
/// permutation of all of them instead of failing.
pub fn sample_without_replacement<R: Rng + ?Sized>(rng: &mut R, n: usize, k: usize) -> Vec<usize> {
    index::sample(rng, n, k.min(n)).into_vec()
}

/// Generator for one hotel's trials, derived from a run seed
///
/// Each hotel gets its own ChaCha stream, so the draws for a hotel do not
/// depend on how many other hotels are evaluated or in which order.
pub fn hotel_rng(seed: u64, hotel_idx: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(hotel_idx as u64);
    rng
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_is_distinct_and_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut draw = sample_without_replacement(&mut rng, 50, 10);

        assert_eq!(draw.len(), 10);
        assert!(draw.iter().all(|&i| i < 50));
        draw.sort_unstable();
        draw.dedup();
        assert_eq!(draw.len(), 10);
    }

    #[test]
    fn test_sample_clamps_to_population() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut draw = sample_without_replacement(&mut rng, 4, 10);

        draw.sort_unstable();
        assert_eq!(draw, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_sample_empty_population() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert!(sample_without_replacement(&mut rng, 0, 10).is_empty());
    }

    #[test]
    fn test_same_seed_same_draws() {
        let a = sample_without_replacement(&mut hotel_rng(42, 3), 100, 10);
        let b = sample_without_replacement(&mut hotel_rng(42, 3), 100, 10);
        let c = sample_without_replacement(&mut hotel_rng(42, 4), 100, 10);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
