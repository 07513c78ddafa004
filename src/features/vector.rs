//! Unit vector representation for reviews
//!
//! Builds dense L2-normalized topic-sentiment vectors for similarity
//! calculations.

use super::indicators::IndicatorMatrix;
use crate::errors::Result;
use crate::table::ReviewTable;
use crate::types::TopicSet;

/// A dense unit vector representation of a review
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewVector {
    /// Normalized components, `2 * num_topics` of them
    pub values: Vec<f64>,
    /// L2 norm before normalization
    pub norm: f64,
}

impl ReviewVector {
    /// Create from raw components, normalizing to unit length
    ///
    /// A zero vector stays zero.
    pub fn from_values(mut values: Vec<f64>) -> Self {
        let norm = Self::compute_norm(&values);
        if norm > 0.0 {
            for value in &mut values {
                *value /= norm;
            }
        }
        Self { values, norm }
    }

    /// Create from one review's indicator flags
    pub fn from_flags(flags: &[u8]) -> Self {
        Self::from_values(flags.iter().map(|&f| f as f64).collect())
    }

    /// Compute L2 norm
    fn compute_norm(values: &[f64]) -> f64 {
        values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Compute cosine similarity with another vector
    pub fn cosine_similarity(&self, other: &ReviewVector) -> f64 {
        // Both vectors are unit length (or zero), so cosine is the dot product
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    /// Check if the vector is all zeros
    pub fn is_zero(&self) -> bool {
        self.norm == 0.0
    }
}

/// Builds review vectors for one hotel from its indicator columns
#[derive(Debug, Clone)]
pub struct FeatureVectorExtractor {
    topics: TopicSet,
}

impl FeatureVectorExtractor {
    pub fn new(topics: TopicSet) -> Self {
        Self { topics }
    }

    pub fn topics(&self) -> &TopicSet {
        &self.topics
    }

    /// Read indicator columns from `table` and normalize each row
    pub fn extract(&self, table: &ReviewTable) -> Result<Vec<ReviewVector>> {
        let indicators = IndicatorMatrix::from_table(table, &self.topics)?;
        Ok(Self::vectors(&indicators))
    }

    /// Normalize every row of an indicator matrix
    pub fn vectors(indicators: &IndicatorMatrix) -> Vec<ReviewVector> {
        indicators
            .rows()
            .iter()
            .map(|flags| ReviewVector::from_flags(flags))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity_identical() {
        let v1 = ReviewVector::from_values(vec![1.0, 0.0, 1.0, 0.0]);
        let v2 = ReviewVector::from_values(vec![1.0, 0.0, 1.0, 0.0]);

        let sim = v1.cosine_similarity(&v2);
        assert!((sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let v1 = ReviewVector::from_flags(&[1, 0]);
        let v2 = ReviewVector::from_flags(&[0, 1]);

        let sim = v1.cosine_similarity(&v2);
        assert!(sim.abs() < 1e-12);
    }

    #[test]
    fn test_zero_vector_stays_zero() {
        let v = ReviewVector::from_flags(&[0, 0, 0, 0]);
        assert!(v.is_zero());
        assert!(v.values.iter().all(|x| *x == 0.0 && !x.is_nan()));

        let other = ReviewVector::from_flags(&[1, 1, 0, 0]);
        assert_eq!(v.cosine_similarity(&other), 0.0);
    }

    #[test]
    fn test_unit_normalization() {
        let v = ReviewVector::from_flags(&[1, 1, 1, 0]);

        let actual_norm: f64 = v.values.iter().map(|x| x * x).sum::<f64>().sqrt();
        assert!((actual_norm - 1.0).abs() < 1e-9);
        assert!((v.norm - 3f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_extract_from_table() {
        let table = ReviewTable::from_reader(
            "Staff - positive,Staff - negative\n1,0\n0,0\n1,1\n".as_bytes(),
        )
        .unwrap();
        let vectors = FeatureVectorExtractor::new(TopicSet::new(["Staff"]))
            .extract(&table)
            .unwrap();

        assert_eq!(vectors.len(), 3);
        assert_eq!(vectors[0].values, vec![1.0, 0.0]);
        assert!(vectors[1].is_zero());
        assert!((vectors[2].values[0] - 1.0 / 2f64.sqrt()).abs() < 1e-12);
    }
}
