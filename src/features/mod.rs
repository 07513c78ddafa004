//! Topic-sentiment features
//!
//! Turns a hotel's indicator columns into per-review flags and unit vectors
//! used for similarity calculations.

pub mod indicators;
pub mod vector;

pub use indicators::IndicatorMatrix;
pub use vector::{FeatureVectorExtractor, ReviewVector};
