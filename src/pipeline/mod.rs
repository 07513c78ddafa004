//! Scoring pipeline
//!
//! Wires feature extraction, graph construction and PageRank into a per-hotel
//! runner, plus directory-level batch helpers.

pub mod batch;
pub mod runner;

pub use batch::{hotel_name, load_scored_directory, score_directory, ScoredFile};
pub use runner::{HotelRanker, RankReport, ScoredTable};
