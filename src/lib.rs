//! # review-rank
//!
//! Graph-based importance ranking of hotel reviews.
//!
//! Each review of a hotel is described by positive/negative flags for a fixed
//! set of topics. Reviews become nodes of an undirected similarity graph
//! (cosine similarity of their normalized flag vectors), and PageRank over
//! that graph scores every review. The evaluation module then checks whether
//! a hotel's top-K reviews reflect its overall topic sentiment better than
//! random K-review subsets do.
//!
//! ## Pipeline
//!
//! ```text
//! ReviewTable → IndicatorMatrix → ReviewVector → GraphBuilder → CsrGraph → PageRank
//!                                                                             ↓
//!                       EvaluationReport ← IndicativenessEvaluator ← ScoredHotel
//! ```
//!
//! ## Example
//!
//! ```
//! use review_rank::{HotelRanker, ReviewTable, StandardPageRank, TopicSet};
//!
//! let csv = "Review,Staff - positive,Staff - negative\n\
//!            great staff,1,0\n\
//!            helpful desk,1,0\n\
//!            rude porter,0,1\n";
//! let table = ReviewTable::from_reader(csv.as_bytes()).unwrap();
//!
//! let topics = TopicSet::new(["Staff"]);
//! let ranker = HotelRanker::new(topics, StandardPageRank::new(), "PageRank Score");
//! let scored = ranker.score_table("Savoy", table).unwrap();
//! assert_eq!(scored.table.rows()[0][0], "great staff");
//! ```

pub mod config;
pub mod errors;
pub mod evaluation;
pub mod features;
pub mod graph;
pub mod pagerank;
pub mod pipeline;
pub mod profile;
pub mod recommend;
pub mod table;
pub mod types;

pub use config::RankConfig;
pub use errors::{Error, Result};
pub use evaluation::{evaluate_hotels, EvaluationReport, IndicativenessEvaluator, ScoredHotel};
pub use features::{FeatureVectorExtractor, IndicatorMatrix, ReviewVector};
pub use graph::{CsrGraph, GraphBuilder};
pub use pagerank::{PageRankResult, StandardPageRank};
pub use pipeline::{HotelRanker, ScoredTable};
pub use profile::HotelProfile;
pub use recommend::{rank_hotels, RankedHotel};
pub use table::ReviewTable;
pub use types::{TopicScores, TopicSet};
