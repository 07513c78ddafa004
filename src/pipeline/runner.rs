//! Per-hotel ranking runner.
//!
//! [`HotelRanker`] executes the scoring stages for one hotel in order:
//!
//! 1. Extract topic-sentiment vectors from the review table
//! 2. Build the review similarity graph
//! 3. Rank reviews with PageRank
//! 4. Append the score column and sort the table by it
//!
//! Hotels never share state, so one ranker can be used from many threads.

use crate::config::RankConfig;
use crate::errors::Result;
use crate::features::{FeatureVectorExtractor, IndicatorMatrix};
use crate::graph::{build_graph_parallel, CsrGraph};
use crate::pagerank::{PageRankResult, StandardPageRank};
use crate::table::ReviewTable;
use crate::types::TopicSet;

pub const STAGE_FEATURES: &str = "features";
pub const STAGE_GRAPH: &str = "graph";
pub const STAGE_RANK: &str = "rank";
pub const STAGE_SORT: &str = "sort";

/// Enter a tracing span for a ranking stage.
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::debug_span!("ranking_stage", stage = $name).entered();
    };
}

/// Graph and convergence facts from one hotel's run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankReport {
    pub nodes: usize,
    /// Undirected edges, each counted once
    pub edges: usize,
    /// Reviews that share no topic sentiment with any other review
    pub isolated: usize,
    pub iterations: usize,
    pub delta: f64,
    pub converged: bool,
}

/// One hotel's reviews after ranking.
#[derive(Debug, Clone)]
pub struct ScoredTable {
    pub hotel: String,
    /// Input table plus the score column, sorted by score descending
    pub table: ReviewTable,
    /// Indicator flags in the same row order as `table`
    pub indicators: IndicatorMatrix,
    /// Scores in the same row order as `table`
    pub scores: Vec<f64>,
    pub report: RankReport,
}

/// Scores the reviews of one hotel.
#[derive(Debug, Clone)]
pub struct HotelRanker {
    extractor: FeatureVectorExtractor,
    ranker: StandardPageRank,
    score_column: String,
}

impl HotelRanker {
    pub fn new(
        topics: TopicSet,
        ranker: StandardPageRank,
        score_column: impl Into<String>,
    ) -> Self {
        Self {
            extractor: FeatureVectorExtractor::new(topics),
            ranker,
            score_column: score_column.into(),
        }
    }

    pub fn from_config(config: &RankConfig) -> Self {
        Self::new(config.topics.clone(), config.ranker(), config.score_column.clone())
    }

    pub fn topics(&self) -> &TopicSet {
        self.extractor.topics()
    }

    /// Run extraction, graph construction and PageRank for one hotel.
    ///
    /// Scores are indexed by the table's row order.
    pub fn rank(&self, indicators: &IndicatorMatrix) -> (PageRankResult, RankReport) {
        let vectors = {
            trace_stage!(STAGE_FEATURES);
            FeatureVectorExtractor::vectors(indicators)
        };

        let graph = {
            trace_stage!(STAGE_GRAPH);
            CsrGraph::from_builder(&build_graph_parallel(&vectors))
        };

        let result = {
            trace_stage!(STAGE_RANK);
            self.ranker.run(&graph)
        };

        let report = RankReport {
            nodes: graph.num_nodes,
            edges: graph.edge_count(),
            isolated: graph.isolated_count(),
            iterations: result.iterations,
            delta: result.delta,
            converged: result.converged,
        };
        (result, report)
    }

    /// Score a hotel's review table.
    ///
    /// Fails fast when an indicator column is missing or malformed. An empty
    /// table yields an empty scored table.
    pub fn score_table(
        &self,
        hotel: impl Into<String>,
        mut table: ReviewTable,
    ) -> Result<ScoredTable> {
        let hotel = hotel.into();
        let indicators = IndicatorMatrix::from_table(&table, self.topics())?;
        let (result, report) = self.rank(&indicators);

        if !report.converged {
            tracing::warn!(
                hotel = %hotel,
                iterations = report.iterations,
                delta = report.delta,
                "PageRank did not converge; using last iterate"
            );
        }
        if let Some(&(top_review, top_score)) = result.top_n(1).first() {
            tracing::debug!(
                hotel = %hotel,
                nodes = report.nodes,
                edges = report.edges,
                isolated = report.isolated,
                iterations = report.iterations,
                top_review,
                top_score,
                "ranked reviews"
            );
        }

        trace_stage!(STAGE_SORT);
        let order = result.ranking();
        table.set_column(
            self.score_column.clone(),
            result.scores.iter().map(|s| s.to_string()).collect(),
        )?;
        table.reorder(&order);

        Ok(ScoredTable {
            hotel,
            table,
            indicators: indicators.select(&order),
            scores: order.iter().map(|&i| result.scores[i]).collect(),
            report,
        })
    }
}
