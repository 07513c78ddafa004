//! Run configuration.
//!
//! A [`RankConfig`] names the topic taxonomy, PageRank parameters and
//! evaluation parameters for a batch run. These types are the input to the
//! [`validation::ValidationEngine`].
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "v": 1,
//!   "topics": ["Room amenities", "Hotel amenities", "Staff", "Food and beverages", "Location"],
//!   "score_column": "PageRank Score",
//!   "pagerank": { "damping": 0.85, "tolerance": 1e-6, "max_iterations": 100 },
//!   "evaluation": { "subset_size": 10, "trials": 100, "seed": 42 },
//!   "strict": false
//! }
//! ```
//!
//! Every field is optional; omitted fields take the values shown above.

pub mod validation;

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::evaluation::IndicativenessEvaluator;
use crate::pagerank::StandardPageRank;
use crate::types::TopicSet;
use validation::ValidationEngine;

/// Topics of the hotel-review taxonomy used when none are configured
pub const DEFAULT_TOPICS: [&str; 5] = [
    "Room amenities",
    "Hotel amenities",
    "Staff",
    "Food and beverages",
    "Location",
];

/// Header of the appended score column in scored tables
pub const DEFAULT_SCORE_COLUMN: &str = "PageRank Score";

/// Top-level run configuration (v1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankConfig {
    /// Config version (currently `1`).
    #[serde(default = "default_version")]
    pub v: u32,

    /// Ordered topic taxonomy.
    #[serde(default = "default_topics")]
    pub topics: TopicSet,

    /// Name of the score column appended to scored tables.
    #[serde(default = "default_score_column")]
    pub score_column: String,

    #[serde(default)]
    pub pagerank: PageRankSpec,

    #[serde(default)]
    pub evaluation: EvaluationSpec,

    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    #[serde(default)]
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    /// Used by the strict-mode validation rule.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

fn default_version() -> u32 {
    1
}

fn default_topics() -> TopicSet {
    TopicSet::new(DEFAULT_TOPICS)
}

fn default_score_column() -> String {
    DEFAULT_SCORE_COLUMN.to_string()
}

/// PageRank parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRankSpec {
    #[serde(default = "default_damping")]
    pub damping: f64,

    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

fn default_damping() -> f64 {
    0.85
}

fn default_tolerance() -> f64 {
    1e-6
}

fn default_max_iterations() -> usize {
    100
}

impl Default for PageRankSpec {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            unknown_fields: HashMap::new(),
        }
    }
}

/// Evaluation protocol parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationSpec {
    /// Reviews per subset (K).
    #[serde(default = "default_subset_size")]
    pub subset_size: usize,

    /// Random trials per hotel (R).
    #[serde(default = "default_trials")]
    pub trials: usize,

    /// Seed for the random-subset generators.
    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

fn default_subset_size() -> usize {
    10
}

fn default_trials() -> usize {
    100
}

fn default_seed() -> u64 {
    42
}

impl Default for EvaluationSpec {
    fn default() -> Self {
        Self {
            subset_size: default_subset_size(),
            trials: default_trials(),
            seed: default_seed(),
            unknown_fields: HashMap::new(),
        }
    }
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            v: default_version(),
            topics: default_topics(),
            score_column: default_score_column(),
            pagerank: PageRankSpec::default(),
            evaluation: EvaluationSpec::default(),
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }
}

impl RankConfig {
    /// Parse a JSON config without validating it
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON config file without validating it
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json_str(&json)
    }

    /// Run the default validation rules; warnings are logged, errors returned
    pub fn validated(self) -> Result<Self> {
        let report = ValidationEngine::with_defaults().validate(&self);
        for warning in report.warnings() {
            tracing::warn!(path = %warning.path, "{}", warning.message);
        }
        if report.has_errors() {
            return Err(Error::InvalidConfig(
                report.errors().map(ToString::to_string).collect(),
            ));
        }
        Ok(self)
    }

    /// PageRank scorer built from the configured parameters
    pub fn ranker(&self) -> StandardPageRank {
        StandardPageRank::new()
            .with_damping(self.pagerank.damping)
            .with_tolerance(self.pagerank.tolerance)
            .with_max_iterations(self.pagerank.max_iterations)
    }

    /// Evaluator built from the configured K and R
    pub fn evaluator(&self) -> IndicativenessEvaluator {
        IndicativenessEvaluator::new()
            .with_subset_size(self.evaluation.subset_size)
            .with_trials(self.evaluation.trials)
    }
}
