//! Error types
//!
//! A single error enum covers every failure the crate can surface. Numerical
//! edge cases (empty hotels, zero denominators, non-convergence) are not
//! errors and never appear here.

use std::path::PathBuf;

/// Errors raised while loading, scoring, or evaluating review tables
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configured topic column is absent from the input table
    #[error("missing required column \"{column}\"")]
    MissingColumn { column: String },

    /// An indicator cell is not 0, 1, or empty
    #[error("invalid indicator value {value:?} in column \"{column}\" at row {row}")]
    InvalidIndicator {
        column: String,
        row: usize,
        value: String,
    },

    /// A score cell is not a number in the range its column allows
    #[error("invalid score value {value:?} in column \"{column}\" at row {row}")]
    InvalidScore {
        column: String,
        row: usize,
        value: String,
    },

    /// A row has a different number of cells than the header
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Configuration failed validation; carries every error diagnostic
    #[error("invalid configuration: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),

    /// Preference weights for hotel re-ranking are unusable
    #[error("invalid preference weights: {0}")]
    InvalidWeights(String),

    /// Hotels selected for re-ranking that have no profile
    #[error("no profile for selected hotel(s): {}", .0.join(", "))]
    UnknownHotels(Vec<String>),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_names_column() {
        let err = Error::MissingColumn {
            column: "Staff - positive".to_string(),
        };
        assert!(err.to_string().contains("Staff - positive"));
    }

    #[test]
    fn test_invalid_config_joins_messages() {
        let err = Error::InvalidConfig(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "invalid configuration: a; b");
    }
}
