//! Indicator flag extraction from review tables

use crate::errors::{Error, Result};
use crate::table::ReviewTable;
use crate::types::TopicSet;

/// Per-review positive/negative flags for each configured topic
///
/// Row `i` holds `2 * num_topics` flags laid out as
/// `[t0 positive, t0 negative, t1 positive, ...]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndicatorMatrix {
    num_topics: usize,
    rows: Vec<Vec<u8>>,
}

impl IndicatorMatrix {
    /// Build directly from flag rows
    ///
    /// Rows shorter than `2 * num_topics` are padded with zeros, longer rows
    /// are truncated.
    pub fn from_rows(num_topics: usize, rows: Vec<Vec<u8>>) -> Self {
        let dim = num_topics * 2;
        let rows = rows
            .into_iter()
            .map(|mut r| {
                r.resize(dim, 0);
                r
            })
            .collect();
        Self { num_topics, rows }
    }

    /// Build from separate positive and negative flag columns per topic
    ///
    /// `columns[t] = (positive flags, negative flags)` for topic `t`.
    pub fn from_topic_columns(columns: &[(Vec<u8>, Vec<u8>)]) -> Self {
        let n = columns
            .iter()
            .map(|(p, q)| p.len().max(q.len()))
            .max()
            .unwrap_or(0);
        let rows = (0..n)
            .map(|i| {
                columns
                    .iter()
                    .flat_map(|(p, q)| {
                        [
                            p.get(i).copied().unwrap_or(0),
                            q.get(i).copied().unwrap_or(0),
                        ]
                    })
                    .collect()
            })
            .collect();
        Self {
            num_topics: columns.len(),
            rows,
        }
    }

    /// Extract flags for `topics` from a review table
    ///
    /// Fails on the first missing column (in topic order) or on a cell that is
    /// not 0/1. Empty cells count as 0.
    pub fn from_table(table: &ReviewTable, topics: &TopicSet) -> Result<Self> {
        let columns = topics
            .indicator_columns()
            .into_iter()
            .map(|name| table.require_column(&name).map(|idx| (name, idx)))
            .collect::<Result<Vec<_>>>()?;

        let rows = table
            .rows()
            .iter()
            .enumerate()
            .map(|(row_idx, row)| {
                columns
                    .iter()
                    .map(|(name, col)| parse_flag(&row[*col], name, row_idx))
                    .collect::<Result<Vec<u8>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            num_topics: topics.len(),
            rows,
        })
    }

    pub fn num_topics(&self) -> usize {
        self.num_topics
    }

    /// Number of reviews
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All flags of one review
    pub fn row(&self, review: usize) -> &[u8] {
        &self.rows[review]
    }

    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }

    pub fn positive(&self, review: usize, topic: usize) -> bool {
        self.rows[review][topic * 2] != 0
    }

    pub fn negative(&self, review: usize, topic: usize) -> bool {
        self.rows[review][topic * 2 + 1] != 0
    }

    /// Keep only the given reviews, in the given order
    pub fn select(&self, reviews: &[usize]) -> Self {
        Self {
            num_topics: self.num_topics,
            rows: reviews.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }
}

fn parse_flag(cell: &str, column: &str, row: usize) -> Result<u8> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v == 0.0 => Ok(0),
        Ok(v) if v == 1.0 => Ok(1),
        _ => Err(Error::InvalidIndicator {
            column: column.to_string(),
            row,
            value: cell.to_string(),
        }),
    }
}
