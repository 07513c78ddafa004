//! Hotel sentiment profiles
//!
//! A profile is a hotel's full-corpus indicativeness score per topic. The
//! profile table (one row per hotel) feeds preference re-ranking.

use std::io::{Read, Write};
use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::evaluation::score_all;
use crate::features::IndicatorMatrix;
use crate::pipeline::batch::{csv_files, hotel_name};
use crate::table::ReviewTable;
use crate::types::{TopicScores, TopicSet};

/// Header of the hotel identifier column in profile tables
pub const HOTEL_NAME_COLUMN: &str = "Hotel Name";

/// Full-corpus indicativeness of each topic for one hotel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelProfile {
    pub hotel: String,
    pub scores: TopicScores,
}

impl HotelProfile {
    /// Compute a profile from a topic-classified review table
    pub fn from_table(
        hotel: impl Into<String>,
        table: &ReviewTable,
        topics: &TopicSet,
    ) -> Result<Self> {
        let indicators = IndicatorMatrix::from_table(table, topics)?;
        Ok(Self {
            hotel: hotel.into(),
            scores: score_all(&indicators),
        })
    }
}

/// Profile every hotel table in `dir`, sorted by file name
pub fn profile_directory(dir: &Path, topics: &TopicSet) -> Result<Vec<HotelProfile>> {
    let profiles = csv_files(dir)?
        .par_iter()
        .map(|path| {
            let table = ReviewTable::from_path(path)?;
            HotelProfile::from_table(hotel_name(path), &table, topics)
        })
        .collect::<Result<Vec<_>>>()?;
    tracing::info!(hotels = profiles.len(), dir = %dir.display(), "built sentiment profiles");
    Ok(profiles)
}

/// Write profiles as CSV: `Hotel Name` then one column per topic
pub fn write_profiles<W: Write>(
    profiles: &[HotelProfile],
    topics: &TopicSet,
    writer: W,
) -> Result<()> {
    let mut headers = vec![HOTEL_NAME_COLUMN.to_string()];
    headers.extend(topics.names().iter().cloned());

    let rows = profiles
        .iter()
        .map(|p| {
            std::iter::once(p.hotel.clone())
                .chain(p.scores.iter().map(|s| s.to_string()))
                .collect()
        })
        .collect();

    ReviewTable::new(headers, rows)?.to_writer(writer)
}

/// Read a profile table, taking topic columns in `topics` order
pub fn read_profiles<R: Read>(reader: R, topics: &TopicSet) -> Result<Vec<HotelProfile>> {
    let table = ReviewTable::from_reader(reader)?;
    let name_col = table.require_column(HOTEL_NAME_COLUMN)?;
    let topic_cols = topics
        .iter()
        .map(|t| table.require_column(t).map(|idx| (t, idx)))
        .collect::<Result<Vec<_>>>()?;

    table
        .rows()
        .iter()
        .enumerate()
        .map(|(row_idx, row)| {
            let scores = topic_cols
                .iter()
                .map(|(topic, col)| {
                    row[*col]
                        .trim()
                        .parse::<f64>()
                        .ok()
                        .filter(|v| (-1.0..=1.0).contains(v))
                        .ok_or_else(|| Error::InvalidScore {
                            column: topic.to_string(),
                            row: row_idx,
                            value: row[*col].clone(),
                        })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(HotelProfile {
                hotel: row[name_col].clone(),
                scores: TopicScores(scores),
            })
        })
        .collect()
}
