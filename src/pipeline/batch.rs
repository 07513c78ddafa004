//! Directory-level batch processing.
//!
//! Each CSV file in a directory is one hotel. Hotels are processed in
//! parallel with rayon; every job owns its table, so nothing is shared.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use super::runner::{HotelRanker, RankReport};
use crate::errors::{Error, Result};
use crate::evaluation::ScoredHotel;
use crate::table::ReviewTable;
use crate::types::TopicSet;

/// Prefix of scored table file names
pub const SCORED_FILE_PREFIX: &str = "pagerank_";
/// Prefix of topic-classified input file names
pub const CLASSIFIED_FILE_PREFIX: &str = "processed_reviews_";

/// Outcome of scoring one hotel file
#[derive(Debug, Clone)]
pub struct ScoredFile {
    pub hotel: String,
    pub output: PathBuf,
    pub reviews: usize,
    pub report: RankReport,
}

/// CSV files in `dir`, sorted by file name
pub fn csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| Error::io(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "csv") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Hotel identifier from a table's file name
///
/// Strips the extension and the scored/classified prefixes, so an input file
/// and its scored output map to the same hotel.
pub fn hotel_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = stem.strip_prefix(SCORED_FILE_PREFIX).unwrap_or(&stem);
    stem.strip_prefix(CLASSIFIED_FILE_PREFIX)
        .unwrap_or(stem)
        .to_string()
}

/// Score every hotel file in `input_dir`, writing `pagerank_<file>` tables
/// to `output_dir`
///
/// Stops at the first hotel that fails; files are processed in parallel, so
/// other hotels may already have been written.
pub fn score_directory(
    ranker: &HotelRanker,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<Vec<ScoredFile>> {
    fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;
    let files = csv_files(input_dir)?;
    tracing::info!(hotels = files.len(), input = %input_dir.display(), "scoring hotels");

    files
        .par_iter()
        .map(|path| {
            let hotel = hotel_name(path);
            let _span = tracing::info_span!("hotel", hotel = %hotel).entered();

            let table = ReviewTable::from_path(path)?;
            let scored = ranker.score_table(hotel.clone(), table)?;

            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let output = output_dir.join(format!("{SCORED_FILE_PREFIX}{file_name}"));
            scored.table.to_path(&output)?;
            tracing::info!(
                reviews = scored.table.len(),
                output = %output.display(),
                "saved scores"
            );

            Ok(ScoredFile {
                hotel,
                output,
                reviews: scored.table.len(),
                report: scored.report,
            })
        })
        .collect()
}

/// Load every scored table in `dir` for evaluation, sorted by file name
pub fn load_scored_directory(
    dir: &Path,
    topics: &TopicSet,
    score_column: &str,
) -> Result<Vec<ScoredHotel>> {
    csv_files(dir)?
        .par_iter()
        .map(|path| {
            let table = ReviewTable::from_path(path)?;
            ScoredHotel::from_table(hotel_name(path), &table, topics, score_column)
        })
        .collect()
}
