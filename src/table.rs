//! CSV-backed review tables
//!
//! A [`ReviewTable`] keeps every input column as text so that scored output
//! carries the original data through untouched. Row position is the review's
//! stable index within its hotel.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::errors::{Error, Result};

/// One hotel's reviews as a header plus text rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ReviewTable {
    /// Build a table, checking that every row matches the header width
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != headers.len())
        {
            return Err(Error::RaggedRow {
                row,
                expected: headers.len(),
                found: cells.len(),
            });
        }
        Ok(Self { headers, rows })
    }

    /// Read a headered CSV table
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Self::new(headers, rows)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        Self::from_reader(file)
    }

    /// Write the table as CSV with its header
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    pub fn to_path(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| Error::io(path, e))?;
        self.to_writer(file)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of reviews
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact header name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Position of a column, failing with the column's name when absent
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name).ok_or_else(|| Error::MissingColumn {
            column: name.to_string(),
        })
    }

    /// Iterate over one column's cells
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(move |r| r[idx].as_str())
    }

    /// Set a column's values, replacing an existing column of that name or
    /// appending a new one
    pub fn set_column(&mut self, name: impl Into<String>, values: Vec<String>) -> Result<()> {
        if values.len() != self.rows.len() {
            return Err(Error::RaggedRow {
                row: values.len().min(self.rows.len()),
                expected: self.rows.len(),
                found: values.len(),
            });
        }
        let name = name.into();
        match self.column_index(&name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.headers.push(name);
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(())
    }

    /// Reorder rows by a permutation of row indices
    pub fn reorder(&mut self, order: &[usize]) {
        let mut rows: Vec<Option<Vec<String>>> =
            std::mem::take(&mut self.rows).into_iter().map(Some).collect();
        self.rows = order.iter().filter_map(|&i| rows[i].take()).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Review,Staff - positive,Staff - negative
great staff,1,0
\"rude, slow\",0,1
";

    #[test]
    fn test_read_headers_and_rows() {
        let table = ReviewTable::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.headers().len(), 3);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1][0], "rude, slow");
    }

    #[test]
    fn test_require_column_names_missing() {
        let table = ReviewTable::from_reader(SAMPLE.as_bytes()).unwrap();
        let err = table.require_column("Location - positive").unwrap_err();
        assert!(matches!(err, Error::MissingColumn { column } if column == "Location - positive"));
    }

    #[test]
    fn test_set_column_and_reorder() {
        let mut table = ReviewTable::from_reader(SAMPLE.as_bytes()).unwrap();
        table
            .set_column("Score", vec!["0.1".to_string(), "0.9".to_string()])
            .unwrap();
        table.reorder(&[1, 0]);

        assert_eq!(table.headers().last().unwrap(), "Score");
        assert_eq!(table.rows()[0][3], "0.9");
        assert_eq!(table.rows()[1][0], "great staff");
    }

    #[test]
    fn test_set_column_replaces_existing() {
        let mut table = ReviewTable::from_reader(SAMPLE.as_bytes()).unwrap();
        table
            .set_column("Staff - positive", vec!["0".to_string(), "1".to_string()])
            .unwrap();

        assert_eq!(table.headers().len(), 3);
        assert_eq!(table.rows()[0][1], "0");
        assert_eq!(table.rows()[1][1], "1");
    }

    #[test]
    fn test_set_column_length_mismatch() {
        let mut table = ReviewTable::from_reader(SAMPLE.as_bytes()).unwrap();
        let err = table.set_column("Score", vec!["1".to_string()]).unwrap_err();
        assert!(matches!(err, Error::RaggedRow { expected: 2, found: 1, .. }));
    }

    #[test]
    fn test_write_preserves_quoting() {
        let table = ReviewTable::from_reader(SAMPLE.as_bytes()).unwrap();
        let mut out = Vec::new();
        table.to_writer(&mut out).unwrap();

        let back = ReviewTable::from_reader(out.as_slice()).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = ReviewTable::new(vec!["a".into(), "b".into()], vec![vec!["1".into()]])
            .unwrap_err();
        assert!(matches!(err, Error::RaggedRow { row: 0, expected: 2, found: 1 }));
    }
}
