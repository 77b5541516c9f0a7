//! Delimited text loader.
//!
//! The format is deliberately simple: the first line holds the header names,
//! every following line holds one row, and fields are separated by a bare
//! delimiter split. Each header and each field is trimmed. Quoting and
//! escaping are not supported, so a delimiter inside a value always starts a
//! new field.

use crate::error::{AnalysisError, Result};
use crate::table::Table;
use std::path::Path;
use tracing::{debug, info};

/// Default field delimiter.
pub const DEFAULT_DELIMITER: char = ',';

/// Loader turning delimited text into a [`Table`].
#[derive(Debug, Clone, Copy)]
pub struct CsvLoader {
    delimiter: char,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl CsvLoader {
    /// Create a loader using the comma delimiter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different single-character delimiter.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Read and parse a file.
    ///
    /// A missing file yields [`AnalysisError::FileNotFound`].
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<Table> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                AnalysisError::FileNotFound(path.display().to_string())
            }
            _ => AnalysisError::Io(e),
        })?;

        info!("Loading sensor data from: {}", path.display());
        self.parse_str(&content)
    }

    /// Parse delimited text already held in memory.
    ///
    /// Empty input yields a table with no headers and no rows. A trailing
    /// line terminator does not produce an extra row, but a blank line in the
    /// middle does: it is a row with a single empty cell.
    pub fn parse_str(&self, content: &str) -> Result<Table> {
        let mut lines = content.lines();

        let headers: Vec<String> = match lines.next() {
            Some(line) => self.split(line),
            None => Vec::new(),
        };

        let rows: Vec<Vec<String>> = lines.map(|line| self.split(line)).collect();

        debug!(
            "Parsed {} header(s) and {} row(s)",
            headers.len(),
            rows.len()
        );

        Table::from_rows(headers, rows)
    }

    fn split(&self, line: &str) -> Vec<String> {
        line.split(self.delimiter)
            .map(|field| field.trim().to_string())
            .collect()
    }
}
