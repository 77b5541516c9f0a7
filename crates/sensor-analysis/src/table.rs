//! Immutable, column-major table of raw sensor cells.
//!
//! A [`Table`] keeps the header row exactly as it was read (duplicates
//! included) and stores the cells as a polars [`DataFrame`] of `String`
//! columns, one per distinct header. A cell is either present (possibly the
//! empty string) or absent (null) when its source line was too short.
//!
//! Duplicate headers resolve last-wins: the column stored for a repeated
//! name holds the cells found at the *last* position carrying that name.

use crate::error::{Result, ResultExt};
use crate::utils::duplicate_headers;
use polars::prelude::*;
use std::collections::HashMap;
use tracing::warn;

/// Header names plus column-major raw cells.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    data: DataFrame,
    row_count: usize,
}

impl Table {
    /// Build a table from positional rows.
    ///
    /// Cell `i` of a row belongs to header `i`. Cells beyond the header count
    /// are dropped; headers beyond the end of a short row are absent.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let positions = last_positions(&headers);
        let row_count = rows.len();

        let mut columns = Vec::with_capacity(positions.len());
        for (name, position) in &positions {
            let cells: Vec<Option<&str>> = rows
                .iter()
                .map(|row| row.get(*position).map(String::as_str))
                .collect();
            columns.push(Series::new(name.as_str().into(), cells).into_column());
        }

        Self::assemble(headers, columns, row_count)
    }

    /// Build a table from header-keyed records.
    ///
    /// A record without an entry for a header leaves that cell absent.
    /// Keys that are not headers are ignored.
    pub fn from_records<I>(headers: Vec<String>, records: I) -> Result<Self>
    where
        I: IntoIterator<Item = HashMap<String, String>>,
    {
        let records: Vec<HashMap<String, String>> = records.into_iter().collect();
        let row_count = records.len();

        let mut columns = Vec::new();
        for (name, _) in last_positions(&headers) {
            let cells: Vec<Option<&str>> = records
                .iter()
                .map(|record| record.get(name).map(String::as_str))
                .collect();
            columns.push(Series::new(name.as_str().into(), cells).into_column());
        }

        Self::assemble(headers, columns, row_count)
    }

    fn assemble(headers: Vec<String>, columns: Vec<Column>, row_count: usize) -> Result<Self> {
        let duplicates = duplicate_headers(&headers);
        if !duplicates.is_empty() {
            warn!(
                "Duplicate headers {:?}: the last column with each name is used",
                duplicates
            );
        }

        let data = DataFrame::new(columns).context("Failed to build column storage")?;

        Ok(Self {
            headers,
            data,
            row_count,
        })
    }

    /// Header names in file order, duplicates included.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Whether a header with exactly this name exists.
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of distinct columns.
    pub fn column_count(&self) -> usize {
        self.data.width()
    }

    /// Underlying column storage.
    pub fn dataframe(&self) -> &DataFrame {
        &self.data
    }

    /// Raw cells of a column in row order; `None` marks an absent cell.
    pub fn cells(&self, header: &str) -> Result<impl Iterator<Item = Option<&str>> + '_> {
        Ok(self.string_column(header)?.into_iter())
    }

    /// Raw cell at `row` under `header`, if present.
    pub fn cell(&self, row: usize, header: &str) -> Option<&str> {
        if row >= self.row_count {
            return None;
        }
        self.string_column(header).ok()?.get(row)
    }

    fn string_column(&self, header: &str) -> Result<&StringChunked> {
        let column = self
            .data
            .column(header)
            .context(format!("Looking up column '{}'", header))?;
        column
            .as_materialized_series()
            .str()
            .context(format!("Reading column '{}' as text", header))
    }
}

/// Distinct headers in first-appearance order, each paired with the last
/// position carrying that name.
fn last_positions(headers: &[String]) -> Vec<(&String, usize)> {
    let mut order: Vec<&String> = Vec::new();
    let mut positions: HashMap<&String, usize> = HashMap::new();
    for (i, header) in headers.iter().enumerate() {
        if positions.insert(header, i).is_none() {
            order.push(header);
        }
    }
    order
        .into_iter()
        .map(|header| (header, positions[header]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_rows_basic() {
        let table = Table::from_rows(
            strings(&["Temperature", "pH"]),
            vec![strings(&["10", "7.1"]), strings(&["20", "7.3"])],
        )
        .unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.dataframe().height(), 2);
        assert_eq!(table.cell(0, "Temperature"), Some("10"));
        assert_eq!(table.cell(1, "pH"), Some("7.3"));
        assert_eq!(table.cell(2, "pH"), None);
    }

    #[test]
    fn test_short_row_leaves_cells_absent() {
        let table = Table::from_rows(
            strings(&["a", "b", "c"]),
            vec![strings(&["1"]), strings(&["1", "", "3"])],
        )
        .unwrap();

        assert_eq!(table.cell(0, "a"), Some("1"));
        assert_eq!(table.cell(0, "b"), None);
        assert_eq!(table.cell(1, "b"), Some(""));

        let cells: Vec<Option<&str>> = table.cells("c").unwrap().collect();
        assert_eq!(cells, vec![None, Some("3")]);
    }

    #[test]
    fn test_long_row_extra_cells_dropped() {
        let table =
            Table::from_rows(strings(&["a"]), vec![strings(&["1", "2", "3"])]).unwrap();
        assert_eq!(table.column_count(), 1);
        assert_eq!(table.cell(0, "a"), Some("1"));
    }

    #[test]
    fn test_duplicate_headers_last_wins() {
        let table = Table::from_rows(
            strings(&["x", "y", "x"]),
            vec![strings(&["1", "2", "3"]), strings(&["4", "5"])],
        )
        .unwrap();

        assert_eq!(table.headers(), &strings(&["x", "y", "x"])[..]);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.cell(0, "x"), Some("3"));
        // The last "x" position is beyond the short second row.
        assert_eq!(table.cell(1, "x"), None);
    }

    #[test]
    fn test_from_records() {
        let mut first = HashMap::new();
        first.insert("a".to_string(), "1".to_string());
        first.insert("b".to_string(), "x".to_string());
        let mut second = HashMap::new();
        second.insert("a".to_string(), "2".to_string());
        second.insert("unused".to_string(), "z".to_string());

        let table = Table::from_records(strings(&["a", "b"]), vec![first, second]).unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(0, "b"), Some("x"));
        assert_eq!(table.cell(1, "b"), None);
        assert_eq!(table.cell(1, "a"), Some("2"));
        assert!(!table.has_header("unused"));
    }

    #[test]
    fn test_unknown_column_is_error() {
        let table = Table::from_rows(strings(&["a"]), vec![strings(&["1"])]).unwrap();
        assert!(table.cells("missing").is_err());
        assert_eq!(table.cell(0, "missing"), None);
    }

    #[test]
    fn test_empty_table() {
        let table = Table::from_rows(Vec::new(), Vec::new()).unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
        assert!(table.headers().is_empty());
    }
}
