//! Column profiling for raw sensor tables.
//!
//! This module decides which columns hold numeric measurements:
//! - Exclusion rules by header name (quality flags, timestamps, record numbers)
//! - Numeric detection from the raw cell text
//! - Per-column summaries of present and parseable cells

mod type_inference;

use crate::config::AnalyzerConfig;
use crate::table::Table;
use crate::utils::is_numeric_cell;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

pub use type_inference::ColumnKind;
pub(crate) use type_inference::infer_column_kind;

/// Ordered set of header names classified as numeric.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericColumnSet {
    columns: Vec<String>,
}

impl NumericColumnSet {
    /// Whether `column` was classified as numeric.
    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Numeric column names in header order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.columns
    }
}

/// Per-column summary of raw cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
    /// Cells present in the source (possibly empty strings).
    pub present_count: usize,
    /// Cells that parse as numbers.
    pub numeric_count: usize,
}

/// Profiler for classifying table columns.
pub struct ColumnProfiler;

impl ColumnProfiler {
    /// Classify the numeric columns of a table.
    ///
    /// Pure function of the table and the exclusion rules. Repeated header
    /// names appear once, at their first position.
    pub fn classify(table: &Table, config: &AnalyzerConfig) -> NumericColumnSet {
        let mut seen = HashSet::new();
        let mut columns = Vec::new();

        for header in table.headers() {
            if !seen.insert(header.as_str()) {
                continue;
            }
            let kind = infer_column_kind(table, header, config);
            debug!("Column '{}' classified as {}", header, kind.as_str());
            if kind == ColumnKind::Numeric {
                columns.push(header.clone());
            }
        }

        NumericColumnSet { columns }
    }

    /// Profile every distinct column of a table.
    pub fn profile_columns(table: &Table, config: &AnalyzerConfig) -> Vec<ColumnProfile> {
        let mut seen = HashSet::new();
        table
            .headers()
            .iter()
            .filter(|h| seen.insert(h.as_str()))
            .map(|header| {
                let (present_count, numeric_count) = count_cells(table, header);
                ColumnProfile {
                    name: header.clone(),
                    kind: infer_column_kind(table, header, config),
                    present_count,
                    numeric_count,
                }
            })
            .collect()
    }
}

fn count_cells(table: &Table, header: &str) -> (usize, usize) {
    let Ok(cells) = table.cells(header) else {
        return (0, 0);
    };
    cells.flatten().fold((0, 0), |(present, numeric), cell| {
        (present + 1, numeric + usize::from(is_numeric_cell(cell)))
    })
}
