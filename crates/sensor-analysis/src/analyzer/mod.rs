//! Column and correlation analysis.
//!
//! The free functions [`analyze_column`] and [`correlate`] take the table and
//! its numeric column set explicitly and have no side effects, so they can be
//! called repeatedly (or from several threads) over the same table.
//! [`SensorDataAnalyzer`] bundles a table, its classification and a
//! configuration for convenience.

mod correlation;
mod statistics;

use crate::config::{AlignmentStrategy, AnalyzerConfig};
use crate::error::{AnalysisError, Result};
use crate::loader::CsvLoader;
use crate::profiler::{ColumnProfile, ColumnProfiler, NumericColumnSet};
use crate::table::Table;
use crate::types::{ColumnAnalysis, CorrelationResult};
use std::path::Path;
use tracing::{debug, info};

/// Analyze one numeric column.
///
/// Statistics are computed over the cells that parse; quality labels, when a
/// companion quality column exists, are counted over every row.
pub fn analyze_column(
    table: &Table,
    numeric: &NumericColumnSet,
    column: &str,
    config: &AnalyzerConfig,
) -> Result<ColumnAnalysis> {
    if !numeric.contains(column) {
        return Err(AnalysisError::NotNumeric(column.to_string()));
    }

    let values = statistics::extract_values(table, column)?;
    debug!("Column '{}': {} valid value(s)", column, values.len());
    let basic_stats = statistics::calculate_basic_stats(column, &values)?;

    let quality_column = config.quality_column_for(column);
    let quality_stats = if table.has_header(&quality_column) {
        Some(statistics::quality_distribution(table, &quality_column)?)
    } else {
        None
    };

    Ok(ColumnAnalysis {
        column: column.to_string(),
        basic_stats,
        quality_stats,
    })
}

/// Pearson correlation between two numeric columns.
pub fn correlate(
    table: &Table,
    numeric: &NumericColumnSet,
    first: &str,
    second: &str,
    alignment: AlignmentStrategy,
) -> Result<CorrelationResult> {
    for column in [first, second] {
        if !numeric.contains(column) {
            return Err(AnalysisError::NotNumeric(column.to_string()));
        }
    }

    let (xs, ys) = correlation::aligned_values(table, first, second, alignment)?;
    debug!(
        "Correlating '{}' and '{}' over {} {} pair(s)",
        first,
        second,
        xs.len(),
        alignment.display_name()
    );
    let correlation = correlation::pearson(first, second, &xs, &ys)?;

    Ok(CorrelationResult {
        first: first.to_string(),
        second: second.to_string(),
        correlation,
        data_points_used: xs.len(),
        alignment,
    })
}

/// A loaded table together with its numeric classification.
///
/// Immutable after construction.
#[derive(Debug, Clone)]
pub struct SensorDataAnalyzer {
    table: Table,
    numeric: NumericColumnSet,
    config: AnalyzerConfig,
}

static_assertions::assert_impl_all!(SensorDataAnalyzer: Send, Sync);

impl SensorDataAnalyzer {
    /// Classify the columns of `table` and wrap it.
    pub fn new(table: Table, config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        let numeric = ColumnProfiler::classify(&table, &config);
        info!(
            "Found {} numeric column(s) out of {}",
            numeric.len(),
            table.column_count()
        );
        Ok(Self {
            table,
            numeric,
            config,
        })
    }

    /// Load a delimited file and classify it.
    pub fn from_path(path: impl AsRef<Path>, config: AnalyzerConfig) -> Result<Self> {
        let table = CsvLoader::new().load_path(path)?;
        Self::new(table, config)
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Header names in file order.
    pub fn headers(&self) -> &[String] {
        self.table.headers()
    }

    pub fn numeric_columns(&self) -> &NumericColumnSet {
        &self.numeric
    }

    /// Profiles of every distinct column.
    pub fn column_profiles(&self) -> Vec<ColumnProfile> {
        ColumnProfiler::profile_columns(&self.table, &self.config)
    }

    /// Analyze one numeric column.
    pub fn analyze_column(&self, column: &str) -> Result<ColumnAnalysis> {
        analyze_column(&self.table, &self.numeric, column, &self.config)
    }

    /// Correlate two numeric columns using the configured alignment.
    pub fn correlate(&self, first: &str, second: &str) -> Result<CorrelationResult> {
        correlate(
            &self.table,
            &self.numeric,
            first,
            second,
            self.config.alignment,
        )
    }

    /// Pairs of configured correlation parameters present as numeric
    /// columns, in configured order.
    pub fn correlation_pairs(&self) -> Vec<(&str, &str)> {
        let parameters: Vec<&str> = self
            .config
            .correlation_parameters
            .iter()
            .map(String::as_str)
            .filter(|p| self.numeric.contains(p))
            .collect();

        let mut pairs = Vec::new();
        for (i, first) in parameters.iter().enumerate() {
            for second in &parameters[i + 1..] {
                pairs.push((*first, *second));
            }
        }
        pairs
    }
}
