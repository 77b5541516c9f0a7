use crate::config::AlignmentStrategy;
use serde::{Deserialize, Serialize};

/// Descriptive statistics over the valid values of a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicStats {
    /// Number of cells that parsed as numbers.
    pub count: usize,
    pub mean: f64,
    /// Average of the two middle values for even counts.
    pub median: f64,
    /// Sample standard deviation (divisor n - 1).
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Occurrences of one quality label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityCount {
    pub label: String,
    pub count: usize,
}

/// Distribution of quality labels from a `"<Column> [quality]"` column.
///
/// Counted over every row of the table, including rows whose measurement
/// did not parse. Absent cells count under the empty label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityStats {
    /// Name of the quality column the labels were read from.
    pub quality_column: String,
    /// Label counts, most frequent first, ties ordered by label.
    pub distribution: Vec<QualityCount>,
}

impl QualityStats {
    /// Occurrences of `label`, if it was seen.
    pub fn count(&self, label: &str) -> Option<usize> {
        self.distribution
            .iter()
            .find(|q| q.label == label)
            .map(|q| q.count)
    }

    /// Total number of labels counted (equals the table's row count).
    pub fn total(&self) -> usize {
        self.distribution.iter().map(|q| q.count).sum()
    }
}

/// Result of analysing one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnAnalysis {
    pub column: String,
    pub basic_stats: BasicStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_stats: Option<QualityStats>,
}

/// Pearson correlation between two numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub first: String,
    pub second: String,
    pub correlation: f64,
    pub data_points_used: usize,
    /// How the two columns were paired.
    pub alignment: AlignmentStrategy,
}
