//! Configuration types for sensor data analysis.
//!
//! This module provides configuration options using the builder pattern.
//! The defaults reproduce the classic water-quality report: `Timestamp` and
//! `Record number` are never numeric, quality flags live in
//! `"<Column> [quality]"` columns, and correlations are computed between
//! temperature, dissolved oxygen, pH and chlorophyll.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default marker identifying quality-flag columns.
pub const DEFAULT_QUALITY_MARKER: &str = "[quality]";

/// Columns that are never considered numeric, regardless of content.
pub const DEFAULT_EXCLUDED_COLUMNS: [&str; 2] = ["Timestamp", "Record number"];

/// Key parameters correlated pairwise by default.
pub const DEFAULT_CORRELATION_PARAMETERS: [&str; 4] =
    ["Temperature", "Dissolved Oxygen", "pH", "Chlorophyll"];

/// How two columns are paired up before computing a correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AlignmentStrategy {
    /// Compact each column independently, then truncate both to the shorter
    /// length. Values are paired by position, not by row.
    #[default]
    Positional,
    /// Keep a row only if both cells parse. Values are paired by row.
    RowAligned,
}

impl AlignmentStrategy {
    /// Human-readable name for reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Positional => "positional",
            Self::RowAligned => "row-aligned",
        }
    }
}

/// Configuration for the analyzer.
///
/// Use [`AnalyzerConfig::builder()`] to create a configuration with a
/// fluent API, or [`AnalyzerConfig::from_json_file`] to load one from disk.
///
/// # Example
///
/// ```rust
/// use sensor_analysis::config::{AlignmentStrategy, AnalyzerConfig};
///
/// let config = AnalyzerConfig::builder()
///     .correlation_parameters(["Temperature", "pH"])
///     .alignment(AlignmentStrategy::RowAligned)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.correlation_parameters.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Header names that are never classified as numeric.
    /// Default: `["Timestamp", "Record number"]`
    pub excluded_columns: Vec<String>,

    /// Marker identifying quality-flag columns. Headers containing it are
    /// never numeric, and the quality column for `X` is named `"X <marker>"`.
    /// Default: `"[quality]"`
    pub quality_marker: String,

    /// Parameters correlated pairwise in reports, in this order.
    /// Parameters that are not numeric in a given table are skipped.
    /// Default: Temperature, Dissolved Oxygen, pH, Chlorophyll
    pub correlation_parameters: Vec<String>,

    /// Pairing strategy used for correlations.
    /// Default: Positional
    pub alignment: AlignmentStrategy,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            excluded_columns: DEFAULT_EXCLUDED_COLUMNS.map(String::from).to_vec(),
            quality_marker: DEFAULT_QUALITY_MARKER.to_string(),
            correlation_parameters: DEFAULT_CORRELATION_PARAMETERS.map(String::from).to_vec(),
            alignment: AlignmentStrategy::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder::default()
    }

    /// Load and validate a configuration from a JSON file.
    ///
    /// Missing fields take their default values.
    pub fn from_json_file(path: impl AsRef<Path>) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AnalyzerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Name of the quality column paired with `column`.
    pub fn quality_column_for(&self, column: &str) -> String {
        format!("{} {}", column, self.quality_marker)
    }

    /// Whether `header` is excluded from numeric classification.
    pub fn is_excluded(&self, header: &str) -> bool {
        header.contains(self.quality_marker.as_str())
            || self.excluded_columns.iter().any(|c| c == header)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.quality_marker.trim().is_empty() {
            return Err(ConfigValidationError::EmptyQualityMarker);
        }

        if let Some(dup) = first_duplicate(&self.correlation_parameters) {
            return Err(ConfigValidationError::DuplicateParameter(dup.to_string()));
        }

        Ok(())
    }
}

fn first_duplicate(values: &[String]) -> Option<&str> {
    values
        .iter()
        .enumerate()
        .find(|(i, v)| values[..*i].contains(v))
        .map(|(_, v)| v.as_str())
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Quality marker must not be empty")]
    EmptyQualityMarker,

    #[error("Correlation parameter '{0}' is listed more than once")]
    DuplicateParameter(String),
}

/// Builder for [`AnalyzerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalyzerConfigBuilder {
    excluded_columns: Option<Vec<String>>,
    quality_marker: Option<String>,
    correlation_parameters: Option<Vec<String>>,
    alignment: Option<AlignmentStrategy>,
}

impl AnalyzerConfigBuilder {
    /// Replace the list of header names excluded from numeric classification.
    pub fn excluded_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the marker identifying quality-flag columns.
    pub fn quality_marker(mut self, marker: impl Into<String>) -> Self {
        self.quality_marker = Some(marker.into());
        self
    }

    /// Set the parameters correlated pairwise in reports.
    pub fn correlation_parameters<I, S>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.correlation_parameters = Some(parameters.into_iter().map(Into::into).collect());
        self
    }

    /// Set the correlation pairing strategy.
    pub fn alignment(mut self, alignment: AlignmentStrategy) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalyzerConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalyzerConfig, ConfigValidationError> {
        let defaults = AnalyzerConfig::default();
        let config = AnalyzerConfig {
            excluded_columns: self.excluded_columns.unwrap_or(defaults.excluded_columns),
            quality_marker: self.quality_marker.unwrap_or(defaults.quality_marker),
            correlation_parameters: self
                .correlation_parameters
                .unwrap_or(defaults.correlation_parameters),
            alignment: self.alignment.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}
