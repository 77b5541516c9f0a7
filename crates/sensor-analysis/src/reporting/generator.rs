use crate::analyzer::SensorDataAnalyzer;
use crate::error::{AnalysisError, Result};
use crate::profiler::ColumnProfile;
use crate::types::{ColumnAnalysis, CorrelationResult};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

// ============================================================================
// Report Types
// ============================================================================

/// Full analysis of a sensor file: every numeric column and every
/// configured correlation pair.
///
/// Use this for both JSON output (`--json`) and file writing (`--emit-report`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path of the analysed file
    pub source: String,
    /// Number of data rows
    pub row_count: usize,
    /// Header names in file order
    pub headers: Vec<String>,
    /// Columns classified as numeric
    pub numeric_columns: Vec<String>,
    /// Profile of every distinct column
    pub column_profiles: Vec<ColumnProfile>,
    /// Pairing strategy used for correlations
    pub alignment: String,
    /// One entry per numeric column, in header order
    pub columns: Vec<ColumnEntry>,
    /// One entry per correlation pair, in configured order
    pub correlations: Vec<CorrelationEntry>,
}

/// Outcome of analysing one column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnEntry {
    pub column: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<ColumnAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ReportError>,
}

/// Outcome of correlating one column pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationEntry {
    pub first: String,
    pub second: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<CorrelationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ReportError>,
}

/// Serialized form of an [`AnalysisError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportError {
    pub code: String,
    pub message: String,
}

impl From<&AnalysisError> for ReportError {
    fn from(e: &AnalysisError) -> Self {
        Self {
            code: e.error_code().to_string(),
            message: e.to_string(),
        }
    }
}

impl AnalysisReport {
    /// Number of column or pair entries that failed.
    pub fn failure_count(&self) -> usize {
        self.columns.iter().filter(|c| c.error.is_some()).count()
            + self.correlations.iter().filter(|c| c.error.is_some()).count()
    }
}

// ============================================================================
// Report Generator
// ============================================================================

/// Builds and writes [`AnalysisReport`]s.
pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl ReportGenerator {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Analyze every numeric column and every correlation pair.
    ///
    /// A failing column or pair is recorded with its error; the others are
    /// still analysed.
    pub fn build_report(source: &str, analyzer: &SensorDataAnalyzer) -> AnalysisReport {
        let columns = analyzer
            .numeric_columns()
            .iter()
            .map(|column| match analyzer.analyze_column(column) {
                Ok(analysis) => ColumnEntry {
                    column: column.to_string(),
                    analysis: Some(analysis),
                    error: None,
                },
                Err(e) => {
                    warn!("Skipping column '{}': {}", column, e);
                    ColumnEntry {
                        column: column.to_string(),
                        analysis: None,
                        error: Some(ReportError::from(&e)),
                    }
                }
            })
            .collect();

        let correlations = analyzer
            .correlation_pairs()
            .into_iter()
            .map(|(first, second)| {
                let (result, error) = match analyzer.correlate(first, second) {
                    Ok(result) => (Some(result), None),
                    Err(e) => {
                        warn!("Skipping correlation '{}' vs '{}': {}", first, second, e);
                        (None, Some(ReportError::from(&e)))
                    }
                };
                CorrelationEntry {
                    first: first.to_string(),
                    second: second.to_string(),
                    result,
                    error,
                }
            })
            .collect();

        AnalysisReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            source: source.to_string(),
            row_count: analyzer.table().row_count(),
            headers: analyzer.headers().to_vec(),
            numeric_columns: analyzer.numeric_columns().as_slice().to_vec(),
            column_profiles: analyzer.column_profiles(),
            alignment: analyzer.config().alignment.display_name().to_string(),
            columns,
            correlations,
        }
    }

    /// Write the report as pretty JSON to `<output_dir>/<base_name>_report.json`.
    pub fn write_report_to_file(&self, report: &AnalysisReport, base_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let report_path = self.output_dir.join(format!("{}_report.json", base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}

/// File stem of `path`, used as the default report base name.
pub fn report_base_name(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("sensor_data")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyzerConfig;
    use crate::loader::CsvLoader;

    const CSV: &str = "\
Timestamp,Temperature,Temperature [quality],pH,Dissolved Oxygen,Site
t1,10,Good,7.0,8.0,North
t2,20,Good,7.5,,North
t3,30,Bad,8.0,,South";

    fn report() -> AnalysisReport {
        let table = CsvLoader::new().parse_str(CSV).unwrap();
        let analyzer = SensorDataAnalyzer::new(table, AnalyzerConfig::default()).unwrap();
        ReportGenerator::build_report("memory.csv", &analyzer)
    }

    #[test]
    fn test_report_covers_numeric_columns() {
        let report = report();
        assert_eq!(report.row_count, 3);
        assert_eq!(
            report.numeric_columns,
            vec!["Temperature", "pH", "Dissolved Oxygen"]
        );
        assert_eq!(report.columns.len(), 3);

        let temperature = report.columns[0].analysis.as_ref().unwrap();
        assert_eq!(temperature.basic_stats.count, 3);
        let quality = temperature.quality_stats.as_ref().unwrap();
        assert_eq!(quality.count("Good"), Some(2));
    }

    #[test]
    fn test_report_records_failures_and_continues() {
        let report = report();

        // Dissolved Oxygen has a single valid value.
        let dissolved = &report.columns[2];
        assert!(dissolved.analysis.is_none());
        assert_eq!(dissolved.error.as_ref().unwrap().code, "EMPTY_COLUMN");

        // Temperature/DO, Temperature/pH, DO/pH in configured order.
        let pairs: Vec<(&str, &str)> = report
            .correlations
            .iter()
            .map(|c| (c.first.as_str(), c.second.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Temperature", "Dissolved Oxygen"),
                ("Temperature", "pH"),
                ("Dissolved Oxygen", "pH"),
            ]
        );
        assert!(report.correlations[0].error.is_some());
        assert!(report.correlations[1].result.is_some());
        assert_eq!(report.failure_count(), 3);
    }

    #[test]
    fn test_report_serializes_errors_without_empty_fields() {
        let json = serde_json::to_string(&report()).unwrap();
        assert!(json.contains("\"code\":\"EMPTY_COLUMN\""));
        assert!(json.contains("\"alignment\":\"positional\""));
    }

    #[test]
    fn test_report_base_name() {
        assert_eq!(report_base_name("data/sensor_2024.csv"), "sensor_2024");
        assert_eq!(report_base_name(""), "sensor_data");
    }
}
