//! Sensor Data Analysis Library
//!
//! Descriptive statistics, quality-flag distributions and Pearson
//! correlations for delimited sensor measurement files, built on Polars.
//!
//! # Overview
//!
//! - **Loading**: bare delimiter split, trimmed fields, short rows tolerated
//! - **Classification**: a column is numeric when any cell parses under the
//!   invariant number format; quality, timestamp and record-number columns
//!   are excluded by name
//! - **Column Analysis**: count, mean, median, sample standard deviation,
//!   min and max over the valid cells, plus the distribution of labels in a
//!   companion `"<Column> [quality]"` column
//! - **Correlation**: Pearson coefficient between two numeric columns,
//!   paired positionally (default) or by row
//! - **Reporting**: one serializable report for a whole file
//!
//! # Quick Start
//!
//! ```rust
//! use sensor_analysis::{AnalyzerConfig, CsvLoader, SensorDataAnalyzer};
//!
//! let csv = "Timestamp,Temperature,pH\nt1,1,4\nt2,2,3\nt3,3,2\nt4,4,1\n";
//! let table = CsvLoader::new().parse_str(csv).unwrap();
//! let analyzer = SensorDataAnalyzer::new(table, AnalyzerConfig::default()).unwrap();
//!
//! let analysis = analyzer.analyze_column("Temperature").unwrap();
//! assert_eq!(analysis.basic_stats.count, 4);
//!
//! let correlation = analyzer.correlate("Temperature", "pH").unwrap();
//! assert!((correlation.correlation + 1.0).abs() < 1e-12);
//! assert_eq!(correlation.data_points_used, 4);
//! ```
//!
//! # Errors
//!
//! Every failure is a local [`AnalysisError`]: a column that is not numeric,
//! a column with fewer than two valid values, or a pair that cannot be
//! correlated. Reports record such failures per column or pair and carry on.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod loader;
pub mod profiler;
pub mod reporting;
pub mod table;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use analyzer::{SensorDataAnalyzer, analyze_column, correlate};
pub use config::{AlignmentStrategy, AnalyzerConfig, AnalyzerConfigBuilder, ConfigValidationError};
pub use error::{AnalysisError, Result as AnalysisResult, ResultExt};
pub use loader::CsvLoader;
pub use profiler::{ColumnKind, ColumnProfile, ColumnProfiler, NumericColumnSet};
pub use reporting::{AnalysisReport, ReportGenerator};
pub use table::Table;
pub use types::{BasicStats, ColumnAnalysis, CorrelationResult, QualityCount, QualityStats};
pub use utils::{is_numeric_cell, parse_invariant_f64};
