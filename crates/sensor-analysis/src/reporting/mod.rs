//! Report generation module.
//!
//! [`AnalysisReport`] gathers the analysis of every numeric column and every
//! configured correlation pair into one serializable value, suitable for:
//! - JSON output to stdout (`--json` CLI flag)
//! - JSON file output (`--emit-report` CLI flag)
//! - Programmatic access in library mode
//!
//! # Example
//!
//! ```rust,ignore
//! use sensor_analysis::reporting::ReportGenerator;
//!
//! let report = ReportGenerator::build_report("sensor_data.csv", &analyzer);
//! println!("{}", serde_json::to_string_pretty(&report)?);
//!
//! let generator = ReportGenerator::new(PathBuf::from("output"));
//! generator.write_report_to_file(&report, "sensor_data")?;
//! ```

mod generator;

pub use generator::{
    AnalysisReport, ColumnEntry, CorrelationEntry, ReportError, ReportGenerator,
    report_base_name,
};
