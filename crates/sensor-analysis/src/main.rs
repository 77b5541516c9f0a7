//! CLI entry point for sensor data analysis.

use anyhow::{Context, Result};
use clap::Parser;
use sensor_analysis::reporting::{AnalysisReport, ReportGenerator, report_base_name};
use sensor_analysis::{AlignmentStrategy, AnalysisError, AnalyzerConfig, SensorDataAnalyzer};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Water quality sensor data analysis",
    long_about = "Descriptive statistics, quality distributions and correlations for sensor CSV files.\n\n\
                  EXAMPLES:\n  \
                  # Analyze sensor_data.csv in the current directory\n  \
                  sensor-analysis\n\n  \
                  # Correlate a custom set of parameters, pairing values by row\n  \
                  sensor-analysis data.csv --parameters Temperature,Turbidity --row-aligned\n\n  \
                  # Machine-readable output\n  \
                  sensor-analysis data.csv --json | jq .correlations"
)]
struct Args {
    /// Path to the CSV file to analyze
    #[arg(default_value = "sensor_data.csv")]
    input: String,

    /// JSON configuration file (missing fields take defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Parameters to correlate pairwise, comma-separated
    #[arg(short, long, value_delimiter = ',')]
    parameters: Option<Vec<String>>,

    /// Pair correlation values by row instead of by position
    #[arg(long)]
    row_aligned: bool,

    /// Output JSON to stdout instead of the human-readable summary
    ///
    /// Disables all logging; only the report is written to stdout.
    #[arg(long)]
    json: bool,

    /// Write a JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Output directory for reports
    #[arg(short, long, default_value = "./outputs")]
    output: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and results)
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is disabled so stdout only carries
/// the JSON report.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = build_config(&args)?;

    let analyzer = match SensorDataAnalyzer::from_path(&args.input, config) {
        Ok(analyzer) => analyzer,
        Err(AnalysisError::FileNotFound(path)) => {
            anyhow::bail!("CSV file not found: {}. Please check the file path.", path)
        }
        Err(e) => return Err(e).context(format!("Failed to load {}", args.input)),
    };

    let report = ReportGenerator::build_report(&args.input, &analyzer);

    if args.emit_report {
        let generator = ReportGenerator::new(args.output.clone());
        let path = generator.write_report_to_file(&report, &report_base_name(&args.input))?;
        info!("Report written to: {}", path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_human_readable_summary(&report);
    Ok(())
}

/// Merge the configuration file (if any) with command-line overrides.
fn build_config(args: &Args) -> Result<AnalyzerConfig> {
    let base = match &args.config {
        Some(path) => AnalyzerConfig::from_json_file(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };

    let mut builder = AnalyzerConfig::builder()
        .excluded_columns(base.excluded_columns)
        .quality_marker(base.quality_marker)
        .correlation_parameters(
            args.parameters
                .clone()
                .unwrap_or(base.correlation_parameters),
        )
        .alignment(base.alignment);

    if args.row_aligned {
        builder = builder.alignment(AlignmentStrategy::RowAligned);
    }

    Ok(builder.build()?)
}

/// Print the report in the classic console layout.
///
/// Uses `println!` intentionally: this is the program's output, not logging.
fn print_human_readable_summary(report: &AnalysisReport) {
    println!("Water Quality Data Analysis Tool");
    println!("{}\n", "-".repeat(30));
    println!("Analyzing data from: {}\n", report.source);

    println!("Found numeric columns:");
    println!("{}", report.numeric_columns.join(", "));
    println!();

    for entry in &report.columns {
        println!("\nAnalyzing {}:", entry.column);
        println!("{}", "-".repeat(entry.column.chars().count() + 10));

        if let Some(error) = &entry.error {
            println!("Error: {}", error.message);
            continue;
        }
        let Some(analysis) = &entry.analysis else {
            continue;
        };

        let stats = &analysis.basic_stats;
        println!("Basic Statistics:");
        println!("Count: {}", stats.count);
        println!("Mean: {}", stats.mean);
        println!("Median: {}", stats.median);
        println!("StdDev: {}", stats.std_dev);
        println!("Min: {}", stats.min);
        println!("Max: {}", stats.max);

        if let Some(quality) = &analysis.quality_stats {
            println!("\nQuality Distribution:");
            for q in &quality.distribution {
                println!("{}: {} measurements", q.label, q.count);
            }
        }
    }

    println!("\nCorrelation Analysis:");
    println!("{}", "-".repeat(20));

    for entry in &report.correlations {
        println!("\n{} vs {}:", entry.first, entry.second);
        match (&entry.result, &entry.error) {
            (Some(result), _) => {
                println!("Correlation: {}", result.correlation);
                println!("DataPointsUsed: {}", result.data_points_used);
            }
            (None, Some(error)) => println!("Error: {}", error.message),
            (None, None) => {}
        }
    }

    if report.alignment != AlignmentStrategy::Positional.display_name() {
        println!("\n(correlations paired {})", report.alignment);
    }
}
