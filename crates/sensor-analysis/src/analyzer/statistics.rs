//! Statistical functions for column analysis.

use crate::error::{AnalysisError, Result};
use crate::table::Table;
use crate::types::{BasicStats, QualityCount, QualityStats};
use crate::utils::parse_invariant_f64;
use polars::prelude::*;
use std::collections::HashMap;

/// Parsed values of a column in row order; absent and unparseable cells are
/// skipped, never zero-filled.
pub(crate) fn extract_values(table: &Table, column: &str) -> Result<Vec<f64>> {
    Ok(table
        .cells(column)?
        .filter_map(|cell| cell.and_then(parse_invariant_f64))
        .collect())
}

/// Compute count, mean, median, sample standard deviation, min and max.
///
/// Fewer than two values is an [`AnalysisError::EmptyColumn`]: the sample
/// standard deviation is undefined below that.
pub(crate) fn calculate_basic_stats(column: &str, values: &[f64]) -> Result<BasicStats> {
    let count = values.len();
    let empty = || AnalysisError::EmptyColumn {
        column: column.to_string(),
        valid: count,
    };

    if count < 2 {
        return Err(empty());
    }

    let series = Series::new(column.into(), values);
    let min = series.min::<f64>()?.ok_or_else(empty)?;
    let max = series.max::<f64>()?.ok_or_else(empty)?;
    let (mean, variance) = running_mean_variance(values);

    Ok(BasicStats {
        count,
        mean: mean.clamp(min, max),
        median: series.median().ok_or_else(empty)?,
        std_dev: variance.max(0.0).sqrt(),
        min,
        max,
    })
}

/// Mean and sample variance by Welford's running update.
///
/// A constant sequence yields its value and exactly zero. Requires at least
/// two values.
fn running_mean_variance(values: &[f64]) -> (f64, f64) {
    let mut mean = 0.0;
    let mut m2 = 0.0;
    for (i, &x) in values.iter().enumerate() {
        let delta = x - mean;
        mean += delta / (i + 1) as f64;
        m2 += delta * (x - mean);
    }
    (mean, m2 / (values.len() - 1) as f64)
}

/// Count every raw label of a quality column over all rows.
pub(crate) fn quality_distribution(table: &Table, quality_column: &str) -> Result<QualityStats> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for cell in table.cells(quality_column)? {
        *counts.entry(cell.unwrap_or("")).or_insert(0) += 1;
    }

    let mut distribution: Vec<QualityCount> = counts
        .into_iter()
        .map(|(label, count)| QualityCount {
            label: label.to_string(),
            count,
        })
        .collect();
    distribution.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));

    Ok(QualityStats {
        quality_column: quality_column.to_string(),
        distribution,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::CsvLoader;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // ==================== calculate_basic_stats tests ====================

    #[test]
    fn test_basic_stats_reference_example() {
        let stats = calculate_basic_stats("Temperature", &[10.0, 20.0, 30.0]).unwrap();
        assert_eq!(stats.count, 3);
        assert!(approx(stats.mean, 20.0));
        assert!(approx(stats.median, 20.0));
        assert!(approx(stats.std_dev, 10.0));
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 30.0);
    }

    #[test]
    fn test_median_even_count_averages_middles() {
        let stats = calculate_basic_stats("v", &[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert!(approx(stats.median, 2.5));
    }

    #[test]
    fn test_sample_std_dev() {
        // Mean = 3, sum of squares = 10, sample variance = 10 / 4 = 2.5
        let stats = calculate_basic_stats("v", &[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!(approx(stats.std_dev, 2.5f64.sqrt()));
    }

    #[test]
    fn test_identical_values() {
        let stats = calculate_basic_stats("v", &[7.5; 6]).unwrap();
        assert_eq!(stats.count, 6);
        assert!(approx(stats.std_dev, 0.0));
        assert!(approx(stats.mean, 7.5));
        assert!(approx(stats.median, 7.5));
        assert_eq!(stats.min, 7.5);
        assert_eq!(stats.max, 7.5);
    }

    #[test]
    fn test_identical_inexact_values() {
        for value in [0.1, 7.1, 19.1] {
            for count in [3, 6, 7, 10] {
                let values = vec![value; count];
                let stats = calculate_basic_stats("v", &values).unwrap();
                assert_eq!(stats.count, count);
                assert_eq!(stats.mean, value, "{value} x {count}: mean");
                assert_eq!(stats.median, value, "{value} x {count}: median");
                assert_eq!(stats.std_dev, 0.0, "{value} x {count}: std dev");
                assert_eq!(stats.min, value);
                assert_eq!(stats.max, value);
            }
        }
    }

    #[test]
    fn test_mean_within_bounds_for_inexact_values() {
        let values = [7.1, 7.1, 7.1, 7.1, 7.1, 7.1, 7.1, 0.1, 19.1, 0.7];
        let stats = calculate_basic_stats("v", &values).unwrap();
        assert!(stats.min <= stats.mean && stats.mean <= stats.max);
        assert!(stats.std_dev > 0.0);

        let expected_mean = values.iter().sum::<f64>() / values.len() as f64;
        assert!(approx(stats.mean, expected_mean));
    }

    #[test]
    fn test_running_variance_matches_two_pass() {
        let values = [19.1, 18.2, 20.1, 19.5, 18.9];
        let (mean, variance) = running_mean_variance(&values);

        let two_pass_mean = values.iter().sum::<f64>() / 5.0;
        let two_pass_variance =
            values.iter().map(|v| (v - two_pass_mean).powi(2)).sum::<f64>() / 4.0;
        assert!(approx(mean, two_pass_mean));
        assert!(approx(variance, two_pass_variance));
    }

    #[test]
    fn test_empty_values_is_error() {
        let err = calculate_basic_stats("v", &[]).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyColumn { valid: 0, .. }));
    }

    #[test]
    fn test_single_value_is_error() {
        let err = calculate_basic_stats("v", &[1.0]).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyColumn { valid: 1, .. }));
    }

    // ==================== extract_values tests ====================

    #[test]
    fn test_extract_skips_invalid_cells() {
        let table = CsvLoader::new()
            .parse_str("a,b\n1,x\nbad,x\n,x\n2.5\n1e1,x")
            .unwrap();
        let values = extract_values(&table, "a").unwrap();
        assert_eq!(values, vec![1.0, 2.5, 10.0]);
    }

    // ==================== quality_distribution tests ====================

    #[test]
    fn test_quality_distribution_counts_all_rows() {
        let table = CsvLoader::new()
            .parse_str("DO,DO [quality]\n5.1,Good\nbad,Good\n,Bad")
            .unwrap();
        let stats = quality_distribution(&table, "DO [quality]").unwrap();

        assert_eq!(stats.count("Good"), Some(2));
        assert_eq!(stats.count("Bad"), Some(1));
        assert_eq!(stats.total(), 3);
        assert_eq!(stats.distribution[0].label, "Good");
    }

    #[test]
    fn test_quality_distribution_empty_and_absent_labels() {
        let table = CsvLoader::new()
            .parse_str("DO,DO [quality]\n5.1,\n5.2\n5.3,Good")
            .unwrap();
        let stats = quality_distribution(&table, "DO [quality]").unwrap();

        assert_eq!(stats.count(""), Some(2));
        assert_eq!(stats.count("Good"), Some(1));
    }

    #[test]
    fn test_quality_distribution_ties_ordered_by_label() {
        let table = CsvLoader::new()
            .parse_str("q\nSuspect\nBad\nGood")
            .unwrap();
        let stats = quality_distribution(&table, "q").unwrap();
        let labels: Vec<&str> = stats.distribution.iter().map(|q| q.label.as_str()).collect();
        assert_eq!(labels, vec!["Bad", "Good", "Suspect"]);
    }
}
