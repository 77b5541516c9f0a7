//! Pairing of column values and Pearson correlation.

use crate::config::AlignmentStrategy;
use crate::error::{AnalysisError, Result};
use crate::table::Table;
use crate::utils::parse_invariant_f64;

use super::statistics::extract_values;

/// Build the two equal-length sequences that get correlated.
///
/// `Positional` compacts each column on its own and truncates both to the
/// shorter length, so the i-th pair may come from different rows when the
/// columns have invalid cells in different places. `RowAligned` keeps a row
/// only when both of its cells parse.
pub(crate) fn aligned_values(
    table: &Table,
    first: &str,
    second: &str,
    alignment: AlignmentStrategy,
) -> Result<(Vec<f64>, Vec<f64>)> {
    match alignment {
        AlignmentStrategy::Positional => {
            let mut xs = extract_values(table, first)?;
            let mut ys = extract_values(table, second)?;
            let n = xs.len().min(ys.len());
            xs.truncate(n);
            ys.truncate(n);
            Ok((xs, ys))
        }
        AlignmentStrategy::RowAligned => Ok(table
            .cells(first)?
            .zip(table.cells(second)?)
            .filter_map(|(a, b)| {
                let x = a.and_then(parse_invariant_f64)?;
                let y = b.and_then(parse_invariant_f64)?;
                Some((x, y))
            })
            .unzip()),
    }
}

/// Pearson correlation coefficient of two equal-length sequences.
///
/// Fewer than two points, or a sequence with zero variance, is an
/// [`AnalysisError::InsufficientData`] rather than a NaN.
pub(crate) fn pearson(first: &str, second: &str, xs: &[f64], ys: &[f64]) -> Result<f64> {
    let insufficient = |reason: String| AnalysisError::InsufficientData {
        first: first.to_string(),
        second: second.to_string(),
        reason,
    };

    let n = xs.len().min(ys.len());
    if n < 2 {
        return Err(insufficient(format!(
            "{} aligned data point(s), at least 2 are required",
            n
        )));
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);

    for (name, values) in [(first, xs), (second, ys)] {
        if values.iter().all(|&v| v == values[0]) {
            return Err(insufficient(format!("'{}' has zero variance", name)));
        }
    }

    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let denominator = (sxx * syy).sqrt();
    if !(denominator > 0.0 && denominator.is_finite()) {
        return Err(insufficient(
            "variance is outside the representable range".to_string(),
        ));
    }

    Ok((sxy / denominator).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::CsvLoader;

    // ==================== pearson tests ====================

    #[test]
    fn test_pearson_perfect_negative() {
        let r = pearson("a", "b", &[1.0, 2.0, 3.0, 4.0], &[4.0, 3.0, 2.0, 1.0]).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_perfect_positive() {
        let r = pearson("a", "b", &[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_uncorrelated() {
        let r = pearson("a", "b", &[1.0, 2.0, 3.0, 4.0], &[1.0, -1.0, -1.0, 1.0]).unwrap();
        assert!(r.abs() < 1e-12);
    }

    #[test]
    fn test_pearson_single_point() {
        let err = pearson("a", "b", &[1.0], &[2.0]).unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData { .. }));
    }

    #[test]
    fn test_pearson_zero_variance() {
        let err = pearson("a", "b", &[1.0, 2.0, 3.0], &[5.0, 5.0, 5.0]).unwrap_err();
        assert!(err.to_string().contains("'b' has zero variance"));
    }

    #[test]
    fn test_pearson_inexact_constant_is_zero_variance() {
        let varying = [1.0, 2.5, 3.0, 4.5, 5.0, 7.5, 8.0, 9.5, 10.0, 12.0];
        for value in [0.1, 7.1, 0.7, 19.1] {
            for n in [3, 6, 7, 10] {
                let constant = vec![value; n];

                let err = pearson("a", "b", &constant, &varying[..n]).unwrap_err();
                assert!(
                    err.to_string().contains("'a' has zero variance"),
                    "{value} x {n}: {err}"
                );

                let err = pearson("a", "b", &varying[..n], &constant).unwrap_err();
                assert!(
                    err.to_string().contains("'b' has zero variance"),
                    "{value} x {n}: {err}"
                );
            }
        }
    }

    #[test]
    fn test_pearson_underflowing_variance() {
        let err = pearson("a", "b", &[1e-200, 2e-200, 3e-200], &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData { .. }));
    }

    // ==================== aligned_values tests ====================

    const MISALIGNED: &str = "a,b\n1,10\nx,20\n3,y\n4,40";

    #[test]
    fn test_positional_alignment_compacts_independently() {
        let table = CsvLoader::new().parse_str(MISALIGNED).unwrap();
        let (xs, ys) =
            aligned_values(&table, "a", "b", AlignmentStrategy::Positional).unwrap();
        assert_eq!(xs, vec![1.0, 3.0, 4.0]);
        assert_eq!(ys, vec![10.0, 20.0, 40.0]);
    }

    #[test]
    fn test_positional_alignment_truncates_to_shorter() {
        let table = CsvLoader::new().parse_str("a,b\n1,1\n2,\n3,").unwrap();
        let (xs, ys) =
            aligned_values(&table, "a", "b", AlignmentStrategy::Positional).unwrap();
        assert_eq!(xs, vec![1.0]);
        assert_eq!(ys, vec![1.0]);
    }

    #[test]
    fn test_row_alignment_requires_both_cells() {
        let table = CsvLoader::new().parse_str(MISALIGNED).unwrap();
        let (xs, ys) =
            aligned_values(&table, "a", "b", AlignmentStrategy::RowAligned).unwrap();
        assert_eq!(xs, vec![1.0, 4.0]);
        assert_eq!(ys, vec![10.0, 40.0]);
    }
}
