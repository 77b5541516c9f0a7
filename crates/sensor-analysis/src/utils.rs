//! Shared utilities for sensor data analysis.
//!
//! Cell values arrive as raw strings; everything numeric in this crate goes
//! through [`parse_invariant_f64`] so that classification and extraction can
//! never disagree about what counts as a number.

use once_cell::sync::Lazy;
use regex::Regex;

// =============================================================================
// Invariant Number Parsing
// =============================================================================

/// Invariant currency sign, accepted around a number and ignored.
pub const CURRENCY_SIGN: char = '¤';

// A digit followed by digits and `,` separators, optional fraction, optional
// exponent. A bare fraction (`.5`) is also allowed.
static INVARIANT_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\d[\d,]*(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?$")
        .expect("Invalid regex: invariant number")
});

/// Parse a cell as a finite `f64` using the culture-invariant number format.
///
/// Accepts surrounding whitespace, a leading or trailing sign, parentheses
/// for negatives, the invariant currency sign, `,` thousands separators, a
/// `.` decimal point and an exponent. Group sizes are not checked: any `,`
/// after the first integer digit is skipped, so `1,23` reads as 123. Commas
/// after the decimal point, spaces and `.` grouping are rejected, as are
/// empty cells and non-finite values (`NaN`, `Infinity`, overflow).
///
/// # Example
///
/// ```rust
/// use sensor_analysis::utils::parse_invariant_f64;
///
/// assert_eq!(parse_invariant_f64(" 12.5 "), Some(12.5));
/// assert_eq!(parse_invariant_f64("1,234.5"), Some(1234.5));
/// assert_eq!(parse_invariant_f64("(3)"), Some(-3.0));
/// assert_eq!(parse_invariant_f64("2.5E-1"), Some(0.25));
/// assert_eq!(parse_invariant_f64("1.234,5"), None);
/// assert_eq!(parse_invariant_f64("NaN"), None);
/// ```
pub fn parse_invariant_f64(s: &str) -> Option<f64> {
    let mut body = s.trim();
    if body.is_empty() {
        return None;
    }

    let mut negative = false;
    if let Some(inner) = body.strip_prefix('(').and_then(|b| b.strip_suffix(')')) {
        negative = true;
        body = inner.trim();
    }

    body = strip_currency(body);

    if let Some(rest) = body.strip_prefix('-') {
        if negative {
            return None;
        }
        negative = true;
        body = rest;
    } else if let Some(rest) = body.strip_prefix('+') {
        body = rest;
    } else if let Some(rest) = body.strip_suffix('-') {
        if negative {
            return None;
        }
        negative = true;
        body = rest;
    } else if let Some(rest) = body.strip_suffix('+') {
        body = rest;
    }

    body = strip_currency(body.trim());

    if !INVARIANT_NUMBER.is_match(body) {
        return None;
    }

    let value: f64 = body.replace(',', "").parse().ok()?;
    if !value.is_finite() {
        return None;
    }

    Some(if negative { -value } else { value })
}

fn strip_currency(s: &str) -> &str {
    s.strip_prefix(CURRENCY_SIGN)
        .or_else(|| s.strip_suffix(CURRENCY_SIGN))
        .map(str::trim)
        .unwrap_or(s)
}

/// Check if a cell holds a number under the invariant format.
pub fn is_numeric_cell(s: &str) -> bool {
    parse_invariant_f64(s).is_some()
}

// =============================================================================
// Header Utilities
// =============================================================================

/// Find header names that occur more than once, in first-repeat order.
pub fn duplicate_headers(headers: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut duplicates = Vec::new();
    for header in headers {
        if !seen.insert(header.as_str()) && !duplicates.contains(header) {
            duplicates.push(header.clone());
        }
    }
    duplicates
}
