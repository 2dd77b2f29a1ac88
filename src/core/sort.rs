//! Comparators used by the projects table

use std::cmp::Ordering;

fn coerce(value: Option<f64>) -> f64 {
    match value {
        Some(v) if !v.is_nan() => v,
        _ => 0.0,
    }
}

/// Orders two numeric cells. Missing and NaN values count as `0.0`, so a
/// missing value ties with a literal zero.
pub fn numeric_compare(a: Option<f64>, b: Option<f64>) -> Ordering {
    coerce(a)
        .partial_cmp(&coerce(b))
        .unwrap_or(Ordering::Equal)
}

/// `false` sorts before `true`.
pub fn boolean_compare(a: bool, b: bool) -> Ordering {
    a.cmp(&b)
}

/// Comparator for loosely typed values: missing values become `0.0` but NaN
/// is left alone and ties with everything.
pub fn coerced_compare(a: Option<f64>, b: Option<f64>) -> Ordering {
    let a = a.unwrap_or(0.0);
    let b = b.unwrap_or(0.0);
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Case-insensitive ordering of names and tickers.
pub fn text_compare(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}
