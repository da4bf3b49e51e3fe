//! Shared helpers for the cleaning steps.

use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

// =============================================================================
// String Parsing Utilities
// =============================================================================

/// Parse a cell as a number, the way a strict numeric coercion would.
///
/// Surrounding whitespace is ignored. Thousands separators, currency symbols
/// and the like are not stripped: `"$10"` is not a number. `NaN` counts as
/// missing.
///
/// # Example
///
/// ```rust,ignore
/// use sales_cleaning::utils::parse_numeric_string;
///
/// assert_eq!(parse_numeric_string(" 42 "), Some(42.0));
/// assert_eq!(parse_numeric_string("abc"), None);
/// ```
pub fn parse_numeric_string(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

// =============================================================================
// Series Transformation Utilities
// =============================================================================

/// Fill null values in a Float64 Series with a specific value.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let values: Vec<f64> = series
        .f64()?
        .into_iter()
        .map(|opt| opt.unwrap_or(fill_value))
        .collect();

    Ok(Series::new(series.name().clone(), values))
}
