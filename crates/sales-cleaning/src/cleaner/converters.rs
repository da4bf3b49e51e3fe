//! Best-effort numeric coercion.

use crate::error::Result;
use crate::utils::{is_numeric_dtype, parse_numeric_string};
use polars::prelude::*;

/// Coerce a column to Float64.
///
/// Values that cannot be read as a number become null instead of raising.
/// NaN is treated as missing too, so downstream steps only ever see nulls.
pub(crate) fn coerce_to_numeric(series: &Series) -> Result<Series> {
    let as_float = if is_numeric_dtype(series.dtype()) || series.dtype() == &DataType::Boolean {
        series.cast(&DataType::Float64)?
    } else {
        let as_text = series.cast(&DataType::String)?;
        let values: Vec<Option<f64>> = as_text
            .str()?
            .into_iter()
            .map(|opt| opt.and_then(parse_numeric_string))
            .collect();
        Series::new(series.name().clone(), values)
    };

    let values: Vec<Option<f64>> = as_float
        .f64()?
        .into_iter()
        .map(|opt| opt.filter(|v| !v.is_nan()))
        .collect();

    Ok(Series::new(series.name().clone(), values))
}
