//! Row validation against non-negativity constraints.

use super::converters::coerce_to_numeric;
use crate::config::{PRICE_COLUMN, QUANTITY_COLUMN};
use crate::error::Result;
use crate::table::Table;
use polars::prelude::*;
use tracing::debug;

/// Drops rows whose designated numeric columns hold negative values.
#[derive(Debug, Clone)]
pub struct RowValidator {
    non_negative_columns: Vec<String>,
}

impl Default for RowValidator {
    fn default() -> Self {
        Self::new([PRICE_COLUMN, QUANTITY_COLUMN])
    }
}

impl RowValidator {
    /// Create a validator for the given columns.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            non_negative_columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Keep only rows where every checked column that exists is `>= 0`.
    ///
    /// Columns the table lacks are ignored; with none present every row is
    /// kept. Values are coerced to numbers first, and a value that is missing
    /// or unparseable does not satisfy the predicate. Surviving rows keep
    /// their relative order.
    pub fn validate(&self, table: &Table) -> Result<Table> {
        let mut keep = vec![true; table.height()];
        let mut checked = 0;

        for col_name in &self.non_negative_columns {
            if !table.has_column(col_name) {
                continue;
            }
            checked += 1;

            let numeric = coerce_to_numeric(table.series(col_name)?)?;
            for (flag, value) in keep.iter_mut().zip(numeric.f64()?.into_iter()) {
                *flag = *flag && value.is_some_and(|v| v >= 0.0);
            }
        }

        if checked == 0 {
            debug!("No non-negative columns present, keeping all rows");
            return Ok(table.clone());
        }

        let mask = BooleanChunked::from_slice("mask".into(), &keep);
        let frame = table.frame().filter(&mask)?;

        let removed = table.height() - frame.height();
        if removed > 0 {
            debug!("Removed {} rows with negative values", removed);
        }

        Ok(Table::new(frame))
    }
}
