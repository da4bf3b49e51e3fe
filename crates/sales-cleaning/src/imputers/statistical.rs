//! Rule-driven repair of missing numeric values.
//!
//! Each [`FillRule`] names one column and how its gaps are filled. The
//! default rules cover exactly two columns: `price` (median) and `quantity`
//! (zero). Any column without a rule is never examined, even when it looks
//! numeric.

use crate::cleaner::coerce_to_numeric;
use crate::config::{FillRule, FillStrategy};
use crate::error::{CleaningError, Result};
use crate::table::Table;
use crate::types::RepairReport;
use crate::utils::fill_numeric_nulls;
use polars::prelude::*;
use tracing::debug;

/// Coerces rule columns to numbers and fills the gaps.
#[derive(Debug, Clone)]
pub struct MissingValueRepairer {
    rules: Vec<FillRule>,
}

impl Default for MissingValueRepairer {
    fn default() -> Self {
        Self::new(FillRule::sales_defaults())
    }
}

impl MissingValueRepairer {
    /// Create a repairer with explicit rules.
    pub fn new(rules: Vec<FillRule>) -> Self {
        Self { rules }
    }

    /// Return a repaired copy of `table`.
    pub fn repair(&self, table: &Table) -> Result<Table> {
        self.repair_with_report(table).map(|(table, _)| table)
    }

    /// Return a repaired copy of `table` plus one report per repaired column.
    ///
    /// For every rule whose column exists, values are coerced to Float64
    /// (failures become missing) and the missing values are filled. A column
    /// that is already integer-typed and has no gaps is left as is. Rules for
    /// absent columns are skipped.
    ///
    /// # Errors
    ///
    /// [`CleaningError::InsufficientData`] when a median rule meets a column
    /// that has gaps but no valid value to take the median of.
    pub fn repair_with_report(&self, table: &Table) -> Result<(Table, Vec<RepairReport>)> {
        let mut result = table.clone();
        let mut reports = Vec::new();

        for rule in &self.rules {
            if !result.has_column(&rule.column) {
                debug!("Fill rule column '{}' not present, skipping", rule.column);
                continue;
            }

            let original = result.series(&rule.column)?;
            let numeric = coerce_to_numeric(original)?;
            let missing = numeric.null_count();

            let fill_value = if missing == 0 {
                None
            } else {
                Some(Self::fill_value(&numeric, rule)?)
            };

            // An integer column with nothing to fill keeps its dtype.
            let repaired = match fill_value {
                Some(value) => fill_numeric_nulls(&numeric, value)?,
                None if original.dtype().is_integer() => original.clone(),
                None => numeric,
            };

            if let Some(value) = fill_value {
                debug!(
                    "Filled {} values in '{}' with {}: {:.2}",
                    missing,
                    rule.column,
                    rule.strategy.name(),
                    value
                );
            }

            result = result.with_replaced(&rule.column, repaired)?;
            reports.push(RepairReport {
                column: rule.column.clone(),
                strategy: rule.strategy.name().to_string(),
                fill_value,
                values_repaired: missing,
            });
        }

        Ok((result, reports))
    }

    /// Work out what a rule fills with, given the coerced column.
    fn fill_value(numeric: &Series, rule: &FillRule) -> Result<f64> {
        match rule.strategy {
            FillStrategy::Constant(value) => Ok(value),
            FillStrategy::Median => column_median(numeric)
                .ok_or_else(|| CleaningError::InsufficientData(rule.column.clone())),
        }
    }
}

/// Median of the non-null values, interpolating between the two middle
/// values when the count is even. `None` when every value is null.
pub fn column_median(series: &Series) -> Option<f64> {
    series.median()
}
