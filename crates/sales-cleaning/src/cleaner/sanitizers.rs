//! Whitespace trimming for text columns.

use crate::config::MissingColumnPolicy;
use crate::error::{CleaningError, Result};
use crate::table::Table;
use polars::prelude::*;
use tracing::debug;

/// Strips leading and trailing whitespace from designated text columns.
pub struct TextTrimmer;

impl TextTrimmer {
    /// Return a copy of `table` where each column in `columns` is cast to
    /// text and trimmed.
    ///
    /// Columns outside `columns` are untouched. Null cells stay null. A
    /// designated column the table lacks is skipped under
    /// [`MissingColumnPolicy::Lenient`] and fails with
    /// [`CleaningError::MissingColumn`] under [`MissingColumnPolicy::Strict`].
    pub fn strip<S: AsRef<str>>(
        table: &Table,
        columns: &[S],
        policy: MissingColumnPolicy,
    ) -> Result<Table> {
        let mut result = table.clone();

        for col_name in columns {
            let col_name = col_name.as_ref();
            if !result.has_column(col_name) {
                match policy {
                    MissingColumnPolicy::Strict => {
                        return Err(CleaningError::MissingColumn(col_name.to_string()));
                    }
                    MissingColumnPolicy::Lenient => {
                        debug!("Text column '{}' not present, skipping", col_name);
                        continue;
                    }
                }
            }

            let (trimmed, changed) = trim_series(result.series(col_name)?)?;
            debug!("Trimmed {} values in '{}'", changed, col_name);
            result = result.with_replaced(col_name, trimmed)?;
        }

        Ok(result)
    }
}

/// Cast a series to String and trim every value.
///
/// Returns the new series and how many values actually changed.
pub(crate) fn trim_series(series: &Series) -> Result<(Series, usize)> {
    let as_text = series.cast(&DataType::String)?;
    let mut changed = 0;

    let values: Vec<Option<String>> = as_text
        .str()?
        .into_iter()
        .map(|opt| {
            opt.map(|val| {
                let trimmed = val.trim();
                if trimmed.len() != val.len() {
                    changed += 1;
                }
                trimmed.to_string()
            })
        })
        .collect();

    Ok((Series::new(series.name().clone(), values), changed))
}
