//! Column label normalization.

use crate::error::{CleaningError, Result};
use crate::table::Table;
use std::collections::HashMap;
use tracing::debug;

/// Canonical form of a column label: trimmed, lowercased, spaces to `_`.
///
/// ```rust,ignore
/// assert_eq!(normalize_column_name(" Product Name "), "product_name");
/// ```
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Rewrites every column label into its canonical form.
pub struct ColumnNormalizer;

impl ColumnNormalizer {
    /// Return a copy of `table` with normalized column names.
    ///
    /// Data, column order, and row order are unchanged. Two labels that
    /// normalize to the same name are not merged or renamed apart; the step
    /// fails with [`CleaningError::DuplicateColumn`].
    pub fn normalize(table: &Table) -> Result<Table> {
        let originals = table.column_names();
        let mut taken: HashMap<String, &str> = HashMap::with_capacity(originals.len());
        let mut normalized = Vec::with_capacity(originals.len());

        for original in &originals {
            let name = normalize_column_name(original);
            if taken.insert(name.clone(), original.as_str()).is_some() {
                return Err(CleaningError::DuplicateColumn {
                    original: original.clone(),
                    normalized: name,
                });
            }
            if &name != original {
                debug!("Renaming column '{}' -> '{}'", original, name);
            }
            normalized.push(name);
        }

        let mut frame = table.frame().clone();
        frame.set_column_names(normalized)?;
        Ok(Table::new(frame))
    }

    /// Pairs of `(original, normalized)` for labels that change.
    pub fn planned_renames(table: &Table) -> Vec<(String, String)> {
        table
            .column_names()
            .into_iter()
            .filter_map(|original| {
                let name = normalize_column_name(&original);
                (name != original).then_some((original, name))
            })
            .collect()
    }
}
