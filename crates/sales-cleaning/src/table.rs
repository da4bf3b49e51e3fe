//! The in-memory table that flows through the pipeline.
//!
//! [`Table`] is a thin owner of a polars [`DataFrame`]. Steps never mutate a
//! table they were handed; they take `&Table` and hand back a new one.
//! Cloning a `DataFrame` shares the column buffers, so this stays cheap.

use crate::error::{CleaningError, Result};
use polars::prelude::*;
use std::fmt;

/// Named, equal-length columns with a shared row order.
#[derive(Debug, Clone)]
pub struct Table {
    frame: DataFrame,
}

impl Table {
    /// Wrap an existing DataFrame.
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// Borrow the underlying DataFrame.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Whether the table has a column called `name`.
    ///
    /// Every step asks this before it touches a named column.
    pub fn has_column(&self, name: &str) -> bool {
        self.frame
            .get_column_names()
            .iter()
            .any(|col| col.as_str() == name)
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.frame.width()
    }

    /// Borrow a column as a Series, failing with `MissingColumn` if absent.
    pub fn series(&self, name: &str) -> Result<&Series> {
        if !self.has_column(name) {
            return Err(CleaningError::MissingColumn(name.to_string()));
        }
        Ok(self.frame.column(name)?.as_materialized_series())
    }

    /// Return a copy of this table with column `name` swapped for `series`.
    pub fn with_replaced(&self, name: &str, series: Series) -> Result<Table> {
        if !self.has_column(name) {
            return Err(CleaningError::MissingColumn(name.to_string()));
        }
        let mut frame = self.frame.clone();
        frame.replace(name, series)?;
        Ok(Table::new(frame))
    }

    /// The first `rows` rows, for display.
    pub fn preview(&self, rows: usize) -> DataFrame {
        self.frame.head(Some(rows))
    }

    /// Same column names, dtypes, and values (nulls compare equal).
    pub fn same_contents(&self, other: &Table) -> bool {
        self.frame.equals_missing(&other.frame)
    }
}

impl From<DataFrame> for Table {
    fn from(frame: DataFrame) -> Self {
        Table::new(frame)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.frame)
    }
}
