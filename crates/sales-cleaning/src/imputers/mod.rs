//! Imputation module for repairing missing numeric values.

mod statistical;

pub use statistical::{MissingValueRepairer, column_median};
