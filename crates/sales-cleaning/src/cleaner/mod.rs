//! Table cleaning steps.
//!
//! This module provides:
//! - Column label normalization ([`ColumnNormalizer`])
//! - Whitespace trimming for text columns ([`TextTrimmer`])
//! - Row validation against non-negativity constraints ([`RowValidator`])
//! - Best-effort numeric coercion shared with the repair step

mod columns;
mod converters;
mod sanitizers;
mod validator;

pub use columns::{ColumnNormalizer, normalize_column_name};
pub(crate) use converters::coerce_to_numeric;
pub use sanitizers::TextTrimmer;
pub use validator::RowValidator;
