//! Sales Data Cleaning Library
//!
//! A batch cleaning pipeline for tabular sales records built with Rust and Polars.
//!
//! # Overview
//!
//! A run reads one CSV file, passes the table through a fixed sequence of
//! steps, and writes the result to a second CSV file:
//!
//! - **Column Normalization**: labels become trimmed, lowercase, underscore-separated
//! - **Text Trimming** (opt-in): whitespace is stripped from the configured text columns
//! - **Missing-Value Repair**: `price` gaps get the median, `quantity` gaps get zero
//! - **Row Validation**: rows with a negative (or unusable) `price`/`quantity` are dropped
//!
//! Every step takes a [`Table`] and returns a new one. The input is never
//! modified in place.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use sales_cleaning::{CleaningConfig, MissingColumnPolicy, Pipeline};
//!
//! // Option 1: the standard run, file to file
//! let result = Pipeline::builder().build()?.run()?;
//! println!("{}", result.table.preview(5));
//!
//! // Option 2: custom paths and a strict trim
//! let config = CleaningConfig::builder()
//!     .input_path("exports/march.csv")
//!     .output_path("exports/march_clean.csv")
//!     .text_columns(["product", "category"])
//!     .missing_column_policy(MissingColumnPolicy::Strict)
//!     .build()?;
//!
//! let result = Pipeline::builder()
//!     .config(config)
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .run()?;
//! ```
//!
//! # Using the steps directly
//!
//! ```rust,ignore
//! use sales_cleaning::{ColumnNormalizer, MissingValueRepairer, RowValidator, load_table};
//!
//! let table = load_table("data/raw/sales_data_raw.csv")?;
//! let table = ColumnNormalizer::normalize(&table)?;
//! let table = MissingValueRepairer::default().repair(&table)?;
//! let table = RowValidator::default().validate(&table)?;
//! ```

pub mod cleaner;
pub mod config;
pub mod error;
pub mod imputers;
pub mod io;
pub mod pipeline;
pub mod table;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::{ColumnNormalizer, RowValidator, TextTrimmer, normalize_column_name};
pub use config::{
    CleaningConfig, CleaningConfigBuilder, ConfigValidationError, FillRule, FillStrategy,
    MissingColumnPolicy,
};
pub use error::{CleaningError, Result, ResultExt};
pub use imputers::{MissingValueRepairer, column_median};
pub use io::{load_table, write_table};
pub use pipeline::{
    CleaningStage, ClosureProgressReporter, Pipeline, PipelineBuilder, ProgressReporter,
    ProgressUpdate,
};
pub use table::Table;
pub use types::{ActionType, CleaningAction, CleaningResult, CleaningSummary, RepairReport};
pub use utils::{fill_numeric_nulls, is_numeric_dtype, parse_numeric_string};
