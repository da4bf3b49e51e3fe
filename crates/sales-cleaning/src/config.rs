//! Configuration types for the cleaning pipeline.
//!
//! This module provides configuration options using the builder pattern.
//! The defaults reproduce the standard sales cleaning run: read
//! `data/raw/sales_data_raw.csv`, fill `price` with its median and
//! `quantity` with zero, drop rows where either is negative, and write
//! `data/processed/sales_data_clean.csv`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Default location of the raw sales export.
pub const DEFAULT_INPUT_PATH: &str = "data/raw/sales_data_raw.csv";

/// Default location of the cleaned output.
pub const DEFAULT_OUTPUT_PATH: &str = "data/processed/sales_data_clean.csv";

/// Column holding unit prices.
pub const PRICE_COLUMN: &str = "price";

/// Column holding sold quantities.
pub const QUANTITY_COLUMN: &str = "quantity";

/// Number of rows printed after a successful run.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// What to do when an operation names a column the table does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MissingColumnPolicy {
    /// Fail with [`CleaningError::MissingColumn`](crate::error::CleaningError::MissingColumn)
    Strict,
    /// Skip the column and carry on
    #[default]
    Lenient,
}

/// How missing values in a numeric column are filled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FillStrategy {
    /// Median of the values that parsed as numbers
    Median,
    /// A fixed value
    Constant(f64),
}

impl FillStrategy {
    /// Short name used in logs and summaries.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Median => "median",
            Self::Constant(_) => "constant",
        }
    }
}

/// A named per-column fill rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillRule {
    /// Column the rule applies to (matched after normalization).
    pub column: String,
    /// How its missing values are filled.
    pub strategy: FillStrategy,
}

impl FillRule {
    /// Create a new rule.
    pub fn new(column: impl Into<String>, strategy: FillStrategy) -> Self {
        Self {
            column: column.into(),
            strategy,
        }
    }

    /// The standard sales rules: `price` by median, `quantity` by zero.
    pub fn sales_defaults() -> Vec<FillRule> {
        vec![
            FillRule::new(PRICE_COLUMN, FillStrategy::Median),
            FillRule::new(QUANTITY_COLUMN, FillStrategy::Constant(0.0)),
        ]
    }
}

/// Configuration for the cleaning pipeline.
///
/// Use [`CleaningConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use sales_cleaning::config::{CleaningConfig, MissingColumnPolicy};
///
/// let config = CleaningConfig::builder()
///     .input_path("exports/march.csv")
///     .text_columns(["product", "region"])
///     .missing_column_policy(MissingColumnPolicy::Strict)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// File the raw table is read from.
    /// Default: "data/raw/sales_data_raw.csv"
    pub input_path: PathBuf,

    /// File the cleaned table is written to.
    /// Default: "data/processed/sales_data_clean.csv"
    pub output_path: PathBuf,

    /// Columns whose values are trimmed as text. Empty turns trimming off.
    /// Default: []
    pub text_columns: Vec<String>,

    /// Policy for text columns missing from the table.
    /// Default: Lenient
    pub missing_column_policy: MissingColumnPolicy,

    /// Per-column fill rules for the repair step.
    /// Default: price -> median, quantity -> 0
    pub fill_rules: Vec<FillRule>,

    /// Columns whose values must be >= 0 for a row to be kept.
    /// Default: ["price", "quantity"]
    pub non_negative_columns: Vec<String>,

    /// Rows shown in the preview after a run.
    /// Default: 5
    pub preview_rows: usize,

    /// Whether [`Pipeline::run`](crate::pipeline::Pipeline::run) writes the output file.
    /// Default: true
    pub save_to_disk: bool,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            text_columns: Vec::new(),
            missing_column_policy: MissingColumnPolicy::default(),
            fill_rules: FillRule::sales_defaults(),
            non_negative_columns: vec![PRICE_COLUMN.to_string(), QUANTITY_COLUMN.to_string()],
            preview_rows: DEFAULT_PREVIEW_ROWS,
            save_to_disk: true,
        }
    }
}

impl CleaningConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CleaningConfigBuilder {
        CleaningConfigBuilder::default()
    }

    /// Load a configuration from a JSON file and validate it.
    ///
    /// Missing fields are not filled in; the file must describe a full config.
    pub fn from_json_file(path: impl AsRef<Path>) -> crate::error::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::error::CleaningError::file_access(path, e))?;
        let config: CleaningConfig = serde_json::from_str(&content)?;
        config
            .validate()
            .map_err(|e| crate::error::CleaningError::InvalidConfig(e.to_string()))?;
        Ok(config)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.input_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("input_path".to_string()));
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("output_path".to_string()));
        }

        let mut seen = HashSet::new();
        for rule in &self.fill_rules {
            if !seen.insert(rule.column.as_str()) {
                return Err(ConfigValidationError::DuplicateFillRule(rule.column.clone()));
            }
            if let FillStrategy::Constant(value) = rule.strategy
                && !value.is_finite()
            {
                return Err(ConfigValidationError::NonFiniteFillValue {
                    column: rule.column.clone(),
                    value,
                });
            }
        }

        if self.preview_rows == 0 {
            return Err(ConfigValidationError::InvalidPreviewRows(self.preview_rows));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Path '{0}' must not be empty")]
    EmptyPath(String),

    #[error("More than one fill rule for column '{0}'")]
    DuplicateFillRule(String),

    #[error("Fill value for '{column}' must be finite, got {value}")]
    NonFiniteFillValue { column: String, value: f64 },

    #[error("Invalid preview rows: {0} (must be at least 1)")]
    InvalidPreviewRows(usize),
}

impl From<ConfigValidationError> for crate::error::CleaningError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::CleaningError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`CleaningConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct CleaningConfigBuilder {
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    text_columns: Option<Vec<String>>,
    missing_column_policy: Option<MissingColumnPolicy>,
    fill_rules: Option<Vec<FillRule>>,
    non_negative_columns: Option<Vec<String>>,
    preview_rows: Option<usize>,
    save_to_disk: Option<bool>,
}

impl CleaningConfigBuilder {
    /// Set the file the raw table is read from.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Set the file the cleaned table is written to.
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Set the columns trimmed as text.
    ///
    /// Names are matched against the normalized column names, so pass
    /// `product_name` rather than `Product Name`.
    pub fn text_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.text_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the policy for text columns the table does not have.
    pub fn missing_column_policy(mut self, policy: MissingColumnPolicy) -> Self {
        self.missing_column_policy = Some(policy);
        self
    }

    /// Replace the fill rules.
    pub fn fill_rules(mut self, rules: Vec<FillRule>) -> Self {
        self.fill_rules = Some(rules);
        self
    }

    /// Set the columns that must be non-negative.
    pub fn non_negative_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.non_negative_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the number of rows shown in the preview.
    pub fn preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = Some(rows);
        self
    }

    /// Enable or disable writing the output file.
    ///
    /// When false, [`Pipeline::run`](crate::pipeline::Pipeline::run) loads and
    /// cleans but keeps the result in memory.
    pub fn save_to_disk(mut self, save: bool) -> Self {
        self.save_to_disk = Some(save);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `CleaningConfig` or an error if validation fails.
    pub fn build(self) -> Result<CleaningConfig, ConfigValidationError> {
        let defaults = CleaningConfig::default();
        let config = CleaningConfig {
            input_path: self.input_path.unwrap_or(defaults.input_path),
            output_path: self.output_path.unwrap_or(defaults.output_path),
            text_columns: self.text_columns.unwrap_or(defaults.text_columns),
            missing_column_policy: self.missing_column_policy.unwrap_or_default(),
            fill_rules: self.fill_rules.unwrap_or(defaults.fill_rules),
            non_negative_columns: self
                .non_negative_columns
                .unwrap_or(defaults.non_negative_columns),
            preview_rows: self.preview_rows.unwrap_or(defaults.preview_rows),
            save_to_disk: self.save_to_disk.unwrap_or(defaults.save_to_disk),
        };

        config.validate()?;
        Ok(config)
    }
}
