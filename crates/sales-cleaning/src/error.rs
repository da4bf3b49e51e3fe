//! Error types for the sales cleaning pipeline.
//!
//! Every step either returns a new [`Table`](crate::table::Table) or one of
//! the variants below. Nothing in the pipeline catches another step's error.
//!
//! Errors serialize as `{ code, message }` so a run summary or a wrapping tool
//! can report them without matching on the enum.

use serde::Serialize;
use serde::ser::SerializeStruct;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the cleaning pipeline.
#[derive(Error, Debug)]
pub enum CleaningError {
    /// A source or destination path could not be opened, read, or written.
    #[error("Cannot access '{}': {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source file is not valid delimited text.
    #[error("Failed to parse '{}': {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    /// An operation referenced a column the table does not have.
    #[error("Column '{0}' not found in table")]
    MissingColumn(String),

    /// An aggregate (e.g. a median) has no valid values to work from.
    #[error("Not enough valid values in column '{0}' to compute a fill value")]
    InsufficientData(String),

    /// Two column names collapse to the same name after normalization.
    #[error("Column '{original}' normalizes to '{normalized}', which is already taken")]
    DuplicateColumn { original: String, normalized: String },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CleaningError>,
    },
}

impl CleaningError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CleaningError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Build a [`CleaningError::FileAccess`] for `path`.
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CleaningError::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Stable error code, independent of the message wording.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::FileAccess { .. } => "FILE_ACCESS_ERROR",
            Self::Parse { .. } => "PARSE_ERROR",
            Self::MissingColumn(_) => "MISSING_COLUMN",
            Self::InsufficientData(_) => "INSUFFICIENT_DATA",
            Self::DuplicateColumn { .. } => "DUPLICATE_COLUMN",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// The column this error is about, if any.
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::MissingColumn(col) | Self::InsufficientData(col) => Some(col.as_str()),
            Self::DuplicateColumn { original, .. } => Some(original.as_str()),
            Self::WithContext { source, .. } => source.column(),
            _ => None,
        }
    }

    /// The file path this error is about, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::FileAccess { path, .. } | Self::Parse { path, .. } => Some(path.as_path()),
            Self::WithContext { source, .. } => source.path(),
            _ => None,
        }
    }
}

impl Serialize for CleaningError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("CleaningError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for cleaning operations.
pub type Result<T> = std::result::Result<T, CleaningError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CleaningError::Polars(e).with_context(context))
    }
}
