//! Result and summary types produced by a cleaning run.

use crate::table::Table;
use serde::{Deserialize, Serialize};

/// What the repair step did to one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairReport {
    /// Column that was repaired.
    pub column: String,
    /// Strategy name ("median" or "constant").
    pub strategy: String,
    /// Value written into the gaps. `None` when there were no gaps to fill.
    pub fill_value: Option<f64>,
    /// Cells that were empty or failed numeric coercion.
    pub values_repaired: usize,
}

/// A single recorded action of a cleaning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningAction {
    /// Kind of action.
    pub action_type: ActionType,
    /// Column the action applied to, if it applied to one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// Human-readable description.
    pub description: String,
}

impl CleaningAction {
    /// Create an action that touched a specific column.
    pub fn for_column(
        action_type: ActionType,
        column: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            action_type,
            column: Some(column.into()),
            description: description.into(),
        }
    }

    /// Create an action that applied to the table as a whole.
    pub fn for_table(action_type: ActionType, description: impl Into<String>) -> Self {
        Self {
            action_type,
            column: None,
            description: description.into(),
        }
    }
}

/// Types of actions taken during a cleaning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// A column label was normalized.
    ColumnRenamed,
    /// Whitespace was trimmed from a text column.
    TextTrimmed,
    /// Missing values were filled.
    ValuesImputed,
    /// Rows failing validation were removed.
    RowsRemoved,
}

impl ActionType {
    /// Get a human-readable display name for the action type.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ColumnRenamed => "Column Renamed",
            Self::TextTrimmed => "Text Trimmed",
            Self::ValuesImputed => "Values Imputed",
            Self::RowsRemoved => "Rows Removed",
        }
    }
}

/// Summary statistics for a cleaning run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleaningSummary {
    /// Rows in the table handed to the pipeline.
    pub rows_before: usize,
    /// Rows in the cleaned table.
    pub rows_after: usize,
    /// Rows dropped by validation.
    pub rows_removed: usize,
    /// Columns in the input table.
    pub columns_before: usize,
    /// Columns in the cleaned table.
    pub columns_after: usize,
    /// `(original, normalized)` for every renamed column.
    pub renamed_columns: Vec<(String, String)>,
    /// Text columns that were trimmed.
    pub trimmed_columns: Vec<String>,
    /// One entry per repaired column.
    pub repairs: Vec<RepairReport>,
    /// Everything the run did, in order.
    pub actions: Vec<CleaningAction>,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
    /// Local time the run finished.
    pub completed_at: String,
}

impl CleaningSummary {
    /// Total cells filled across all repaired columns.
    pub fn values_repaired(&self) -> usize {
        self.repairs.iter().map(|r| r.values_repaired).sum()
    }
}

/// Outcome of [`Pipeline::process`](crate::pipeline::Pipeline::process).
#[derive(Debug, Clone)]
pub struct CleaningResult {
    /// The cleaned table.
    pub table: Table,
    /// What happened along the way.
    pub summary: CleaningSummary,
}
