//! Progress reporting for the cleaning pipeline.
//!
//! The pipeline is synchronous; a reporter is simply called between steps.
//!
//! # Example
//!
//! ```rust,ignore
//! use sales_cleaning::Pipeline;
//!
//! let result = Pipeline::builder()
//!     .on_progress(|update| {
//!         println!("[{:?}] {}", update.stage, update.message);
//!     })
//!     .build()?
//!     .run()?;
//! ```

use serde::{Deserialize, Serialize};

/// Stages of a cleaning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningStage {
    /// Reading the source file
    Loading,
    /// Rewriting column labels
    Normalizing,
    /// Trimming text columns
    Trimming,
    /// Filling missing numeric values
    Repairing,
    /// Dropping rows that break the non-negativity rule
    Validating,
    /// Writing the destination file
    Writing,
    /// Run finished successfully
    Complete,
    /// Run stopped with an error
    Failed,
}

impl CleaningStage {
    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Loading => "Loading Data",
            Self::Normalizing => "Normalizing Columns",
            Self::Trimming => "Trimming Text",
            Self::Repairing => "Repairing Values",
            Self::Validating => "Validating Rows",
            Self::Writing => "Writing Output",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }

    /// Overall progress (0.0 - 1.0) once this stage has started.
    pub fn base_progress(&self) -> f32 {
        match self {
            Self::Loading => 0.0,
            Self::Normalizing => 0.20,
            Self::Trimming => 0.35,
            Self::Repairing => 0.50,
            Self::Validating => 0.70,
            Self::Writing => 0.85,
            Self::Complete => 1.0,
            Self::Failed => 0.0,
        }
    }
}

/// A progress update emitted when a stage starts or the run ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Current stage
    pub stage: CleaningStage,
    /// Overall progress (0.0 - 1.0)
    pub progress: f32,
    /// Human-readable message describing current activity
    pub message: String,
}

impl ProgressUpdate {
    /// Creates an update for the start of `stage`.
    pub fn new(stage: CleaningStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            progress: stage.base_progress(),
            message: message.into(),
        }
    }

    /// Creates a completion progress update.
    pub fn complete(message: impl Into<String>) -> Self {
        Self::new(CleaningStage::Complete, message)
    }

    /// Creates a failed progress update.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(CleaningStage::Failed, message)
    }
}

/// Trait for receiving progress updates during a run.
pub trait ProgressReporter: Send + Sync {
    /// Called once per stage and once at the end of the run.
    fn report(&self, update: ProgressUpdate);
}

/// Wrapper that implements [`ProgressReporter`] using a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    /// Creates a new closure-based progress reporter.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}

static_assertions::assert_impl_all!(ProgressUpdate: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_stage_progress_is_monotonic() {
        let stages = [
            CleaningStage::Loading,
            CleaningStage::Normalizing,
            CleaningStage::Trimming,
            CleaningStage::Repairing,
            CleaningStage::Validating,
            CleaningStage::Writing,
            CleaningStage::Complete,
        ];
        for pair in stages.windows(2) {
            assert!(pair[0].base_progress() < pair[1].base_progress());
        }
    }

    #[test]
    fn test_stage_serialization() {
        let json = serde_json::to_string(&CleaningStage::Repairing).unwrap();
        assert_eq!(json, "\"repairing\"");
    }

    #[test]
    fn test_closure_reporter() {
        let seen = Mutex::new(Vec::new());
        let reporter = ClosureProgressReporter::new(|update: ProgressUpdate| {
            seen.lock().unwrap().push(update.stage);
        });

        reporter.report(ProgressUpdate::new(CleaningStage::Loading, "start"));
        reporter.report(ProgressUpdate::complete("done"));

        assert_eq!(
            *seen.lock().unwrap(),
            vec![CleaningStage::Loading, CleaningStage::Complete]
        );
    }

    #[test]
    fn test_complete_and_failed() {
        assert_eq!(ProgressUpdate::complete("ok").progress, 1.0);
        let failed = ProgressUpdate::failed("boom");
        assert_eq!(failed.stage, CleaningStage::Failed);
        assert_eq!(failed.message, "boom");
    }
}
