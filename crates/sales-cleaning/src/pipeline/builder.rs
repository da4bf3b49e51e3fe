//! Main cleaning pipeline module.
//!
//! This module provides the core `Pipeline` struct and builder for
//! running the four cleaning steps in order.

use crate::cleaner::{ColumnNormalizer, RowValidator, TextTrimmer};
use crate::config::{CleaningConfig, ConfigValidationError};
use crate::error::{Result, ResultExt};
use crate::imputers::MissingValueRepairer;
use crate::io::{load_table, write_table};
use crate::pipeline::progress::{
    CleaningStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate,
};
use crate::table::Table;
use crate::types::{ActionType, CleaningAction, CleaningResult, CleaningSummary};
use chrono::Local;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// The cleaning pipeline.
///
/// Use [`Pipeline::builder()`] to create a new pipeline with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use sales_cleaning::{CleaningConfig, Pipeline};
///
/// // Default run: data/raw/sales_data_raw.csv -> data/processed/sales_data_clean.csv
/// let result = Pipeline::builder().build()?.run()?;
///
/// // In-memory only
/// let result = Pipeline::builder()
///     .config(CleaningConfig::builder().save_to_disk(false).build()?)
///     .build()?
///     .process(table)?;
/// ```
pub struct Pipeline {
    config: CleaningConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
    repairer: MissingValueRepairer,
    validator: RowValidator,
}

static_assertions::assert_impl_all!(Pipeline: Send);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// The configuration this pipeline runs with.
    pub fn config(&self) -> &CleaningConfig {
        &self.config
    }

    /// Load the configured input, clean it, and write the configured output.
    ///
    /// Nothing is written unless every step succeeds. With `save_to_disk`
    /// off the output file is left alone.
    pub fn run(&self) -> Result<CleaningResult> {
        let outcome = self.run_internal();
        self.finish(outcome)
    }

    /// Clean an in-memory table.
    ///
    /// Runs normalize, repair, and validate in that order, with a trim step
    /// after normalizing when text columns are configured. The first failing
    /// step stops the run.
    pub fn process(&self, table: Table) -> Result<CleaningResult> {
        let outcome = self.process_internal(table);
        self.finish(outcome)
    }

    fn finish(&self, outcome: Result<CleaningResult>) -> Result<CleaningResult> {
        match outcome {
            Ok(result) => {
                self.report_progress(ProgressUpdate::complete("Cleaning completed successfully"));
                Ok(result)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Pipeline error: {}", e);
                Err(e)
            }
        }
    }

    /// Report progress if a reporter is configured.
    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn run_internal(&self) -> Result<CleaningResult> {
        self.report_progress(ProgressUpdate::new(
            CleaningStage::Loading,
            format!("Loading {}", self.config.input_path.display()),
        ));
        let table = load_table(&self.config.input_path)?;
        info!("Loaded {} rows x {} columns", table.height(), table.width());

        let result = self.process_internal(table)?;

        if self.config.save_to_disk {
            self.report_progress(ProgressUpdate::new(
                CleaningStage::Writing,
                format!("Writing {}", self.config.output_path.display()),
            ));
            write_table(&result.table, &self.config.output_path)?;
        } else {
            info!("Skipping write (save_to_disk is off)");
        }

        Ok(result)
    }

    fn process_internal(&self, table: Table) -> Result<CleaningResult> {
        let start_time = Instant::now();
        info!("Starting cleaning pipeline...");

        let mut summary = CleaningSummary {
            rows_before: table.height(),
            columns_before: table.width(),
            ..Default::default()
        };

        // Step 1: Normalize column labels
        self.report_progress(ProgressUpdate::new(
            CleaningStage::Normalizing,
            "Normalizing column names...",
        ));
        info!("Step 1: Normalizing column names...");
        summary.renamed_columns = ColumnNormalizer::planned_renames(&table);
        let table = ColumnNormalizer::normalize(&table).context("Normalizing column names")?;
        for (original, normalized) in &summary.renamed_columns {
            summary.actions.push(CleaningAction::for_column(
                ActionType::ColumnRenamed,
                normalized.clone(),
                format!("Renamed '{}' to '{}'", original, normalized),
            ));
        }

        // Step 2: Trim text columns
        let table = if self.config.text_columns.is_empty() {
            debug!("Step 2: No text columns configured, skipping trim");
            table
        } else {
            self.report_progress(ProgressUpdate::new(
                CleaningStage::Trimming,
                "Trimming text columns...",
            ));
            info!("Step 2: Trimming text columns...");
            let trimmed = TextTrimmer::strip(
                &table,
                self.config.text_columns.as_slice(),
                self.config.missing_column_policy,
            )
            .context("Trimming text columns")?;
            for col in &self.config.text_columns {
                if table.has_column(col) {
                    summary.trimmed_columns.push(col.clone());
                    summary.actions.push(CleaningAction::for_column(
                        ActionType::TextTrimmed,
                        col.clone(),
                        format!("Trimmed whitespace in '{}'", col),
                    ));
                }
            }
            trimmed
        };

        // Step 3: Repair missing numeric values
        self.report_progress(ProgressUpdate::new(
            CleaningStage::Repairing,
            "Repairing missing values...",
        ));
        info!("Step 3: Repairing missing values...");
        let (table, repairs) = self
            .repairer
            .repair_with_report(&table)
            .context("Repairing missing values")?;
        for report in &repairs {
            if let Some(fill_value) = report.fill_value {
                summary.actions.push(CleaningAction::for_column(
                    ActionType::ValuesImputed,
                    report.column.clone(),
                    format!(
                        "Filled {} values in '{}' with {}: {:.2}",
                        report.values_repaired, report.column, report.strategy, fill_value
                    ),
                ));
            }
        }
        summary.repairs = repairs;

        // Step 4: Drop invalid rows
        self.report_progress(ProgressUpdate::new(
            CleaningStage::Validating,
            "Removing invalid rows...",
        ));
        info!("Step 4: Removing invalid rows...");
        let rows_before_validation = table.height();
        let table = self
            .validator
            .validate(&table)
            .context("Removing invalid rows")?;
        summary.rows_removed = rows_before_validation - table.height();
        if summary.rows_removed > 0 {
            let pct = (summary.rows_removed as f64 / rows_before_validation as f64) * 100.0;
            summary.actions.push(CleaningAction::for_table(
                ActionType::RowsRemoved,
                format!(
                    "Removed {} rows with negative values ({:.1}%)",
                    summary.rows_removed, pct
                ),
            ));
        }

        summary.rows_after = table.height();
        summary.columns_after = table.width();
        summary.duration_ms = start_time.elapsed().as_millis() as u64;
        summary.completed_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        info!(
            "Cleaning finished: {} -> {} rows, {} values repaired",
            summary.rows_before,
            summary.rows_after,
            summary.values_repaired()
        );

        Ok(CleaningResult { table, summary })
    }
}

/// Builder for creating a [`Pipeline`] with custom configuration.
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<CleaningConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(PipelineBuilder: Send);

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: CleaningConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a progress reporter for receiving updates during a run.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    ///
    /// This is a convenience method for simple progress handling.
    /// For more complex scenarios, use [`progress_reporter`](Self::progress_reporter).
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> std::result::Result<Pipeline, ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let repairer = MissingValueRepairer::new(config.fill_rules.clone());
        let validator = RowValidator::new(config.non_negative_columns.iter().cloned());

        Ok(Pipeline {
            config,
            progress_reporter: self.progress_reporter,
            repairer,
            validator,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FillRule, FillStrategy, MissingColumnPolicy};
    use polars::prelude::*;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    fn in_memory() -> Pipeline {
        Pipeline::builder()
            .config(CleaningConfig::builder().save_to_disk(false).build().unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_process_sales_scenario() {
        let table = Table::new(
            df![
                "Price" => ["10", "abc", "20"],
                " Quantity " => ["-5", "3", "2"],
            ]
            .unwrap(),
        );

        let result = in_memory().process(table).unwrap();

        assert_eq!(result.table.column_names(), vec!["price", "quantity"]);
        let price: Vec<Option<f64>> = result
            .table
            .series("price")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        let quantity: Vec<Option<f64>> = result
            .table
            .series("quantity")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(price, vec![Some(15.0), Some(20.0)]);
        assert_eq!(quantity, vec![Some(3.0), Some(2.0)]);

        let summary = &result.summary;
        assert_eq!(summary.rows_before, 3);
        assert_eq!(summary.rows_after, 2);
        assert_eq!(summary.rows_removed, 1);
        assert_eq!(summary.renamed_columns.len(), 2);
        assert_eq!(summary.values_repaired(), 1);
        assert!(
            summary
                .actions
                .iter()
                .any(|a| a.action_type == ActionType::RowsRemoved)
        );
    }

    fn text_cell(table: &Table, col: &str) -> Option<String> {
        table
            .series(col)
            .unwrap()
            .str()
            .unwrap()
            .get(0)
            .map(str::to_string)
    }

    #[test]
    fn test_default_process_leaves_text_untouched() {
        let table = Table::new(
            df![
                "Product" => ["  Widget "],
                "Category" => [" Tools"],
                "price" => [1.0],
            ]
            .unwrap(),
        );

        let result = in_memory().process(table).unwrap();

        assert_eq!(text_cell(&result.table, "product").as_deref(), Some("  Widget "));
        assert_eq!(text_cell(&result.table, "category").as_deref(), Some(" Tools"));
        assert!(result.summary.trimmed_columns.is_empty());
        assert!(
            !result
                .summary
                .actions
                .iter()
                .any(|a| a.action_type == ActionType::TextTrimmed)
        );
    }

    #[test]
    fn test_process_trims_configured_text_columns() {
        let pipeline = Pipeline::builder()
            .config(
                CleaningConfig::builder()
                    .text_columns(["product", "category"])
                    .save_to_disk(false)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        let table = Table::new(df!["Product" => ["  Widget "], "price" => [1.0]].unwrap());

        let result = pipeline.process(table).unwrap();

        assert_eq!(text_cell(&result.table, "product").as_deref(), Some("Widget"));
        assert_eq!(result.summary.trimmed_columns, vec!["product"]);
    }

    #[test]
    fn test_process_strict_missing_text_column_fails() {
        let pipeline = Pipeline::builder()
            .config(
                CleaningConfig::builder()
                    .text_columns(["product", "category"])
                    .missing_column_policy(MissingColumnPolicy::Strict)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        let table = Table::new(df!["product" => ["a"]].unwrap());

        let err = pipeline.process(table).unwrap_err();

        assert_eq!(err.error_code(), "MISSING_COLUMN");
        assert_eq!(err.column(), Some("category"));
    }

    #[test]
    fn test_process_all_missing_price_fails() {
        let table = Table::new(df!["price" => ["x", "y"]].unwrap());

        let err = in_memory().process(table).unwrap_err();

        assert_eq!(err.error_code(), "INSUFFICIENT_DATA");
    }

    #[test]
    fn test_custom_rules_flow_through() {
        let config = CleaningConfig::builder()
            .fill_rules(vec![FillRule::new("discount", FillStrategy::Constant(0.0))])
            .non_negative_columns(["discount"])
            .build()
            .unwrap();
        let pipeline = Pipeline::builder().config(config).build().unwrap();
        let table = Table::new(
            df![
                "Discount" => [Some(-1.0), None, Some(2.0)],
                "price" => [Some(-3.0), None, Some(1.0)],
            ]
            .unwrap(),
        );

        let result = pipeline.process(table).unwrap();

        // price has no rule here, so it is neither filled nor validated
        assert_eq!(result.table.height(), 2);
        assert_eq!(result.table.series("price").unwrap().null_count(), 1);
    }

    #[test]
    fn test_progress_reported_in_order() {
        let stages = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&stages);
        let pipeline = Pipeline::builder()
            .on_progress(move |update| sink.lock().unwrap().push(update.stage))
            .build()
            .unwrap();

        pipeline
            .process(Table::new(df!["product" => ["a"]].unwrap()))
            .unwrap();

        assert_eq!(
            *stages.lock().unwrap(),
            vec![
                CleaningStage::Normalizing,
                CleaningStage::Repairing,
                CleaningStage::Validating,
                CleaningStage::Complete,
            ]
        );
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let config = CleaningConfig {
            preview_rows: 0,
            ..Default::default()
        };

        assert!(Pipeline::builder().config(config).build().is_err());
    }
}
