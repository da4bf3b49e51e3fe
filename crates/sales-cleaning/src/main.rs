//! CLI entry point for the sales cleaning pipeline.

use anyhow::{Result, anyhow};
use clap::Parser;
use sales_cleaning::{CleaningConfig, CleaningResult, MissingColumnPolicy, Pipeline};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Batch cleaning pipeline for raw sales exports",
    long_about = "Reads a raw sales CSV, normalizes column names, fills missing\n\
                  price/quantity values and drops rows with negative price or\n\
                  quantity, then writes the cleaned CSV. Text columns are only\n\
                  trimmed when named with --text-columns or in the config file.\n\n\
                  EXAMPLES:\n  \
                  # Standard run (data/raw/sales_data_raw.csv -> data/processed/sales_data_clean.csv)\n  \
                  sales-cleaning\n\n  \
                  # Custom paths\n  \
                  sales-cleaning -i exports/march.csv -o exports/march_clean.csv\n\n  \
                  # Also trim whitespace in the product and category columns\n  \
                  sales-cleaning --text-columns product,category\n\n  \
                  # Clean without writing, print the summary as JSON\n  \
                  sales-cleaning --dry-run --json"
)]
struct Args {
    /// Path to the raw CSV file
    ///
    /// Default: data/raw/sales_data_raw.csv
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path the cleaned CSV is written to
    ///
    /// Default: data/processed/sales_data_clean.csv
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file with a full pipeline configuration
    ///
    /// Other flags override the values it contains.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Comma-separated list of text columns to trim
    ///
    /// Default: none (text values are written as read)
    #[arg(long, value_delimiter = ',')]
    text_columns: Option<Vec<String>>,

    /// Fail when a text column is missing instead of skipping it
    #[arg(long)]
    strict_columns: bool,

    /// Number of rows shown in the preview
    #[arg(long)]
    preview_rows: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output the run summary as JSON to stdout instead of the preview
    ///
    /// Disables all progress logs; only outputs the final JSON summary.
    #[arg(long)]
    json: bool,

    /// Run every step but don't write the output file
    #[arg(long)]
    dry_run: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = build_config(&args)?;
    let pipeline = build_pipeline(&args, config)?;

    match pipeline.run() {
        Ok(result) => handle_pipeline_output(&result, pipeline.config(), &args),
        Err(e) => {
            error!("Cleaning failed [{}]: {}", e.error_code(), e);
            Err(anyhow!("Cleaning failed: {}", e))
        }
    }
}

/// Start from the config file (or the defaults) and apply CLI overrides.
fn build_config(args: &Args) -> Result<CleaningConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            CleaningConfig::from_json_file(path)?
        }
        None => CleaningConfig::default(),
    };

    if let Some(ref input) = args.input {
        config.input_path = input.clone();
    }
    if let Some(ref output) = args.output {
        config.output_path = output.clone();
    }
    if let Some(ref columns) = args.text_columns {
        config.text_columns = columns
            .iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
    }
    if args.strict_columns {
        config.missing_column_policy = MissingColumnPolicy::Strict;
    }
    if let Some(rows) = args.preview_rows {
        config.preview_rows = rows;
    }
    if args.dry_run {
        config.save_to_disk = false;
    }

    config.validate()?;
    Ok(config)
}

fn build_pipeline(args: &Args, config: CleaningConfig) -> Result<Pipeline> {
    let mut builder = Pipeline::builder().config(config);

    if !args.quiet {
        builder = builder.on_progress(|update| {
            info!(
                "[{:.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        });
    }

    Ok(builder.build()?)
}

/// Handle pipeline output based on CLI flags.
///
/// - Default: print the preview and a short summary to stdout
/// - `--json`: print the summary as JSON to stdout only (no logs)
fn handle_pipeline_output(
    result: &CleaningResult,
    config: &CleaningConfig,
    args: &Args,
) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result.summary)?);
        return Ok(());
    }

    println!("Cleaning complete. First few rows:");
    println!("{}", result.table.preview(config.preview_rows));

    if !args.quiet {
        print_human_readable_summary(result, config);
    }

    Ok(())
}

/// Print a human-readable summary of the run.
///
/// This uses `println!` rather than the logger so it stays visible at any
/// log level.
fn print_human_readable_summary(result: &CleaningResult, config: &CleaningConfig) {
    let summary = &result.summary;

    println!();
    println!("{}", "=".repeat(60));
    println!("CLEANING SUMMARY");
    println!("{}", "=".repeat(60));
    println!("  Duration: {}ms", summary.duration_ms);
    println!(
        "  Rows: {} -> {} ({} removed)",
        summary.rows_before, summary.rows_after, summary.rows_removed
    );
    println!("  Columns renamed: {}", summary.renamed_columns.len());
    println!("  Values repaired: {}", summary.values_repaired());

    if !summary.actions.is_empty() {
        println!();
        println!("Actions Taken:");
        for action in summary.actions.iter().take(10) {
            println!("  - {}", action.description);
        }
        if summary.actions.len() > 10 {
            println!("  ... and {} more actions", summary.actions.len() - 10);
        }
    }

    println!();
    if config.save_to_disk {
        println!("Output: {}", config.output_path.display());
    } else {
        println!("Dry run: nothing was written");
    }
    println!("{}", "=".repeat(60));
}
