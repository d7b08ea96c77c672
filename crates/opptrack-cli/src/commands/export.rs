//! Export command implementation.
//!
//! Writes the filtered and sorted view as a dated CSV file. The file name
//! carries the UTC date while filtering uses the local one.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use opptrack_model::models::Application;
use opptrack_query::{ExportOutcome, Exporter, FilterContext};
use owo_colors::OwoColorize;

use super::workspace::{open_with_filters, CliTracker};
use super::{CommandContext, Result};
use crate::cli::FilterArgs;

/// Notice shown when an export fails.
const FAILURE_NOTICE: &str = "Failed to export CSV";

/// Options for the export command.
#[derive(Debug)]
pub struct ExportOptions {
    /// Filter criteria.
    pub filters: FilterArgs,
    /// Target directory.
    pub output_dir: Option<PathBuf>,
}

/// Executes the export command.
///
/// # Errors
///
/// Returns an error if the criteria are invalid or the file cannot be
/// written. A failed write also prints a short notice.
pub async fn execute(ctx: &CommandContext, opts: &ExportOptions) -> Result<()> {
    let mut tracker = open_with_filters(ctx, &opts.filters)?;
    let dir = resolve_dir(opts.output_dir.as_deref(), ctx.export_dir.as_deref());
    export_view(ctx, &mut tracker, &Exporter::new(), &dir).await
}

/// Picks the export directory: flag, then config, then the working directory.
fn resolve_dir(flag: Option<&Path>, configured: Option<&Path>) -> PathBuf {
    flag.or(configured)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Date stamped into export file names.
fn file_date() -> NaiveDate {
    Utc::now().date_naive()
}

/// Exports the current view of `tracker` into `dir` and reports the result.
pub async fn export_view(
    ctx: &CommandContext,
    tracker: &mut CliTracker,
    exporter: &Exporter,
    dir: &Path,
) -> Result<()> {
    let context = FilterContext::now();
    let view: Vec<&Application> = tracker.view(&context);

    if ctx.verbose {
        eprintln!("Exporting {} applications to {}", view.len(), dir.display());
    }

    let outcome = match exporter.export_to_dir(&view, dir, file_date()).await {
        Ok(outcome) => outcome,
        Err(e) => {
            if !ctx.json_output {
                if ctx.use_colors {
                    eprintln!("{}", FAILURE_NOTICE.red());
                } else {
                    eprintln!("{FAILURE_NOTICE}");
                }
            }
            return Err(e.into());
        }
    };

    match outcome {
        ExportOutcome::Written { path, rows } => {
            if ctx.json_output {
                let output = serde_json::json!({
                    "status": "success",
                    "path": path.display().to_string(),
                    "rows": rows,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else if !ctx.quiet {
                println!("CSV exported successfully: {} ({} rows)", path.display(), rows);
            }
        }
        ExportOutcome::Busy => {
            if ctx.json_output {
                println!("{}", serde_json::json!({ "status": "busy" }));
            } else if !ctx.quiet {
                println!("An export is already running.");
            }
        }
    }

    Ok(())
}
