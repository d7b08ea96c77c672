//! Dashboard command implementation.
//!
//! Summarizes the filtered view by status.

use opptrack_query::filter::encode_query_string;
use opptrack_query::FilterContext;

use super::workspace::open_with_filters;
use super::{CommandContext, Result};
use crate::cli::FilterArgs;
use crate::output::{format_summary_json, format_summary_table, DashboardOutput};

/// Executes the dashboard command.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded or the criteria are
/// invalid.
pub fn execute(ctx: &CommandContext, filters: &FilterArgs) -> Result<()> {
    let mut tracker = open_with_filters(ctx, filters)?;
    let query = encode_query_string(tracker.settled())?;
    let summary = tracker.summary(&FilterContext::now());

    if ctx.json_output {
        let output = DashboardOutput {
            summary: &summary,
            query: &query,
        };
        println!("{}", format_summary_json(&output)?);
    } else if !ctx.quiet {
        print!("{}", format_summary_table(&summary, ctx.use_colors));
    }

    Ok(())
}
