//! Show command implementation.
//!
//! Displays one application with its lifecycle stage.

use opptrack_query::FilterContext;

use super::workspace::open_tracker;
use super::{CommandContext, Result};
use crate::output::{format_application_details_json, format_application_details_table};

/// Executes the show command.
///
/// # Errors
///
/// Returns `TrackerError::NotFound` (with the closest id as a suggestion)
/// when no application has the given id.
pub fn execute(ctx: &CommandContext, id: &str) -> Result<()> {
    let tracker = open_tracker(ctx, None)?;
    let app = tracker.find(id)?;

    if ctx.json_output {
        println!("{}", format_application_details_json(app)?);
    } else if !ctx.quiet {
        let today = FilterContext::now().today();
        print!(
            "{}",
            format_application_details_table(app, today, ctx.use_colors)
        );
    }

    Ok(())
}
