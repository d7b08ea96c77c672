//! Share command implementation.
//!
//! Prints the query string that reproduces the given filters.

use opptrack_query::filter::encode_query_string;

use super::workspace::open_with_filters;
use super::{CommandContext, Result};
use crate::cli::FilterArgs;

/// Executes the share command.
///
/// The query is encoded from the committed filters, so a `--url` base comes
/// back normalized. Passing the output to `--url` restores the filters.
pub fn execute(ctx: &CommandContext, filters: &FilterArgs) -> Result<()> {
    let tracker = open_with_filters(ctx, filters)?;
    let query = encode_query_string(tracker.applied())?;

    if ctx.json_output {
        let output = serde_json::json!({
            "query": query,
            "filters": tracker.applied(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if tracker.applied().is_default() {
        if !ctx.quiet {
            println!("(no filters applied)");
        }
    } else {
        println!("{query}");
    }

    Ok(())
}
