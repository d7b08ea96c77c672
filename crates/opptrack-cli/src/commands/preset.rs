//! Preset command implementation.
//!
//! Save, show and clear the single saved filter preset.

use chrono::Utc;
use opptrack_query::filter::encode_query_string;

use super::workspace::{open_tracker, update_filters};
use super::{CommandContext, Result};
use crate::cli::FilterArgs;
use crate::output::format_preset_table;

/// Executes the preset save command.
///
/// The preset captures the given filters (on top of a `--url` base, if any),
/// replacing any earlier preset.
pub fn execute_save(
    ctx: &CommandContext,
    name: Option<&str>,
    filters: &FilterArgs,
) -> Result<()> {
    let mut tracker = open_tracker(ctx, filters.url.as_deref())?;
    update_filters(tracker.draft_mut(), filters);
    tracker.save_preset(name, Utc::now())?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "saved",
            "preset": tracker.preset(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        if let Some(preset) = tracker.preset() {
            println!("Saved preset '{}'.", preset.name);
        }
    }

    Ok(())
}

/// Executes the preset show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let tracker = open_tracker(ctx, None)?;
    let preset = tracker.preset();

    if ctx.json_output {
        let output = serde_json::json!({ "preset": preset });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        let query = preset
            .map(|p| encode_query_string(&p.filters))
            .transpose()?;
        print!(
            "{}",
            format_preset_table(preset, query.as_deref(), ctx.use_colors)
        );
    }

    Ok(())
}

/// Executes the preset clear command.
pub fn execute_clear(ctx: &CommandContext) -> Result<()> {
    let mut tracker = open_tracker(ctx, None)?;
    let cleared = tracker.clear_preset()?;

    if ctx.json_output {
        let output = serde_json::json!({ "cleared": cleared });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        if cleared {
            println!("Preset cleared.");
        } else {
            println!("No preset saved.");
        }
    }

    Ok(())
}
