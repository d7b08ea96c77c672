//! Submit command implementation.
//!
//! Runs the Ready to Submitted transition on the loaded collection. The
//! collection itself is not persisted, so the change lasts for this run (or
//! interactive session) only.

use opptrack_model::models::ApplicationStatus;
use opptrack_query::SubmitOutcome;

use super::workspace::{open_tracker, CliTracker};
use super::{CommandContext, Result};
use crate::output::{format_submit_json, SubmitOutput};

/// Executes the submit command.
///
/// An unknown id or a status that cannot be submitted changes nothing and is
/// reported, not treated as an error.
pub fn execute(ctx: &CommandContext, id: &str) -> Result<()> {
    let mut tracker = open_tracker(ctx, None)?;
    submit_and_report(ctx, &mut tracker, id)
}

/// Marks `id` submitted on `tracker` and prints the outcome.
pub fn submit_and_report(ctx: &CommandContext, tracker: &mut CliTracker, id: &str) -> Result<()> {
    let outcome = tracker.mark_submitted(id);

    if ctx.json_output {
        let output = match outcome {
            SubmitOutcome::Submitted => SubmitOutput {
                id,
                result: "submitted",
                status: Some(ApplicationStatus::Submitted),
                reason: None,
            },
            SubmitOutcome::NotFound => SubmitOutput {
                id,
                result: "not_found",
                status: None,
                reason: None,
            },
            SubmitOutcome::Rejected(e) => SubmitOutput {
                id,
                result: "rejected",
                status: Some(e.from),
                reason: Some(e.to_string()),
            },
        };
        println!("{}", format_submit_json(&output)?);
    } else if !ctx.quiet {
        match outcome {
            SubmitOutcome::Submitted => println!("{id} marked as Submitted."),
            SubmitOutcome::NotFound => println!("No application '{id}'; nothing changed."),
            SubmitOutcome::Rejected(e) => println!("{id} was not submitted: {e}."),
        }
    }

    Ok(())
}
