//! Options command implementation.
//!
//! Lists the values the filter flags offer.

use opptrack_model::catalog::{
    CatalogOption, AGENCIES, NAICS_CODES, PERIODS, SET_ASIDES, VEHICLES,
};
use serde::Serialize;

use super::{CommandContext, Result};
use crate::output::format_options_table;

#[derive(Serialize)]
struct OptionOutput {
    value: &'static str,
    label: &'static str,
}

fn to_output(options: &[CatalogOption]) -> Vec<OptionOutput> {
    options
        .iter()
        .map(|o| OptionOutput {
            value: o.value,
            label: o.label,
        })
        .collect()
}

/// Executes the options command.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    if ctx.json_output {
        let periods: Vec<OptionOutput> = PERIODS
            .iter()
            .map(|(period, label)| OptionOutput {
                value: period.as_str(),
                label: *label,
            })
            .collect();
        let output = serde_json::json!({
            "naics": to_output(NAICS_CODES),
            "set_asides": to_output(SET_ASIDES),
            "vehicles": to_output(VEHICLES),
            "agencies": to_output(AGENCIES),
            "periods": periods,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        print!("{}", format_options_table(ctx.use_colors));
    }

    Ok(())
}
