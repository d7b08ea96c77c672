//! Dashboard output formatting.

use opptrack_query::StatusSummary;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::helpers::{format_bar, format_status};

/// JSON output structure for the dashboard command.
#[derive(Serialize)]
pub struct DashboardOutput<'a> {
    #[serde(flatten)]
    pub summary: &'a StatusSummary,
    pub query: &'a str,
}

/// Formats a status summary as JSON.
pub fn format_summary_json(output: &DashboardOutput<'_>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(output)
}

/// Formats a status summary as a bar chart.
pub fn format_summary_table(summary: &StatusSummary, use_colors: bool) -> String {
    let mut output = String::new();

    let header = format!("Applications: {}", summary.total);
    if use_colors {
        output.push_str(&format!("{}\n\n", header.bold()));
    } else {
        output.push_str(&header);
        output.push_str("\n\n");
    }

    for entry in &summary.statuses {
        // Pad the plain label first so colored labels stay aligned.
        let label = format!("{:<10}", entry.status.as_str());
        let label = if use_colors {
            label.replace(entry.status.as_str(), &format_status(entry.status, true))
        } else {
            label
        };
        output.push_str(&format!(
            "{} {:>3} {} {:>5.1}%\n",
            label,
            entry.count,
            format_bar(entry.percentage),
            entry.percentage
        ));
    }

    output.push_str(&format!(
        "\nAverage completion: {} {}%\n",
        format_bar(f64::from(summary.average_complete)),
        summary.average_complete
    ));

    output
}
