//! Application output formatting.

use chrono::NaiveDate;
use opptrack_model::catalog::agency_label;
use opptrack_model::models::{Application, ApplicationStatus, FilterState, QuickFilters, SortConfig};
use owo_colors::OwoColorize;
use serde::Serialize;

use super::helpers::{
    format_bar, format_ceiling, format_days_until, format_dollars, format_due, format_status,
    highlight_keywords, truncate_str,
};

/// Lifecycle stages shown in the detail view. Awarded and Lost share the last.
const STAGES: [&str; 4] = ["Draft", "Ready", "Submitted", "Awarded/Lost"];

/// JSON output structure for the list command.
#[derive(Serialize)]
pub struct ListOutput<'a> {
    pub applications: &'a [&'a Application],
    /// Number of applications matching the filters, before any limit.
    pub total: usize,
    pub filters: &'a FilterState,
    pub quick_filters: QuickFilters,
    pub sort: SortConfig,
    /// Shareable query string for the filters.
    pub query: &'a str,
}

/// JSON output structure for the show command.
#[derive(Serialize)]
pub struct ApplicationDetailsOutput<'a> {
    #[serde(flatten)]
    pub application: &'a Application,
    pub agency_name: Option<&'static str>,
    pub stage: usize,
    pub stages: Vec<StageOutput>,
    pub can_submit: bool,
}

/// JSON output for one lifecycle stage.
#[derive(Serialize)]
pub struct StageOutput {
    pub label: &'static str,
    pub completed: bool,
    pub current: bool,
}

/// JSON output structure for the submit command.
#[derive(Serialize)]
pub struct SubmitOutput<'a> {
    pub id: &'a str,
    pub result: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

fn stages(status: ApplicationStatus) -> Vec<StageOutput> {
    let current = status.stage_index();
    STAGES
        .into_iter()
        .enumerate()
        .map(|(index, label)| StageOutput {
            label,
            completed: index <= current,
            current: index == current,
        })
        .collect()
}

/// Formats the list result as JSON.
pub fn format_applications_json(output: &ListOutput<'_>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(output)
}

/// Formats applications as a table.
///
/// Title matches for `keywords` are highlighted when colors are on.
pub fn format_applications_table(
    apps: &[&Application],
    keywords: &[String],
    today: NaiveDate,
    use_colors: bool,
) -> String {
    if apps.is_empty() {
        return "No applications match the current filters.\n".to_string();
    }

    let mut output = String::new();

    let header = format!(
        "{:<8} {:<10} {:<6} {:<16} {:>4} {:>4} {:>8} {}",
        "ID", "Status", "Agency", "Due", "Done", "Fit", "Ceiling", "Title"
    );
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for app in apps {
        // Pad before coloring so escape codes don't break alignment.
        let status = format!("{:<10}", app.status.as_str());
        let status = if use_colors {
            status.replace(app.status.as_str(), &format_status(app.status, true))
        } else {
            status
        };
        let due = format!(
            "{:<16}",
            format_due(&app.due_date, app.due_date(), today, false)
        );
        let title = highlight_keywords(&truncate_str(&app.title, 60), keywords, use_colors);

        output.push_str(&format!(
            "{:<8} {} {:<6} {} {:>3}% {:>4} {:>8} {}\n",
            app.id,
            status,
            app.agency,
            due,
            app.percent_complete,
            app.fit_score,
            format_ceiling(app.ceiling),
            title
        ));
    }

    output
}

/// Formats application details as JSON (show command).
pub fn format_application_details_json(app: &Application) -> Result<String, serde_json::Error> {
    let output = ApplicationDetailsOutput {
        application: app,
        agency_name: agency_label(&app.agency),
        stage: app.status.stage_index(),
        stages: stages(app.status),
        can_submit: app.status == ApplicationStatus::Ready,
    };
    serde_json::to_string_pretty(&output)
}

/// Formats application details as a human-readable view (show command).
pub fn format_application_details_table(
    app: &Application,
    today: NaiveDate,
    use_colors: bool,
) -> String {
    let mut output = String::new();

    let title_label = if use_colors {
        "Application:".bold().to_string()
    } else {
        "Application:".to_string()
    };
    output.push_str(&format!("{} {}\n", title_label, app.title));
    output.push_str(&format!("ID: {}\n", app.id));

    match agency_label(&app.agency) {
        Some(name) => output.push_str(&format!("Agency: {}\n", name)),
        None => output.push_str(&format!("Agency: {}\n", app.agency)),
    }
    if !app.naics.is_empty() {
        output.push_str(&format!("NAICS: {}\n", app.naics));
    }
    if !app.vehicle.is_empty() {
        output.push_str(&format!("Vehicle: {}\n", app.vehicle));
    }
    if app.ceiling > 0.0 {
        output.push_str(&format!("Ceiling: {}\n", format_dollars(app.ceiling)));
    }

    let due = match app.due_date() {
        Some(date) => format!(
            "{} ({})",
            date.format("%b %d, %Y"),
            format_days_until(date, today, use_colors)
        ),
        None => app.due_date.clone(),
    };
    output.push_str(&format!("Due: {}\n", due));
    output.push_str(&format!("Status: {}\n", format_status(app.status, use_colors)));
    output.push_str(&format!(
        "Progress: {} {}%\n",
        format_bar(f64::from(app.percent_complete)),
        app.percent_complete
    ));
    output.push_str(&format!("Fit Score: {}\n", app.fit_score));

    if !app.set_aside.is_empty() {
        output.push_str(&format!("Set-Aside: {}\n", app.set_aside.join(", ")));
    }
    if !app.keywords.is_empty() {
        output.push_str(&format!("Keywords: {}\n", app.keywords.join(", ")));
    }

    output.push_str("\nStages:\n");
    for stage in stages(app.status) {
        let marker = if stage.current {
            "[>]"
        } else if stage.completed {
            "[x]"
        } else {
            "[ ]"
        };
        let line = format!("  {} {}", marker, stage.label);
        if use_colors && stage.current {
            output.push_str(&format!("{}\n", line.bold()));
        } else {
            output.push_str(&line);
            output.push('\n');
        }
    }

    if app.status == ApplicationStatus::Ready {
        output.push_str(&format!("\nReady to submit: opp submit {}\n", app.id));
    }

    output
}

/// Formats a submit result as JSON.
pub fn format_submit_json(output: &SubmitOutput<'_>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(output)
}
