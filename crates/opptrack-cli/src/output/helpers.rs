//! Common helper functions for output formatting.

use chrono::NaiveDate;
use opptrack_model::models::ApplicationStatus;
use opptrack_query::highlight::highlight;
use owo_colors::OwoColorize;

/// Width of the progress bar in `show` and `dashboard`.
const BAR_WIDTH: usize = 20;

/// Truncates a string to a maximum number of characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Formats a status name, colored by lifecycle stage.
pub fn format_status(status: ApplicationStatus, use_colors: bool) -> String {
    let label = status.as_str();
    if !use_colors {
        return label.to_string();
    }
    match status {
        ApplicationStatus::Draft => label.dimmed().to_string(),
        ApplicationStatus::Ready => label.yellow().to_string(),
        ApplicationStatus::Submitted => label.blue().to_string(),
        ApplicationStatus::Awarded => label.green().to_string(),
        ApplicationStatus::Lost => label.red().to_string(),
    }
}

/// Formats a due date relative to `today`.
///
/// Unparsable dates are shown as entered.
pub fn format_due(raw: &str, due: Option<NaiveDate>, today: NaiveDate, use_colors: bool) -> String {
    let Some(date) = due else {
        return raw.to_string();
    };

    let days = (date - today).num_days();
    let display = match days {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        d if d < 0 => format!("{} ({}d ago)", date.format("%b %d"), -d),
        d => format!("{} ({}d)", date.format("%b %d"), d),
    };

    if use_colors {
        if days < 0 {
            display.red().to_string()
        } else if days <= 7 {
            display.yellow().to_string()
        } else {
            display
        }
    } else {
        display
    }
}

/// Describes how far `date` is from `today` ("in 3 days", "2 days ago").
pub fn format_days_until(date: NaiveDate, today: NaiveDate, use_colors: bool) -> String {
    let days = (date - today).num_days();
    let display = match days {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        -1 => "1 day ago".to_string(),
        d if d < 0 => format!("{} days ago", -d),
        d => format!("in {d} days"),
    };
    if use_colors && days < 0 {
        display.red().to_string()
    } else {
        display
    }
}

/// Formats a contract ceiling compactly ("$4.5M", "$750K").
pub fn format_ceiling(ceiling: f64) -> String {
    if ceiling <= 0.0 {
        "-".to_string()
    } else if ceiling >= 1_000_000.0 {
        format!("${}M", trim_decimal(ceiling / 1_000_000.0))
    } else if ceiling >= 1_000.0 {
        format!("${}K", trim_decimal(ceiling / 1_000.0))
    } else {
        format!("${}", trim_decimal(ceiling))
    }
}

fn trim_decimal(value: f64) -> String {
    let formatted = format!("{value:.2}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Formats a whole-dollar amount with thousands separators.
pub fn format_dollars(amount: f64) -> String {
    let whole = amount.round() as u64;
    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Renders a percentage as a fixed-width bar.
pub fn format_bar(percent: f64) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

/// Marks keyword matches in `text`.
///
/// Matches are bold yellow with colors and left unmarked without them.
pub fn highlight_keywords(text: &str, keywords: &[String], use_colors: bool) -> String {
    if !use_colors || keywords.is_empty() {
        return text.to_string();
    }
    highlight(text, keywords)
        .into_iter()
        .map(|segment| {
            if segment.highlighted {
                segment.text.yellow().bold().to_string()
            } else {
                segment.text.to_string()
            }
        })
        .collect()
}
