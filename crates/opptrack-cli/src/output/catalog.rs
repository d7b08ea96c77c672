//! Preset and filter option output formatting.

use opptrack_model::catalog::{AGENCIES, NAICS_CODES, PERIODS, SET_ASIDES, VEHICLES};
use opptrack_model::models::Preset;
use owo_colors::OwoColorize;

/// Formats a saved preset for display.
pub fn format_preset_table(
    preset: Option<&Preset>,
    query: Option<&str>,
    use_colors: bool,
) -> String {
    let Some(preset) = preset else {
        return "No preset saved.\n".to_string();
    };

    let mut output = String::new();
    let label = if use_colors {
        "Preset:".bold().to_string()
    } else {
        "Preset:".to_string()
    };
    output.push_str(&format!("{} {}\n", label, preset.name));
    if let Some(saved_at) = preset.saved_at() {
        output.push_str(&format!("Saved: {}\n", saved_at.format("%Y-%m-%d %H:%M UTC")));
    }
    match query {
        Some(query) if !query.is_empty() => output.push_str(&format!("Filters: {}\n", query)),
        _ => output.push_str("Filters: (none)\n"),
    }
    output
}

/// Formats the filter option catalog.
pub fn format_options_table(use_colors: bool) -> String {
    let mut output = String::new();

    let mut section = |title: &str, rows: Vec<(String, &str)>| {
        if use_colors {
            output.push_str(&format!("{}\n", title.green().bold()));
        } else {
            output.push_str(title);
            output.push('\n');
        }
        for (value, label) in rows {
            output.push_str(&format!("  {:<10} {}\n", value, label));
        }
        output.push('\n');
    };

    section(
        "NAICS (--naics)",
        NAICS_CODES.iter().map(|o| (o.value.to_string(), o.label)).collect(),
    );
    section(
        "Set-asides (--set-aside)",
        SET_ASIDES.iter().map(|o| (o.value.to_string(), o.label)).collect(),
    );
    section(
        "Vehicles (--vehicle)",
        VEHICLES.iter().map(|o| (o.value.to_string(), o.label)).collect(),
    );
    section(
        "Agencies (--agency)",
        AGENCIES.iter().map(|o| (o.value.to_string(), o.label)).collect(),
    );
    section(
        "Periods (--period)",
        PERIODS
            .iter()
            .map(|(period, label)| (period.as_str().to_string(), *label))
            .collect(),
    );

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use opptrack_model::models::FilterState;

    #[test]
    fn test_preset_table() {
        assert_eq!(format_preset_table(None, None, false), "No preset saved.\n");

        let saved_at = Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap();
        let preset = Preset::new("GSA work", FilterState::default(), saved_at);
        let out = format_preset_table(Some(&preset), Some("agency=GSA"), false);
        assert!(out.contains("Preset: GSA work"));
        assert!(out.contains("Saved: 2026-10-17 09:30 UTC"));
        assert!(out.contains("Filters: agency=GSA"));
    }

    #[test]
    fn test_options_table_lists_catalog() {
        let out = format_options_table(false);
        assert!(out.contains("NAICS (--naics)"));
        assert!(out.contains("541512"));
        assert!(out.contains("HUBZone"));
        assert!(out.contains("CIO-SP3"));
        assert!(out.contains("NOAA"));
        assert!(out.contains("  90 "));
    }
}
