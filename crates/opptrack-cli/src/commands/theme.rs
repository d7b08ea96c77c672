//! Theme command implementation.
//!
//! Shows or persists the dark-mode flag.

use super::workspace::open_tracker;
use super::{CommandContext, Result};

/// Executes the theme command.
///
/// `Some(true)` switches to dark mode, `Some(false)` to light mode and `None`
/// only reports the current theme.
pub fn execute(ctx: &CommandContext, dark: Option<bool>) -> Result<()> {
    let mut tracker = open_tracker(ctx, None)?;

    if let Some(dark) = dark {
        if dark != tracker.dark_mode() {
            tracker.set_dark_mode(dark)?;
        }
    }

    let theme = theme_name(tracker.dark_mode());
    if ctx.json_output {
        let output = serde_json::json!({
            "theme": theme,
            "dark_mode": tracker.dark_mode(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Theme: {theme}");
    }

    Ok(())
}

fn theme_name(dark: bool) -> &'static str {
    if dark {
        "dark"
    } else {
        "light"
    }
}
