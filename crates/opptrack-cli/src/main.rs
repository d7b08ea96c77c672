use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;

mod cli;
mod commands;
mod dispatch;
mod output;

use cli::Cli;
use commands::config::{load_config, Config};
use commands::{CommandContext, CommandError};
use dispatch::{StandaloneCommand, StandaloneDispatch, TrackerCommand, TrackerDispatch};
use opptrack_query::TrackerError;
use tracing::Level;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                let rendered =
                    serde_json::to_string_pretty(&error_json).unwrap_or_else(|_| e.to_string());
                eprintln!("{rendered}");
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

/// Sends diagnostics to stderr so stdout stays clean for JSON and CSV.
fn init_tracing(cli: &Cli) {
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };
    let ansi = stderr_ansi(
        cli.no_color,
        std::env::var_os("NO_COLOR").is_some(),
        std::io::stderr().is_terminal(),
    );

    // A subscriber may already be installed when running under a test harness.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(false)
        .try_init();
}

/// Colors diagnostics only on a terminal that has not opted out.
fn stderr_ansi(no_color_flag: bool, no_color_env: bool, is_terminal: bool) -> bool {
    is_terminal && !no_color_flag && !no_color_env
}

async fn run(cli: &Cli) -> commands::Result<()> {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable configuration");
            Config::default()
        }
    };
    let ctx = CommandContext::from_cli(cli, &config);

    if let Some(dispatch) = StandaloneDispatch::try_from_cli(cli) {
        return dispatch.execute(&ctx);
    }

    if let Some(dispatch) = TrackerDispatch::from_cli(cli) {
        return dispatch.execute(&ctx).await;
    }

    Ok(())
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Tracker(TrackerError::NotFound { .. }) => "NOT_FOUND",
        CommandError::Tracker(TrackerError::Filter(_)) | CommandError::Filter(_) => "FILTER_ERROR",
        CommandError::Tracker(TrackerError::Store(_)) | CommandError::StateStore(_) => {
            "STATE_ERROR"
        }
        CommandError::Export(_) => "EXPORT_ERROR",
        CommandError::Data(_) => "DATA_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    ExitCode::from(exit_status(e))
}

fn exit_status(e: &CommandError) -> u8 {
    match e {
        CommandError::Config(_) => 5,
        CommandError::Filter(_) => 1,
        CommandError::Tracker(TrackerError::Filter(_)) => 1,
        CommandError::Tracker(TrackerError::NotFound { .. }) => 4,
        CommandError::Tracker(TrackerError::Store(_)) => 5,
        CommandError::StateStore(_) => 5,
        CommandError::Export(_) => 3,
        CommandError::Data(_) => 3,
        CommandError::Io(_) => 3,
        CommandError::Json(_) => 1,
    }
}
