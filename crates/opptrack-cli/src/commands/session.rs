//! Session command implementation.
//!
//! A line-driven controller over stdin. Edits go to the draft, `apply`
//! commits it, and the view only follows once the debounce timer fires, just
//! as it would behind a filter panel. Output is always human-readable.

use std::io::IsTerminal;
use std::io::Write as _;
use std::path::PathBuf;

use chrono::Utc;
use clap::ValueEnum;
use opptrack_model::models::{FilterState, PeriodType, QuickFilter, SortConfig, SortDirection};
use opptrack_query::filter::encode_query_string;
use opptrack_query::{Exporter, FilterContext, LocationPort};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{sleep_until, Instant};

use super::export::export_view;
use super::list::render_view;
use super::submit::submit_and_report;
use super::workspace::{open_tracker, CliTracker};
use super::{CommandContext, Result};
use crate::cli::SortArg;
use crate::output::{format_application_details_table, format_summary_table};

const HELP: &str = "\
Commands:
  set <field> <value>     edit the draft (naics, set-aside, vehicle, agency,
                          period, start, end, min, max); lists are comma-separated
  clear <field>           clear one draft field
  keyword <word>          add a keyword to the draft
  unkeyword <word>        remove a keyword from the draft
  draft                   show the draft as a query string
  apply                   commit the draft
  reset                   restore default filters and clear quick filters
  toggle <due30|gsa|fit>  flip a quick filter
  sort <due|progress|fit> [asc|desc]
  preset save [name] | preset load | preset clear
  list [limit]            show the current view
  show <id>               show one application
  submit <id>             mark a Ready application as Submitted
  dashboard               status summary of the current view
  export [dir]            write the current view as CSV
  url                     print the current query string
  wait                    wait for pending filters to settle
  help                    show this help
  quit                    leave the session";

/// A draft field editable from the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Naics,
    SetAside,
    Vehicle,
    Agency,
    Period,
    Start,
    End,
    MinCeiling,
    MaxCeiling,
}

impl DraftField {
    fn parse(name: &str) -> std::result::Result<Self, String> {
        match name.to_ascii_lowercase().as_str() {
            "naics" => Ok(Self::Naics),
            "set-aside" | "setaside" => Ok(Self::SetAside),
            "vehicle" => Ok(Self::Vehicle),
            "agency" => Ok(Self::Agency),
            "period" => Ok(Self::Period),
            "start" => Ok(Self::Start),
            "end" => Ok(Self::End),
            "min" | "min-ceiling" => Ok(Self::MinCeiling),
            "max" | "max-ceiling" => Ok(Self::MaxCeiling),
            other => Err(format!("unknown field '{other}'")),
        }
    }

    /// Restores the field to its default. A cleared period is custom.
    fn clear(self, draft: &mut FilterState) {
        match self {
            Self::Naics => draft.naics.clear(),
            Self::SetAside => draft.set_aside.clear(),
            Self::Vehicle => draft.vehicle.clear(),
            Self::Agency => draft.agency.clear(),
            Self::Period => draft.period_type = PeriodType::Custom,
            Self::Start => draft.start_date.clear(),
            Self::End => draft.end_date.clear(),
            Self::MinCeiling => draft.min_ceiling.clear(),
            Self::MaxCeiling => draft.max_ceiling.clear(),
        }
    }

    /// Writes `value` into `draft`. An empty value clears the field.
    fn set(self, draft: &mut FilterState, value: &str) -> std::result::Result<(), String> {
        if value.trim().is_empty() {
            self.clear(draft);
            return Ok(());
        }
        let list = || {
            value
                .split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        };
        match self {
            Self::Naics => draft.naics = value.to_string(),
            Self::SetAside => draft.set_aside = list(),
            Self::Vehicle => draft.vehicle = value.to_string(),
            Self::Agency => draft.agency = list(),
            Self::Period => {
                draft.period_type = value.parse::<PeriodType>().map_err(|e| e.to_string())?;
            }
            Self::Start => draft.start_date = value.to_string(),
            Self::End => draft.end_date = value.to_string(),
            Self::MinCeiling => draft.min_ceiling = value.to_string(),
            Self::MaxCeiling => draft.max_ceiling = value.to_string(),
        }
        Ok(())
    }
}

/// One parsed session line.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Set(DraftField, String),
    Clear(DraftField),
    Keyword(String),
    Unkeyword(String),
    Draft,
    Apply,
    Reset,
    Toggle(QuickFilter),
    Sort(SortConfig),
    PresetSave(Option<String>),
    PresetLoad,
    PresetClear,
    List(Option<usize>),
    Show(String),
    Submit(String),
    Dashboard,
    Export(Option<PathBuf>),
    Url,
    Wait,
    Help,
    Quit,
}

/// Parses one input line. Blank lines parse to `None`.
pub fn parse_command(
    line: &str,
    current_sort: SortConfig,
) -> std::result::Result<Option<SessionCommand>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let require = |what: &str| -> std::result::Result<String, String> {
        if rest.is_empty() {
            Err(format!("{verb}: missing {what}"))
        } else {
            Ok(rest.to_string())
        }
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "set" => {
            let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            if field.is_empty() {
                return Err("set: missing field".to_string());
            }
            SessionCommand::Set(DraftField::parse(field)?, value.trim().to_string())
        }
        "clear" => SessionCommand::Clear(DraftField::parse(&require("field")?)?),
        "keyword" => SessionCommand::Keyword(require("keyword")?),
        "unkeyword" => SessionCommand::Unkeyword(require("keyword")?),
        "draft" => SessionCommand::Draft,
        "apply" => SessionCommand::Apply,
        "reset" => SessionCommand::Reset,
        "toggle" => {
            let filter = require("quick filter")?
                .parse::<QuickFilter>()
                .map_err(|e| e.to_string())?;
            SessionCommand::Toggle(filter)
        }
        "sort" => SessionCommand::Sort(parse_sort(rest, current_sort)?),
        "preset" => {
            let (action, name) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            match action {
                "save" => SessionCommand::PresetSave(
                    Some(name.trim().to_string()).filter(|n| !n.is_empty()),
                ),
                "load" => SessionCommand::PresetLoad,
                "clear" => SessionCommand::PresetClear,
                _ => return Err("preset: expected save, load or clear".to_string()),
            }
        }
        "list" | "ls" => {
            let limit = if rest.is_empty() {
                None
            } else {
                Some(
                    rest.parse::<usize>()
                        .map_err(|_| format!("list: invalid limit '{rest}'"))?,
                )
            };
            SessionCommand::List(limit)
        }
        "show" => SessionCommand::Show(require("id")?),
        "submit" => SessionCommand::Submit(require("id")?),
        "dashboard" => SessionCommand::Dashboard,
        "export" => SessionCommand::Export(Some(rest).filter(|r| !r.is_empty()).map(PathBuf::from)),
        "url" => SessionCommand::Url,
        "wait" => SessionCommand::Wait,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };

    Ok(Some(command))
}

fn parse_sort(rest: &str, current: SortConfig) -> std::result::Result<SortConfig, String> {
    let mut parts = rest.split_whitespace();
    let field = parts.next().ok_or("sort: missing field")?;
    let field = SortArg::from_str(field, true).map_err(|_| format!("sort: unknown field '{field}'"))?;

    let direction = match parts.next() {
        None => current.direction,
        Some(dir) => dir
            .parse::<SortDirection>()
            .map_err(|e| format!("sort: {e}"))?,
    };

    Ok(SortConfig::new(field.into(), direction))
}

/// Executes the session command.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded or stdin cannot be read.
/// Errors from individual commands are printed and the session continues.
pub async fn execute(ctx: &CommandContext) -> Result<()> {
    let mut tracker = open_tracker(ctx, None)?;
    let exporter = Exporter::new();
    let interactive = std::io::stdin().is_terminal();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if interactive && !ctx.quiet {
        println!("opp session: {} applications loaded. Type 'help' for commands.", tracker.applications().len());
    }

    loop {
        if interactive {
            print!("> ");
            std::io::stdout().flush()?;
        }

        let deadline = tracker.settle_deadline();
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line, tracker.sort()) {
                    Ok(None) => {}
                    Ok(Some(SessionCommand::Quit)) => break,
                    Ok(Some(command)) => {
                        if let Err(e) = run_command(ctx, &mut tracker, &exporter, command).await {
                            eprintln!("Error: {e}");
                        }
                    }
                    Err(message) => eprintln!("{message}"),
                }
            }
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                if tracker.tick(Instant::now()) && !ctx.quiet {
                    let count = tracker.view(&FilterContext::now()).len();
                    println!("View updated: {count} applications");
                }
            }
        }
    }

    tracker.close();
    Ok(())
}

async fn run_command(
    ctx: &CommandContext,
    tracker: &mut CliTracker,
    exporter: &Exporter,
    command: SessionCommand,
) -> Result<()> {
    let now = Instant::now();
    match command {
        SessionCommand::Set(field, value) => {
            match field.set(tracker.draft_mut(), &value) {
                Ok(()) => print_draft(ctx, tracker.draft())?,
                Err(message) => eprintln!("{message}"),
            }
        }
        SessionCommand::Clear(field) => {
            field.clear(tracker.draft_mut());
            print_draft(ctx, tracker.draft())?;
        }
        SessionCommand::Keyword(word) => {
            tracker.draft_mut().add_keyword(&word);
            print_draft(ctx, tracker.draft())?;
        }
        SessionCommand::Unkeyword(word) => {
            tracker.draft_mut().remove_keyword(&word);
            print_draft(ctx, tracker.draft())?;
        }
        SessionCommand::Draft => print_draft(ctx, tracker.draft())?,
        SessionCommand::Apply => {
            tracker.apply(now)?;
            if !ctx.quiet {
                println!("Applied. Updating in {} ms.", ctx.debounce.as_millis());
            }
        }
        SessionCommand::Reset => {
            tracker.reset(now);
            if !ctx.quiet {
                println!("Filters reset.");
            }
        }
        SessionCommand::Toggle(filter) => {
            let on = tracker.toggle_quick(filter);
            if !ctx.quiet {
                println!("{filter:?} {}", if on { "on" } else { "off" });
            }
        }
        SessionCommand::Sort(sort) => {
            tracker.set_sort(sort)?;
            if !ctx.quiet {
                println!("Sorted by {} ({})", sort.field.label(), sort.direction);
            }
        }
        SessionCommand::PresetSave(name) => {
            tracker.save_preset(name.as_deref(), Utc::now())?;
            if let (Some(preset), false) = (tracker.preset(), ctx.quiet) {
                println!("Saved preset '{}'.", preset.name);
            }
        }
        SessionCommand::PresetLoad => {
            let loaded = tracker.load_preset(now);
            if !ctx.quiet {
                println!("{}", if loaded { "Preset loaded." } else { "No preset saved." });
            }
        }
        SessionCommand::PresetClear => {
            let cleared = tracker.clear_preset()?;
            if !ctx.quiet {
                println!("{}", if cleared { "Preset cleared." } else { "No preset saved." });
            }
        }
        SessionCommand::List(limit) => {
            if !ctx.quiet {
                if tracker.is_settling() {
                    println!("(filters still settling)");
                }
                render_view(ctx, tracker, limit);
            }
        }
        SessionCommand::Show(id) => {
            let app = tracker.find(&id)?;
            if !ctx.quiet {
                let today = FilterContext::now().today();
                print!("{}", format_application_details_table(app, today, ctx.use_colors));
            }
        }
        SessionCommand::Submit(id) => submit_and_report(ctx, tracker, &id)?,
        SessionCommand::Dashboard => {
            if !ctx.quiet {
                let summary = tracker.summary(&FilterContext::now());
                print!("{}", format_summary_table(&summary, ctx.use_colors));
            }
        }
        SessionCommand::Export(dir) => {
            let dir = dir
                .or_else(|| ctx.export_dir.clone())
                .unwrap_or_else(|| PathBuf::from("."));
            export_view(ctx, tracker, exporter, &dir).await?;
        }
        SessionCommand::Url => {
            let query = tracker.location().search();
            if tracker.applied().is_default() {
                println!("(no filters applied)");
            } else {
                println!("?{query}");
            }
        }
        SessionCommand::Wait => {
            if tracker.settle().await && !ctx.quiet {
                let count = tracker.view(&FilterContext::now()).len();
                println!("View updated: {count} applications");
            }
        }
        SessionCommand::Help => println!("{HELP}"),
        SessionCommand::Quit => {}
    }
    Ok(())
}

fn print_draft(ctx: &CommandContext, draft: &FilterState) -> Result<()> {
    if !ctx.quiet {
        if draft.is_default() {
            println!("Draft: (no filters)");
        } else {
            println!("Draft: {}", encode_query_string(draft)?);
        }
    }
    Ok(())
}
