//! Command dispatch module for routing CLI commands to their handlers.
//!
//! Commands split in two groups: standalone commands that never touch the
//! dataset or the persisted state, and tracker commands that open both.

use crate::cli::{Cli, Commands, ConfigCommands, FilterArgs, PresetCommands, Shell, SortArg};
use crate::commands::{self, CommandContext, CommandError, Result};

/// Trait for commands that run without opening the tracker.
pub trait StandaloneCommand {
    /// Execute the command.
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Trait for commands that operate on the application collection.
#[allow(async_fn_in_trait)]
pub trait TrackerCommand {
    /// Execute the command.
    async fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Commands that don't need the dataset.
pub enum StandaloneDispatch<'a> {
    Config(&'a Option<ConfigCommands>),
    Completions(&'a Shell),
    Options,
    Help,
}

impl<'a> StandaloneDispatch<'a> {
    /// Try to create a standalone dispatch from the CLI command.
    /// Returns None if the command needs the tracker.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(shell)),
            Some(Commands::Options) => Some(Self::Options),
            None => Some(Self::Help),
            _ => None,
        }
    }
}

impl StandaloneCommand for StandaloneDispatch<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::Options => commands::options::execute(ctx),
            Self::Help => {
                if !ctx.quiet {
                    println!("opp - federal opportunity tracker");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

/// Dispatch config subcommands.
fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
    }
}

/// Commands that open the tracker.
pub enum TrackerDispatch<'a> {
    List {
        filters: &'a FilterArgs,
        sort: Option<SortArg>,
        desc: bool,
        asc: bool,
        limit: Option<usize>,
    },
    Show(&'a str),
    Submit(&'a str),
    Dashboard(&'a FilterArgs),
    Export {
        filters: &'a FilterArgs,
        output_dir: &'a Option<std::path::PathBuf>,
    },
    Share(&'a FilterArgs),
    Preset(&'a PresetCommands),
    Theme {
        dark: bool,
        light: bool,
    },
    Session,
}

impl<'a> TrackerDispatch<'a> {
    /// Create a tracker dispatch from the CLI command.
    /// Returns None for standalone commands (use StandaloneDispatch first).
    pub fn from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::List {
                filters,
                sort,
                desc,
                asc,
                limit,
            }) => Some(Self::List {
                filters,
                sort: *sort,
                desc: *desc,
                asc: *asc,
                limit: *limit,
            }),
            Some(Commands::Show { id }) => Some(Self::Show(id)),
            Some(Commands::Submit { id }) => Some(Self::Submit(id)),
            Some(Commands::Dashboard { filters }) => Some(Self::Dashboard(filters)),
            Some(Commands::Export {
                filters,
                output_dir,
            }) => Some(Self::Export {
                filters,
                output_dir,
            }),
            Some(Commands::Share { filters }) => Some(Self::Share(filters)),
            Some(Commands::Preset { command }) => Some(Self::Preset(command)),
            Some(Commands::Theme { dark, light }) => Some(Self::Theme {
                dark: *dark,
                light: *light,
            }),
            Some(Commands::Session) => Some(Self::Session),
            // Already handled by StandaloneDispatch
            Some(Commands::Config { .. })
            | Some(Commands::Completions { .. })
            | Some(Commands::Options)
            | None => None,
        }
    }
}

impl TrackerCommand for TrackerDispatch<'_> {
    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::List {
                filters,
                sort,
                desc,
                asc,
                limit,
            } => {
                let opts = commands::list::ListOptions {
                    filters: (*filters).clone(),
                    sort: *sort,
                    desc: *desc,
                    asc: *asc,
                    limit: *limit,
                };
                commands::list::execute(ctx, &opts)
            }
            Self::Show(id) => commands::show::execute(ctx, id),
            Self::Submit(id) => commands::submit::execute(ctx, id),
            Self::Dashboard(filters) => commands::dashboard::execute(ctx, filters),
            Self::Export {
                filters,
                output_dir,
            } => {
                let opts = commands::export::ExportOptions {
                    filters: (*filters).clone(),
                    output_dir: (*output_dir).clone(),
                };
                commands::export::execute(ctx, &opts).await
            }
            Self::Share(filters) => commands::share::execute(ctx, filters),
            Self::Preset(command) => match command {
                PresetCommands::Save { name, filters } => {
                    commands::preset::execute_save(ctx, name.as_deref(), filters)
                }
                PresetCommands::Show => commands::preset::execute_show(ctx),
                PresetCommands::Clear => commands::preset::execute_clear(ctx),
            },
            Self::Theme { dark, light } => {
                let requested = match (dark, light) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                };
                commands::theme::execute(ctx, requested)
            }
            Self::Session => commands::session::execute(ctx).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_standalone_commands() {
        for args in [
            vec!["opp"],
            vec!["opp", "config"],
            vec!["opp", "config", "path"],
            vec!["opp", "completions", "zsh"],
            vec!["opp", "options"],
        ] {
            let cli = parse(&args);
            assert!(
                StandaloneDispatch::try_from_cli(&cli).is_some(),
                "{args:?} should be standalone"
            );
            assert!(TrackerDispatch::from_cli(&cli).is_none());
        }
    }

    #[test]
    fn test_tracker_commands() {
        for args in [
            vec!["opp", "list"],
            vec!["opp", "show", "APP-001"],
            vec!["opp", "submit", "APP-002"],
            vec!["opp", "dashboard"],
            vec!["opp", "export"],
            vec!["opp", "share", "--agency", "GSA"],
            vec!["opp", "preset", "show"],
            vec!["opp", "theme", "--dark"],
            vec!["opp", "session"],
        ] {
            let cli = parse(&args);
            assert!(
                StandaloneDispatch::try_from_cli(&cli).is_none(),
                "{args:?} should need the tracker"
            );
            assert!(TrackerDispatch::from_cli(&cli).is_some());
        }
    }

    #[test]
    fn test_list_dispatch_carries_flags() {
        let cli = parse(&["opp", "list", "--sort", "fit", "--desc", "--limit", "3"]);
        match TrackerDispatch::from_cli(&cli) {
            Some(TrackerDispatch::List {
                sort, desc, limit, ..
            }) => {
                assert_eq!(sort, Some(SortArg::Fit));
                assert!(desc);
                assert_eq!(limit, Some(3));
            }
            _ => panic!("expected list dispatch"),
        }
    }

    #[test]
    fn test_theme_dispatch() {
        let cli = parse(&["opp", "theme", "--light"]);
        assert!(matches!(
            TrackerDispatch::from_cli(&cli),
            Some(TrackerDispatch::Theme {
                dark: false,
                light: true
            })
        ));
    }
}
