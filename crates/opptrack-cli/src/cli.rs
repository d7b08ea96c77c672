//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the opp CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use opptrack_model::models::{PeriodType, SortField};

/// opp - Track and filter government contracting opportunities
#[derive(Parser, Debug)]
#[command(name = "opp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Load applications from a JSON file instead of the bundled dataset
    #[arg(long, global = true, env = "OPP_DATA")]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List applications matching the filters
    #[command(alias = "l")]
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Sort by field (persisted)
        #[arg(long, value_enum)]
        sort: Option<SortArg>,

        /// Sort descending (persisted)
        #[arg(long, conflicts_with = "asc")]
        desc: bool,

        /// Sort ascending (persisted)
        #[arg(long)]
        asc: bool,

        /// Show at most this many applications
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show application details
    #[command(alias = "s")]
    Show {
        /// Application ID (e.g. APP-001)
        id: String,
    },

    /// Mark a Ready application as Submitted
    Submit {
        /// Application ID
        id: String,
    },

    /// Status summary of the filtered view
    #[command(alias = "d")]
    Dashboard {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Export the filtered view as CSV
    Export {
        #[command(flatten)]
        filters: FilterArgs,

        /// Directory to write the CSV file into (default: config or current directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Print the shareable query string for the filters
    Share {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Manage the saved filter preset
    Preset {
        #[command(subcommand)]
        command: PresetCommands,
    },

    /// Show or change the color theme
    Theme {
        /// Switch to dark mode
        #[arg(long, conflicts_with = "light")]
        dark: bool,

        /// Switch to light mode
        #[arg(long)]
        light: bool,
    },

    /// List the values each filter offers
    Options,

    /// Interactive session reading commands from stdin
    Session,

    /// View or edit configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Filter criteria shared by the view commands.
///
/// `--url` and `--preset` supply a base; individual flags override it.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// NAICS code
    #[arg(long)]
    pub naics: Option<String>,

    /// Set-aside category (repeatable, any match)
    #[arg(long, action = clap::ArgAction::Append)]
    pub set_aside: Vec<String>,

    /// Contract vehicle
    #[arg(long)]
    pub vehicle: Option<String>,

    /// Agency code (repeatable, any match)
    #[arg(long, action = clap::ArgAction::Append)]
    pub agency: Vec<String>,

    /// Due-date window
    #[arg(long, value_enum)]
    pub period: Option<PeriodArg>,

    /// Custom window start (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// Custom window end (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,

    /// Minimum contract ceiling in dollars
    #[arg(long)]
    pub min_ceiling: Option<String>,

    /// Maximum contract ceiling in dollars
    #[arg(long)]
    pub max_ceiling: Option<String>,

    /// Keyword to match in title or tags (repeatable, any match)
    #[arg(short, long, action = clap::ArgAction::Append)]
    pub keyword: Vec<String>,

    /// Start from a shared query string
    #[arg(long, conflicts_with = "preset")]
    pub url: Option<String>,

    /// Start from the saved preset
    #[arg(long)]
    pub preset: bool,

    /// Only applications due in the next 30 days
    #[arg(long)]
    pub due30: bool,

    /// Only GSA applications
    #[arg(long)]
    pub gsa_only: bool,

    /// Only applications with a fit score of 80 or more
    #[arg(long)]
    pub high_fit: bool,
}

/// Sort fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    /// Due date
    Due,
    /// Percent complete
    Progress,
    /// Fit score
    Fit,
}

impl From<SortArg> for SortField {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Due => SortField::DueDate,
            SortArg::Progress => SortField::PercentComplete,
            SortArg::Fit => SortField::FitScore,
        }
    }
}

/// Due-date windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PeriodArg {
    /// Next 30 days
    #[value(name = "30")]
    Next30,
    /// Next 60 days
    #[value(name = "60")]
    Next60,
    /// Next 90 days
    #[value(name = "90")]
    Next90,
    /// Use --start and --end
    Custom,
}

impl From<PeriodArg> for PeriodType {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Next30 => PeriodType::Next30,
            PeriodArg::Next60 => PeriodType::Next60,
            PeriodArg::Next90 => PeriodType::Next90,
            PeriodArg::Custom => PeriodType::Custom,
        }
    }
}

/// Preset subcommands
#[derive(Subcommand, Debug)]
pub enum PresetCommands {
    /// Save the given filters as the preset
    Save {
        /// Preset name
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Show the saved preset
    Show,
    /// Delete the saved preset
    Clear,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Config key (e.g. output.color, filters.debounce_ms)
        key: String,
        /// Config value
        value: String,
    },
    /// Show config file path
    Path,
}

/// Shell types for completions
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["opp", "--json", "--no-color", "list"]);
        assert!(cli.json);
        assert!(cli.no_color);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        let result = Cli::try_parse_from(["opp", "-v", "-q", "list"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_list_alias() {
        let cli = Cli::parse_from(["opp", "l"]);
        assert!(matches!(cli.command, Some(Commands::List { .. })));
    }

    #[test]
    fn test_show_alias() {
        let cli = Cli::parse_from(["opp", "s", "APP-001"]);
        assert!(matches!(cli.command, Some(Commands::Show { .. })));
    }

    #[test]
    fn test_list_with_filters() {
        let cli = Cli::parse_from([
            "opp",
            "list",
            "--agency",
            "GSA",
            "--agency",
            "USDA",
            "--set-aside",
            "WOSB",
            "--period",
            "60",
            "--max-ceiling",
            "5000000",
            "-k",
            "cloud",
            "--high-fit",
            "--sort",
            "fit",
            "--desc",
            "--limit",
            "5",
        ]);
        if let Some(Commands::List {
            filters,
            sort,
            desc,
            asc,
            limit,
        }) = cli.command
        {
            assert_eq!(filters.agency, vec!["GSA", "USDA"]);
            assert_eq!(filters.set_aside, vec!["WOSB"]);
            assert_eq!(filters.period, Some(PeriodArg::Next60));
            assert_eq!(filters.max_ceiling, Some("5000000".to_string()));
            assert_eq!(filters.keyword, vec!["cloud"]);
            assert!(filters.high_fit);
            assert!(!filters.due30);
            assert_eq!(sort, Some(SortArg::Fit));
            assert!(desc);
            assert!(!asc);
            assert_eq!(limit, Some(5));
        } else {
            panic!("Expected List command");
        }
    }

    #[test]
    fn test_desc_and_asc_conflict() {
        let result = Cli::try_parse_from(["opp", "list", "--desc", "--asc"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_url_and_preset_conflict() {
        let result = Cli::try_parse_from(["opp", "list", "--url", "naics=541512", "--preset"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_period_rejected() {
        let result = Cli::try_parse_from(["opp", "list", "--period", "45"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_export_output_dir() {
        let cli = Cli::parse_from(["opp", "export", "--gsa-only", "-o", "/tmp/reports"]);
        if let Some(Commands::Export {
            filters,
            output_dir,
        }) = cli.command
        {
            assert!(filters.gsa_only);
            assert_eq!(output_dir, Some(PathBuf::from("/tmp/reports")));
        } else {
            panic!("Expected Export command");
        }
    }

    #[test]
    fn test_preset_save_with_name() {
        let cli = Cli::parse_from(["opp", "preset", "save", "--name", "GSA only", "--agency", "GSA"]);
        if let Some(Commands::Preset {
            command: PresetCommands::Save { name, filters },
        }) = cli.command
        {
            assert_eq!(name, Some("GSA only".to_string()));
            assert_eq!(filters.agency, vec!["GSA"]);
        } else {
            panic!("Expected Preset Save command");
        }
    }

    #[test]
    fn test_theme_flags_conflict() {
        assert!(Cli::try_parse_from(["opp", "theme", "--dark", "--light"]).is_err());
        let cli = Cli::parse_from(["opp", "theme", "--dark"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Theme {
                dark: true,
                light: false
            })
        ));
    }

    #[test]
    fn test_config_subcommands() {
        let cli = Cli::parse_from(["opp", "config", "set", "filters.debounce_ms", "150"]);
        if let Some(Commands::Config {
            command: Some(ConfigCommands::Set { key, value }),
        }) = cli.command
        {
            assert_eq!(key, "filters.debounce_ms");
            assert_eq!(value, "150");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn test_completions_command() {
        let cli = Cli::parse_from(["opp", "completions", "zsh"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Completions { shell: Shell::Zsh })
        ));
    }

    #[test]
    fn test_sort_arg_maps_to_field() {
        assert_eq!(SortField::from(SortArg::Due), SortField::DueDate);
        assert_eq!(SortField::from(SortArg::Progress), SortField::PercentComplete);
        assert_eq!(SortField::from(SortArg::Fit), SortField::FitScore);
    }
}
