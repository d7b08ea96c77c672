//! Config file handling and the `config` subcommands.
//!
//! The file lives at `~/.config/opp/config.toml` unless `OPP_CONFIG` or
//! `XDG_CONFIG_HOME` point elsewhere. Command-line flags win over it.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};

use super::{CommandContext, CommandError, Result};

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Upper bound accepted for `filters.debounce_ms`.
const MAX_DEBOUNCE_MS: u64 = 10_000;

/// Configuration file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version for migrations.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Alternative dataset file (can also use --data or OPP_DATA).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<PathBuf>,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Filter settings.
    #[serde(default)]
    pub filters: FiltersConfig,

    /// Export settings.
    #[serde(default)]
    pub export: ExportConfig,
}

/// Returns the current config version (used by serde default).
fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            data: None,
            output: OutputConfig::default(),
            filters: FiltersConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

/// Filter configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FiltersConfig {
    /// Debounce delay for committed filters, in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debounce_ms: Option<u64>,
}

/// Export configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Default directory for CSV files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

/// XDG-style config directory, `~/.config/opp` on every platform.
fn config_dir() -> Result<PathBuf> {
    match env::var_os("XDG_CONFIG_HOME") {
        Some(xdg) if !xdg.is_empty() => Ok(PathBuf::from(xdg).join("opp")),
        _ => BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".config").join("opp"))
            .ok_or_else(|| CommandError::Config("could not determine config directory".to_string())),
    }
}

/// Resolves the config file path. `OPP_CONFIG` names the file directly.
pub fn get_config_path() -> Result<PathBuf> {
    match env::var_os("OPP_CONFIG") {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => Ok(config_dir()?.join("config.toml")),
    }
}

/// Loads the configuration from disk.
///
/// A missing file yields the defaults.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    migrate_config(config)
}

/// Migrates config to current version if needed.
fn migrate_config(mut config: Config) -> Result<Config> {
    if config.version > CONFIG_VERSION {
        tracing::warn!(
            version = config.version,
            supported = CONFIG_VERSION,
            "config file is newer than this build, reading it as the current version"
        );
    }
    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Saves the configuration to disk.
fn save_config(config: &Config) -> Result<()> {
    let path = get_config_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CommandError::Config(format!("Failed to create config directory: {}", e))
        })?;
    }

    let content = toml::to_string_pretty(config)
        .map_err(|e| CommandError::Config(format!("Failed to serialize config: {}", e)))?;

    fs::write(&path, content)
        .map_err(|e| CommandError::Config(format!("Failed to write config: {}", e)))?;

    tracing::debug!(path = %path.display(), "config saved");
    Ok(())
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let config = load_config()?;
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        print!(
            "{}",
            format_config(&config, &path, path.exists(), ctx.use_colors)
        );
    }

    Ok(())
}

/// Renders the effective settings, one `key = value` line per set key.
fn format_config(config: &Config, path: &Path, exists: bool, use_colors: bool) -> String {
    let mut out = String::new();
    let header = "Configuration";
    if use_colors {
        out.push_str(&format!("{}\n", header.green().bold()));
    } else {
        out.push_str(header);
        out.push('\n');
    }
    out.push_str(&format!("File: {}\n", path.display()));

    if !exists {
        out.push_str("(not created yet; 'opp config set <key> <value>' writes it)\n");
        return out;
    }

    let mut settings: Vec<(&str, String)> = Vec::new();
    if let Some(data) = &config.data {
        settings.push(("data", data.display().to_string()));
    }
    if let Some(color) = config.output.color {
        settings.push(("output.color", color.to_string()));
    }
    if let Some(ms) = config.filters.debounce_ms {
        settings.push(("filters.debounce_ms", ms.to_string()));
    }
    if let Some(dir) = &config.export.directory {
        settings.push(("export.directory", dir.display().to_string()));
    }

    if settings.is_empty() {
        out.push_str("(no settings; defaults apply)\n");
    }
    for (key, value) in settings {
        out.push_str(&format!("  {key} = {value}\n"));
    }
    out
}

/// Options for the config set command.
pub struct ConfigSetOptions {
    /// Configuration key.
    pub key: String,
    /// Configuration value.
    pub value: String,
}

/// Executes the config set command.
pub fn execute_set(ctx: &CommandContext, opts: &ConfigSetOptions) -> Result<()> {
    let mut config = load_config()?;
    let path = get_config_path()?;

    apply_setting(&mut config, &opts.key, &opts.value)?;
    save_config(&config)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "success",
            "key": opts.key,
            "value": opts.value,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Set {} = {}", opts.key, opts.value);
    }

    Ok(())
}

/// Updates one key of `config`.
fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let (section, field) = match key.split_once('.') {
        Some((section, field)) => (Some(section), field),
        None => (None, key),
    };

    match (section, field) {
        (None, "data") => {
            config.data = Some(PathBuf::from(value));
        }
        (Some("output"), "color") => {
            config.output.color = Some(parse_bool(value)?);
        }
        (Some("filters"), "debounce_ms") => {
            let ms: u64 = value.parse().map_err(|_| {
                CommandError::Config(format!(
                    "Invalid debounce_ms value '{}'. Use a whole number of milliseconds",
                    value
                ))
            })?;
            if ms > MAX_DEBOUNCE_MS {
                return Err(CommandError::Config(format!(
                    "debounce_ms must be at most {}",
                    MAX_DEBOUNCE_MS
                )));
            }
            config.filters.debounce_ms = Some(ms);
        }
        (Some("export"), "directory") => {
            config.export.directory = Some(PathBuf::from(value));
        }
        _ => {
            return Err(CommandError::Config(format!(
                "Unknown config key '{}'. Valid keys: data, output.color, filters.debounce_ms, export.directory",
                key
            )));
        }
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

/// Accepts true/false, yes/no, on/off and 1/0 in any case.
fn parse_bool(value: &str) -> Result<bool> {
    const TRUE: [&str; 4] = ["true", "yes", "on", "1"];
    const FALSE: [&str; 4] = ["false", "no", "off", "0"];

    let lowered = value.trim().to_ascii_lowercase();
    if TRUE.contains(&lowered.as_str()) {
        Ok(true)
    } else if FALSE.contains(&lowered.as_str()) {
        Ok(false)
    } else {
        Err(CommandError::Config(format!(
            "'{value}' is not a boolean (try true or false)"
        )))
    }
}
