//! Configuration file loading with precedence handling.

use crate::driver::BatchOptions;
use crate::output::OutputFormat;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "TXNLOG_CONFIG";
/// Environment variable overriding the input directory.
pub const INPUT_DIR_ENV: &str = "TXNLOG_INPUT_DIR";
/// Environment variable overriding the output path.
pub const OUTPUT_ENV: &str = "TXNLOG_OUTPUT";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/txnlog/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Directory holding the extracted log files.
    #[serde(default)]
    pub input_dir: Option<PathBuf>,

    /// Extension filter for log files, without the dot ("" = all files).
    #[serde(default)]
    pub extension: Option<String>,

    /// Destination of the corpus ("-" = stdout).
    #[serde(default)]
    pub output_path: Option<PathBuf>,

    /// Output format ("csv" or "jsonl").
    #[serde(default)]
    pub format: Option<OutputFormat>,

    /// Parse files concurrently.
    #[serde(default)]
    pub parallel: Option<bool>,

    /// Worker threads when parallel (0 = one per CPU).
    #[serde(default)]
    pub jobs: Option<usize>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Directory holding the extracted log files.
    pub input_dir: PathBuf,
    /// Extension filter, without the dot.
    pub extension: String,
    /// Output destination.
    pub output_path: PathBuf,
    /// Output format.
    pub format: OutputFormat,
    /// Parse files concurrently.
    pub parallel: bool,
    /// Worker threads when parallel.
    pub jobs: usize,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("logs_extracted"),
            extension: "log".to_string(),
            output_path: PathBuf::from("transactions.csv"),
            format: OutputFormat::Csv,
            parallel: true,
            jobs: 0,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Driver options carried by this configuration.
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            extension: self.extension.clone(),
            parallel: self.parallel,
            jobs: self.jobs,
        }
    }
}

/// Overrides collected from command-line arguments.
///
/// `None` means the flag was not given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// Positional input directory.
    pub input_dir: Option<PathBuf>,
    /// `--output`.
    pub output_path: Option<PathBuf>,
    /// `--format`.
    pub format: Option<OutputFormat>,
    /// `--extension`.
    pub extension: Option<String>,
    /// `--jobs`.
    pub jobs: Option<usize>,
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/txnlog/txnlog.log` on Linux, or the platform's
/// state directory elsewhere. Falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("txnlog").join("txnlog.log")
    } else {
        PathBuf::from("txnlog.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/txnlog/config.toml` on Linux, the platform config
/// directory elsewhere, or `None` if it cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("txnlog").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `TXNLOG_CONFIG` environment variable
/// 3. Default path `~/.config/txnlog/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        input_dir: config.input_dir.unwrap_or(defaults.input_dir),
        extension: config.extension.unwrap_or(defaults.extension),
        output_path: config.output_path.unwrap_or(defaults.output_path),
        format: config.format.unwrap_or(defaults.format),
        parallel: config.parallel.unwrap_or(defaults.parallel),
        jobs: config.jobs.unwrap_or(defaults.jobs),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `TXNLOG_INPUT_DIR`: Override input directory
/// - `TXNLOG_OUTPUT`: Override output path
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(dir) = std::env::var(INPUT_DIR_ENV) {
        config.input_dir = PathBuf::from(dir);
    }

    if let Ok(output) = std::env::var(OUTPUT_ENV) {
        config.output_path = PathBuf::from(output);
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only flags that were explicitly given are applied. `--jobs 1` turns
/// parallel scanning off; any other value turns it on.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(dir) = cli.input_dir {
        config.input_dir = dir;
    }

    if let Some(output) = cli.output_path {
        config.output_path = output;
    }

    if let Some(format) = cli.format {
        config.format = format;
    }

    if let Some(extension) = cli.extension {
        config.extension = extension;
    }

    if let Some(jobs) = cli.jobs {
        config.jobs = jobs;
        config.parallel = jobs != 1;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
