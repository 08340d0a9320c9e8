//! txnlog - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use txnlog::config::{CliOverrides, ResolvedConfig};
use txnlog::model::AppError;
use txnlog::output::OutputFormat;

/// Extract transaction records from a directory of log files
#[derive(Parser, Debug)]
#[command(name = "txnlog")]
#[command(version)]
#[command(about = "Extract embedded transaction records from log files into CSV or JSON Lines")]
pub struct Args {
    /// Directory of extracted log files [default: logs_extracted]
    pub input_dir: Option<PathBuf>,

    /// Output file, or "-" for stdout [default: transactions.csv]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Only scan files with this extension ("" scans every file)
    #[arg(short, long)]
    pub extension: Option<String>,

    /// Worker threads (1 disables parallel scanning, 0 uses one per CPU)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            input_dir: self.input_dir.clone(),
            output_path: self.output.clone(),
            format: self.format,
            extension: self.extension.clone(),
            jobs: self.jobs,
        }
    }
}

/// Resolve configuration: Defaults → Config File → Env Vars → CLI Args.
fn resolve_config(args: &Args) -> Result<ResolvedConfig, AppError> {
    let config_file = txnlog::config::load_config_with_precedence(args.config.clone())?;
    let merged = txnlog::config::merge_config(config_file);
    let with_env = txnlog::config::apply_env_overrides(merged);
    Ok(txnlog::config::apply_cli_overrides(with_env, args.overrides()))
}

fn run(args: Args) -> Result<(), AppError> {
    let config = resolve_config(&args)?;

    txnlog::logging::init(&config.log_file_path)?;
    info!(config = ?config, "Configuration loaded and resolved");

    let report = txnlog::run_batch(&config.input_dir, &config.batch_options())?;

    for path in &report.skipped_files {
        eprintln!("[WARN] Skipped unreadable file {}", path.display());
    }

    if report.corpus.is_empty() {
        txnlog::output::clear_output(&config.output_path)?;
        info!(output = %config.output_path.display(), "No transactions found");
        eprintln!("[INFO] No transactions found in {}", config.input_dir.display());
        return Ok(());
    }

    txnlog::output::write_to_path(&report.corpus, config.format, &config.output_path)?;
    info!(
        records = report.corpus.len(),
        output = %config.output_path.display(),
        "Corpus written"
    );
    eprintln!(
        "[OK] Wrote {} transactions from {} files to {}",
        report.corpus.len(),
        report.files_scanned,
        config.output_path.display()
    );
    Ok(())
}

fn main() -> std::process::ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Run failed");
            eprintln!("[ERROR] {}", err);
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["txnlog", "--help"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["txnlog", "--version"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["txnlog"]);
        assert_eq!(args.input_dir, None);
        assert_eq!(args.output, None);
        assert_eq!(args.format, None);
        assert_eq!(args.extension, None);
        assert_eq!(args.jobs, None);
        assert_eq!(args.config, None);
        assert_eq!(args.overrides(), CliOverrides::default());
    }

    #[test]
    fn test_input_dir_positional() {
        let args = Args::parse_from(["txnlog", "logs_extracted"]);
        assert_eq!(args.input_dir, Some(PathBuf::from("logs_extracted")));
    }

    #[test]
    fn test_output_short_and_long() {
        let args = Args::parse_from(["txnlog", "-o", "-"]);
        assert_eq!(args.output, Some(PathBuf::from("-")));
        let args = Args::parse_from(["txnlog", "--output", "out.csv"]);
        assert_eq!(args.output, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn test_format_values() {
        let args = Args::parse_from(["txnlog", "--format", "jsonl"]);
        assert_eq!(args.format, Some(OutputFormat::Jsonl));
        let args = Args::parse_from(["txnlog", "-f", "csv"]);
        assert_eq!(args.format, Some(OutputFormat::Csv));
    }

    #[test]
    fn test_format_invalid_rejects() {
        let result = Args::try_parse_from(["txnlog", "--format", "xml"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_jobs_rejects_negative() {
        assert!(Args::try_parse_from(["txnlog", "--jobs", "-1"]).is_err());
    }

    #[test]
    fn test_empty_extension_is_allowed() {
        let args = Args::parse_from(["txnlog", "--extension", ""]);
        assert_eq!(args.extension, Some(String::new()));
    }

    #[test]
    fn test_combined_flags_flow_into_overrides() {
        let args = Args::parse_from([
            "txnlog",
            "in",
            "-o",
            "out.jsonl",
            "--format",
            "jsonl",
            "-e",
            "txt",
            "-j",
            "4",
            "--config",
            "/custom/config.toml",
        ]);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
        assert_eq!(
            args.overrides(),
            CliOverrides {
                input_dir: Some(PathBuf::from("in")),
                output_path: Some(PathBuf::from("out.jsonl")),
                format: Some(OutputFormat::Jsonl),
                extension: Some("txt".to_string()),
                jobs: Some(4),
            }
        );
    }

    #[test]
    fn test_cli_overrides_win_over_config_file() {
        use txnlog::config::{apply_cli_overrides, merge_config, ConfigFile};

        let config_file = ConfigFile {
            output_path: Some(PathBuf::from("from-file.csv")),
            ..ConfigFile::default()
        };
        let args = Args::parse_from(["txnlog", "-o", "from-cli.csv"]);

        let resolved = apply_cli_overrides(merge_config(Some(config_file)), args.overrides());
        assert_eq!(resolved.output_path, PathBuf::from("from-cli.csv"));
    }
}
