//! Error types for txnlog.
//!
//! Errors are layered with `thiserror` and compose via `?` and `From`
//! conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned by the binary
//!   - [`InputError`] - The input directory is missing or cannot be listed
//!   - [`OutputError`] - The corpus cannot be written
//!   - [`ConfigError`](crate::config::ConfigError) - Config file unreadable or invalid
//!   - [`LoggingError`](crate::logging::LoggingError) - Tracing setup failed
//! - [`FileError`] - A single log file could not be read
//!
//! # Error Recovery Strategy
//!
//! Extraction itself never fails: unterminated and empty blocks are reported
//! as counts in [`Extraction`](crate::parser::Extraction), and values that do
//! not coerce cleanly stay strings. A [`FileError`] is recorded by the batch
//! driver and the file is skipped; remaining files are still processed.
//! Only a missing input directory, a bad config file or a failed write
//! abort the run.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// All domain-specific errors convert into `AppError` via `From`, so `main`
/// can use `?` throughout.
#[derive(Debug, Error)]
pub enum AppError {
    /// The input directory could not be used.
    ///
    /// **Recovery**: fatal. Report the path and exit non-zero.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// The configuration file exists but is unreadable or malformed.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing could not be initialized.
    #[error("Logging setup failed: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// The corpus could not be written.
    #[error("Failed to write output: {0}")]
    Output(#[from] OutputError),
}

/// Errors reading the input directory itself.
///
/// These are boundary preconditions rather than parsing failures: without a
/// listable directory there is nothing to scan.
#[derive(Debug, Error)]
pub enum InputError {
    /// The input directory does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use txnlog::model::error::InputError;
    ///
    /// let err = InputError::DirectoryNotFound {
    ///     path: PathBuf::from("/tmp/missing-logs"),
    /// };
    /// assert!(err.to_string().contains("/tmp/missing-logs"));
    /// ```
    #[error("Input directory not found: {path}")]
    DirectoryNotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// The input path exists but is not a directory.
    #[error("Input path is not a directory: {path}")]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// Listing the directory failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single log file that could not be read.
///
/// Non-fatal: the batch driver logs it, counts it as skipped and continues
/// with the next file.
#[derive(Debug, Error)]
#[error("Failed to read {path}: {source}")]
pub struct FileError {
    /// Path of the unreadable file.
    pub path: PathBuf,
    /// Underlying I/O error.
    #[source]
    pub source: std::io::Error,
}

/// Errors writing the corpus.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Creating or writing the destination failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be serialized as JSON.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
