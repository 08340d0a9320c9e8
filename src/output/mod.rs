//! Corpus writers.
//!
//! Writers serialize a whole [`Corpus`] at once. The CSV writer computes the
//! union of column names across all records and renders missing fields as
//! empty cells; the JSON Lines writer emits one object per record.

use crate::model::error::OutputError;
use crate::model::Corpus;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub mod csv;
pub mod jsonl;

pub use csv::CsvWriter;
pub use jsonl::JsonLinesWriter;

/// Path value meaning "write to stdout".
pub const STDOUT_PATH: &str = "-";

/// Output format for the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comma-separated values with a header row
    #[default]
    Csv,
    /// One JSON object per line
    Jsonl,
}

impl OutputFormat {
    fn writer(&self) -> Box<dyn CorpusWriter> {
        match self {
            OutputFormat::Csv => Box::new(CsvWriter),
            OutputFormat::Jsonl => Box::new(JsonLinesWriter),
        }
    }
}

/// Serializes a corpus to a byte sink.
pub trait CorpusWriter {
    /// Write every record of `corpus` to `out`.
    fn write_corpus(&self, corpus: &Corpus, out: &mut dyn Write) -> Result<(), OutputError>;
}

/// Write `corpus` in `format` to `out`.
pub fn write_corpus(
    corpus: &Corpus,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<(), OutputError> {
    format.writer().write_corpus(corpus, out)
}

/// Write `corpus` to a file path, or to stdout when the path is `-`.
///
/// An existing file is replaced. Parent directories are created as needed.
///
/// # Errors
///
/// Returns `OutputError` when the destination cannot be created or written.
pub fn write_to_path(corpus: &Corpus, format: OutputFormat, path: &Path) -> Result<(), OutputError> {
    if path == Path::new(STDOUT_PATH) {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write_corpus(corpus, format, &mut out)?;
        out.flush()?;
        return Ok(());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut out = BufWriter::new(File::create(path)?);
    write_corpus(corpus, format, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Remove output left behind by an earlier run.
///
/// Used when a run has nothing to write, so that a stale file is never
/// mistaken for current results. A missing file and stdout (`-`) are
/// no-ops.
///
/// # Errors
///
/// Returns `OutputError::Io` when an existing file cannot be removed.
pub fn clear_output(path: &Path) -> Result<(), OutputError> {
    if path == Path::new(STDOUT_PATH) {
        return Ok(());
    }
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}
