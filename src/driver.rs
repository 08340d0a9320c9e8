//! Batch driver: runs extraction over every file of an input directory.
//!
//! Files are processed in file-name order. With `parallel` enabled, files
//! are parsed on a rayon pool and per-file results are merged back in that
//! same order, so the corpus is identical either way. A file that cannot
//! be read is logged and skipped; it never stops the run.

use crate::model::error::{FileError, InputError};
use crate::model::Corpus;
use crate::parser::{extract_records, Extraction};
use crate::source::{list_log_files, read_log_file};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Knobs for one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Extension filter without the dot; empty keeps every file.
    pub extension: String,
    /// Parse files on a thread pool.
    pub parallel: bool,
    /// Worker count when parallel; 0 lets rayon pick (CPU count).
    pub jobs: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            extension: "log".to_string(),
            parallel: true,
            jobs: 0,
        }
    }
}

/// Everything a batch run produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// All records, in file order then discovery order.
    pub corpus: Corpus,
    /// Files that were read and scanned.
    pub files_scanned: usize,
    /// Files that could not be read.
    pub skipped_files: Vec<PathBuf>,
    /// Matched blocks across all files.
    pub blocks_found: usize,
    /// Blocks that decoded to zero fields.
    pub empty_blocks: usize,
    /// Files whose scan ended at an unterminated block.
    pub unterminated_blocks: usize,
    /// Files whose `YYYY-MM-DD` name prefix is not a real calendar date.
    pub invalid_dates: usize,
}

impl BatchReport {
    /// Number of files skipped as unreadable.
    pub fn files_skipped(&self) -> usize {
        self.skipped_files.len()
    }

    fn absorb(&mut self, path: &Path, outcome: Result<Extraction, FileError>) {
        match outcome {
            Ok(extraction) => {
                self.files_scanned += 1;
                self.blocks_found += extraction.blocks_found;
                self.empty_blocks += extraction.empty_blocks;
                if let Some(offset) = extraction.unterminated_at {
                    self.unterminated_blocks += 1;
                    debug!(
                        file = %path.display(),
                        offset,
                        "Unterminated transaction block, rest of file skipped"
                    );
                }
                // Every record of a file carries the same date token
                if let Some(record) = extraction.records.first() {
                    if !record.date().is_empty() && record.parsed_date().is_none() {
                        self.invalid_dates += 1;
                        warn!(
                            file = %path.display(),
                            date = record.date(),
                            "File name date is not a valid calendar date"
                        );
                    }
                }
                debug!(
                    file = %path.display(),
                    records = extraction.records.len(),
                    "Scanned file"
                );
                self.corpus.extend(extraction.records);
            }
            Err(error) => {
                warn!(file = %error.path.display(), error = %error, "Skipping unreadable file");
                self.skipped_files.push(error.path);
            }
        }
    }
}

/// Read and extract one file.
pub fn process_file(path: &Path) -> Result<Extraction, FileError> {
    let file = read_log_file(path)?;
    Ok(extract_records(&file))
}

/// Run extraction over every matching file in `input_dir`.
///
/// # Errors
///
/// Only a missing or unlistable input directory is an error. Per-file
/// failures are recorded in [`BatchReport::skipped_files`].
pub fn run_batch(input_dir: &Path, options: &BatchOptions) -> Result<BatchReport, InputError> {
    let files = list_log_files(input_dir, &options.extension)?;
    info!(
        dir = %input_dir.display(),
        files = files.len(),
        parallel = options.parallel,
        "Scanning log files"
    );

    let outcomes = if options.parallel && files.len() > 1 {
        process_parallel(&files, options.jobs)
    } else {
        files.iter().map(|path| process_file(path)).collect()
    };

    let mut report = BatchReport::default();
    for (path, outcome) in files.iter().zip(outcomes) {
        report.absorb(path, outcome);
    }

    info!(
        records = report.corpus.len(),
        files_scanned = report.files_scanned,
        files_skipped = report.files_skipped(),
        empty_blocks = report.empty_blocks,
        unterminated_blocks = report.unterminated_blocks,
        invalid_dates = report.invalid_dates,
        "Batch complete"
    );
    Ok(report)
}

/// Per-file results in the same order as `files`.
fn process_parallel(files: &[PathBuf], jobs: usize) -> Vec<Result<Extraction, FileError>> {
    match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
        Ok(pool) => pool.install(|| files.par_iter().map(|path| process_file(path)).collect()),
        Err(error) => {
            warn!(error = %error, "Thread pool unavailable, scanning sequentially");
            files.iter().map(|path| process_file(path)).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldValue;
    use std::fs;

    fn sequential() -> BatchOptions {
        BatchOptions {
            parallel: false,
            ..BatchOptions::default()
        }
    }

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn collects_records_in_file_then_discovery_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.log", "transaction: {n: 3}");
        write(dir.path(), "a.log", "transaction: {n: 1} transaction: {n: 2}");

        let report = run_batch(dir.path(), &sequential()).unwrap();

        let values: Vec<_> = report
            .corpus
            .iter()
            .map(|r| (r.sourcefile().to_string(), r.fields().get("n").cloned()))
            .collect();
        assert_eq!(
            values,
            vec![
                ("a.log".to_string(), Some(FieldValue::Integer(1))),
                ("a.log".to_string(), Some(FieldValue::Integer(2))),
                ("b.log".to_string(), Some(FieldValue::Integer(3))),
            ]
        );
        assert_eq!(report.files_scanned, 2);
        assert_eq!(report.blocks_found, 3);
    }

    #[test]
    fn counts_empty_and_unterminated_blocks() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.log", "transaction: {} transaction: {x: 1}");
        write(dir.path(), "b.log", "transaction: {y: 1} transaction: {z: 2");

        let report = run_batch(dir.path(), &sequential()).unwrap();

        assert_eq!(report.corpus.len(), 2);
        assert_eq!(report.empty_blocks, 1);
        assert_eq!(report.unterminated_blocks, 1);
    }

    #[test]
    fn impossible_file_name_dates_are_counted_but_kept() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "2025-02-30__000000.log", "transaction: {n: 1}");
        write(dir.path(), "2025-08-30__000000.log", "transaction: {n: 2}");
        write(dir.path(), "run.log", "transaction: {n: 3}");

        let report = run_batch(dir.path(), &sequential()).unwrap();

        assert_eq!(report.invalid_dates, 1);
        assert_eq!(report.corpus.len(), 3);
        assert_eq!(report.corpus.records()[0].date(), "2025-02-30");
    }

    #[test]
    fn non_matching_extensions_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.log", "transaction: {n: 1}");
        write(dir.path(), "a.txt", "transaction: {n: 2}");

        let report = run_batch(dir.path(), &sequential()).unwrap();

        assert_eq!(report.corpus.len(), 1);
        assert_eq!(report.files_scanned, 1);
    }

    #[test]
    fn missing_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let result = run_batch(&dir.path().join("absent"), &sequential());
        assert!(matches!(result, Err(InputError::DirectoryNotFound { .. })));
    }

    #[test]
    fn unreadable_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.log", "transaction: {n: 1}");
        write(dir.path(), "c.log", "transaction: {n: 3}");

        let mut report = BatchReport::default();
        let paths = [
            dir.path().join("a.log"),
            dir.path().join("b.log"),
            dir.path().join("c.log"),
        ];
        for path in &paths {
            report.absorb(path, process_file(path));
        }

        assert_eq!(report.corpus.len(), 2);
        assert_eq!(report.files_scanned, 2);
        assert_eq!(report.skipped_files, vec![dir.path().join("b.log")]);
        assert_eq!(report.files_skipped(), 1);
    }

    #[test]
    fn parallel_matches_sequential() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..24 {
            let body = format!("x transaction: {{id: 'tx-{i}', amount: {i}.5}} y transaction: {{k: {i}}}");
            write(dir.path(), &format!("2025-01-{:02}__000000.log", i + 1), &body);
        }

        let seq = run_batch(dir.path(), &sequential()).unwrap();
        let par = run_batch(
            dir.path(),
            &BatchOptions {
                parallel: true,
                jobs: 4,
                ..BatchOptions::default()
            },
        )
        .unwrap();

        assert_eq!(seq, par);
        assert_eq!(par.corpus.len(), 48);
    }
}
