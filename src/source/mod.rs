//! Log input sources.
//!
//! This module lists the files of an input directory and reads them:
//! - Directory listing in stable, lexicographic file-name order
//! - Optional extension filter
//! - Lossy single-file reads (see [`file`])

use crate::model::error::InputError;
use std::path::{Path, PathBuf};

pub mod file;

pub use file::read_log_file;

/// List the log files directly inside `dir`.
///
/// Only entries that are regular files (after following symlinks) are
/// returned; subdirectories are not descended into. When `extension` is
/// non-empty, only files with exactly that extension (without the dot) are
/// kept. Results are sorted by file name.
///
/// # Errors
///
/// Returns `InputError::DirectoryNotFound` if `dir` does not exist,
/// `InputError::NotADirectory` if it is not a directory, and
/// `InputError::Io` if it cannot be listed.
pub fn list_log_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, InputError> {
    if !dir.exists() {
        return Err(InputError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    if !dir.is_dir() {
        return Err(InputError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_extension(&path, extension) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    if extension.is_empty() {
        return true;
    }
    path.extension().is_some_and(|ext| ext == extension)
}
