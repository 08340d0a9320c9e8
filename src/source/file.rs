//! Single-file reads.

use crate::model::error::FileError;
use crate::model::LogFile;
use std::path::Path;

/// Read one log file in full.
///
/// The handle is opened and released inside this call. Bytes that are not
/// valid UTF-8 are replaced, so the only failures are I/O failures.
///
/// # Errors
///
/// Returns `FileError` when the file cannot be opened or read.
pub fn read_log_file(path: &Path) -> Result<LogFile, FileError> {
    let bytes = std::fs::read(path).map_err(|source| FileError {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(LogFile::from_bytes(file_name_of(path), &bytes))
}

/// File name component as text, falling back to the whole path.
pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn reads_name_and_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("2025-08-30__000000.log");
        fs::write(&path, "transaction: {a: 1}\n").unwrap();

        let file = read_log_file(&path).unwrap();

        assert_eq!(file.name(), "2025-08-30__000000.log");
        assert_eq!(file.text(), "transaction: {a: 1}\n");
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.log");
        fs::write(&path, b"transaction: {a: '\xff'}").unwrap();

        let file = read_log_file(&path).unwrap();

        assert!(file.text().contains('\u{FFFD}'));
    }

    #[test]
    fn missing_file_is_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.log");

        let err = read_log_file(&path).unwrap_err();

        assert_eq!(err.path, path);
        assert_eq!(err.source.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn directory_is_file_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_log_file(dir.path()).is_err());
    }
}
