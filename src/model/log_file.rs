//! Read-only log input.

/// One log file's name and text.
///
/// The text is decoded from bytes lossily: invalid UTF-8 sequences are
/// replaced with U+FFFD rather than failing the read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    name: String,
    text: String,
}

impl LogFile {
    /// Wrap already-decoded text.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Decode raw bytes, replacing invalid sequences.
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(name, String::from_utf8_lossy(bytes).into_owned())
    }

    /// File name used for provenance and date derivation.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full text of the file.
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_replaces_invalid_utf8() {
        let file = LogFile::from_bytes("bad.log", b"ok \xff\xfe done");
        assert_eq!(file.name(), "bad.log");
        assert!(file.text().starts_with("ok "));
        assert!(file.text().ends_with(" done"));
        assert!(file.text().contains('\u{FFFD}'));
    }

    #[test]
    fn from_bytes_keeps_valid_text() {
        let file = LogFile::from_bytes("a.log", "transaction: {a: 1}".as_bytes());
        assert_eq!(file.text(), "transaction: {a: 1}");
    }
}
