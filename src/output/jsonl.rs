//! JSON Lines rendering.

use super::CorpusWriter;
use crate::model::error::OutputError;
use crate::model::Corpus;
use std::io::Write;

/// One JSON object per record, provenance keys first.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLinesWriter;

impl CorpusWriter for JsonLinesWriter {
    fn write_corpus(&self, corpus: &Corpus, out: &mut dyn Write) -> Result<(), OutputError> {
        for record in corpus {
            serde_json::to_writer(&mut *out, record)?;
            out.write_all(b"\n")?;
        }
        Ok(())
    }
}
