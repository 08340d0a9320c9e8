//! Transaction block extraction.
//!
//! This module provides pure functions for recovering `transaction: { ... }`
//! records from free-form log text:
//!
//! - [`find_block_start`] locates the next marker and its opening brace;
//! - [`match_block`] balances braces with quote/escape awareness;
//! - [`decode_fields`] turns a block body into typed fields;
//! - [`assemble`] attaches `sourcefile`/`date` provenance.
//!
//! [`extract_records`] chains them over a whole file. Extraction never
//! fails: an unterminated block ends the scan of that file (earlier blocks
//! are kept) and an empty block produces no record. Both are reported as
//! counts in [`Extraction`].

pub mod assemble;
pub mod fields;
pub mod locate;
pub mod matcher;

pub use assemble::{assemble, date_token};
pub use fields::{decode_fields, normalize_value};
pub use locate::{find_block_start, MARKER};
pub use matcher::{match_block, RawBlock};

use crate::model::{LogFile, Record};

/// Iterator over the blocks of one text, in left-to-right order.
///
/// Each search resumes just past the previous block, so a marker quoted
/// inside a block body is never treated as a new block. Iteration stops
/// for good at the first unterminated block.
#[derive(Debug, Clone)]
pub struct Blocks<'a> {
    text: &'a str,
    cursor: usize,
    unterminated_at: Option<usize>,
    done: bool,
}

impl<'a> Blocks<'a> {
    /// Start scanning `text` from the beginning.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            cursor: 0,
            unterminated_at: None,
            done: false,
        }
    }

    /// Offset of the opening brace of an unterminated block, once reached.
    pub fn unterminated_at(&self) -> Option<usize> {
        self.unterminated_at
    }
}

impl<'a> Iterator for Blocks<'a> {
    type Item = RawBlock<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let Some(open) = find_block_start(self.text, self.cursor) else {
            self.done = true;
            return None;
        };

        match match_block(self.text, open) {
            Some(block) => {
                self.cursor = block.end;
                Some(block)
            }
            None => {
                self.unterminated_at = Some(open);
                self.done = true;
                None
            }
        }
    }
}

/// Outcome of scanning one file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Records in discovery order.
    pub records: Vec<Record>,
    /// Blocks with a matched closing brace, empty ones included.
    pub blocks_found: usize,
    /// Matched blocks that decoded to zero fields.
    pub empty_blocks: usize,
    /// Opening brace offset of the block that ended the scan, if any.
    pub unterminated_at: Option<usize>,
}

/// Extract every record from one log file.
///
/// # Examples
///
/// ```
/// use txnlog::model::{FieldValue, LogFile};
/// use txnlog::parser::extract_records;
///
/// let file = LogFile::new(
///     "2025-08-30__000000.log",
///     "INFO transaction: {k: 'v', n: 2, ok: true}",
/// );
/// let extraction = extract_records(&file);
///
/// let record = &extraction.records[0];
/// assert_eq!(record.date(), "2025-08-30");
/// assert_eq!(record.fields().get("k"), Some(&FieldValue::from("v")));
/// assert_eq!(record.fields().get("n"), Some(&FieldValue::Integer(2)));
/// assert_eq!(record.fields().get("ok"), Some(&FieldValue::Boolean(true)));
/// ```
pub fn extract_records(file: &LogFile) -> Extraction {
    let mut extraction = Extraction::default();
    let mut blocks = Blocks::new(file.text());

    for block in blocks.by_ref() {
        extraction.blocks_found += 1;

        let fields = decode_fields(block.inner);
        if fields.is_empty() {
            extraction.empty_blocks += 1;
            continue;
        }
        extraction.records.push(assemble(fields, file.name()));
    }

    extraction.unterminated_at = blocks.unterminated_at();
    extraction
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
