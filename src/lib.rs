//! txnlog
//!
//! Recovers `transaction: { ... }` records embedded in plain-text log files
//! and normalizes them into tabular form.
//!
//! The parsing engine ([`parser`]) and domain types ([`model`]) are pure.
//! File access lives in [`source`] and [`output`]; [`driver`] ties them
//! together for a whole directory. [`config`] and [`logging`] serve the
//! binary.

pub mod config;
pub mod driver;
pub mod logging;
pub mod model;
pub mod output;
pub mod parser;
pub mod source;

pub use driver::{run_batch, BatchOptions, BatchReport};
pub use model::{Corpus, FieldValue, LogFile, Record};
pub use parser::{extract_records, Extraction};
