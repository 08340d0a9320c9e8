//! Domain model types (pure).
//!
//! All types in this module are plain data: no I/O, no logging.

pub mod error;
pub mod field_value;
pub mod log_file;
pub mod record;

// Re-export for convenience
pub use error::{AppError, FileError, InputError, OutputError};
pub use field_value::FieldValue;
pub use log_file::LogFile;
pub use record::{is_provenance_column, Corpus, FieldMap, Record, DATE_COLUMN, SOURCEFILE_COLUMN};
