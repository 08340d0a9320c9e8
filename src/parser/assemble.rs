//! Record assembler: attaches provenance to decoded fields.

use crate::model::{FieldMap, Record};

const DATE_TOKEN_LEN: usize = "YYYY-MM-DD".len();

/// Leading `YYYY-MM-DD` of a file name, or `""`.
///
/// The check is lexical only: four digits, `-`, two digits, `-`, two
/// digits. Calendar validity is not checked here.
pub fn date_token(file_name: &str) -> &str {
    let Some(head) = file_name.as_bytes().get(..DATE_TOKEN_LEN) else {
        return "";
    };

    let shaped = head.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });

    if shaped {
        &file_name[..DATE_TOKEN_LEN]
    } else {
        ""
    }
}

/// Build a [`Record`] from decoded fields and the source file name.
pub fn assemble(fields: FieldMap, file_name: &str) -> Record {
    Record::new(file_name, date_token(file_name), fields)
}
