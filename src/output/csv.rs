//! CSV rendering against the corpus-wide column superset.

use super::CorpusWriter;
use crate::model::error::OutputError;
use crate::model::{Corpus, Record};
use std::io::Write;

const DELIMITER: char = ',';

/// Comma-delimited CSV writer with a header row.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvWriter;

impl CsvWriter {
    /// Quote a cell if it contains the delimiter, a quote or a line break.
    fn escape_field(&self, field: &str) -> String {
        if field.contains(DELIMITER)
            || field.contains('"')
            || field.contains('\n')
            || field.contains('\r')
        {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn write_row<'a>(
        &self,
        out: &mut dyn Write,
        cells: impl Iterator<Item = &'a str>,
    ) -> std::io::Result<()> {
        let row: Vec<String> = cells.map(|cell| self.escape_field(cell)).collect();
        writeln!(out, "{}", row.join(&DELIMITER.to_string()))
    }

    fn cells(record: &Record, columns: &[String]) -> Vec<String> {
        columns
            .iter()
            .map(|column| {
                record
                    .get(column)
                    .map(|value| value.to_string())
                    .unwrap_or_default()
            })
            .collect()
    }
}

impl CorpusWriter for CsvWriter {
    fn write_corpus(&self, corpus: &Corpus, out: &mut dyn Write) -> Result<(), OutputError> {
        let columns = corpus.column_names();
        self.write_row(out, columns.iter().map(String::as_str))?;
        for record in corpus {
            let cells = Self::cells(record, &columns);
            self.write_row(out, cells.iter().map(String::as_str))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldMap, FieldValue};

    fn record(source: &str, date: &str, pairs: &[(&str, FieldValue)]) -> Record {
        let fields: FieldMap = pairs.iter().cloned().collect();
        Record::new(source, date, fields)
    }

    fn render(corpus: &Corpus) -> String {
        let mut out = Vec::new();
        CsvWriter.write_corpus(corpus, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn heterogeneous_records_share_column_superset() {
        let mut corpus = Corpus::new();
        corpus.push(record(
            "2025-08-30__000000.log",
            "2025-08-30",
            &[
                ("id", "tx-1".into()),
                ("amount", 25i64.into()),
                ("newBalance", (-12.5).into()),
            ],
        ));
        corpus.push(record(
            "run.log",
            "",
            &[("id", "tx-2".into()), ("type", "refund".into()), ("ok", true.into())],
        ));

        insta::assert_snapshot!(render(&corpus), @r"
        sourcefile,date,id,amount,newBalance,type,ok
        2025-08-30__000000.log,2025-08-30,tx-1,25,-12.5,,
        run.log,,tx-2,,,refund,true
        ");
    }

    #[test]
    fn cells_needing_quotes_are_escaped() {
        let mut corpus = Corpus::new();
        corpus.push(record(
            "a.log",
            "",
            &[
                ("note", "a, b".into()),
                ("meta", r#"{"a":1}"#.into()),
                ("plain", "x".into()),
            ],
        ));

        assert_eq!(
            render(&corpus),
            "sourcefile,date,note,meta,plain\na.log,,\"a, b\",\"{\"\"a\"\":1}\",x\n"
        );
    }

    #[test]
    fn integral_float_cell_decodes_back_to_float() {
        let mut corpus = Corpus::new();
        corpus.push(record("a.log", "", &[("amount", FieldValue::coerce("3.00"))]));

        let csv = render(&corpus);
        assert_eq!(csv, "sourcefile,date,amount\na.log,,3.0\n");

        let cell = csv.lines().nth(1).and_then(|row| row.rsplit(',').next()).unwrap();
        assert_eq!(FieldValue::coerce(cell), FieldValue::Float(3.0));
    }

    #[test]
    fn empty_corpus_writes_header_only() {
        assert_eq!(render(&Corpus::new()), "sourcefile,date\n");
    }

    #[test]
    fn escape_field_rules() {
        let writer = CsvWriter;
        assert_eq!(writer.escape_field("simple"), "simple");
        assert_eq!(writer.escape_field("has,comma"), "\"has,comma\"");
        assert_eq!(writer.escape_field("has\"quote"), "\"has\"\"quote\"");
        assert_eq!(writer.escape_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn semicolons_are_not_special() {
        assert_eq!(CsvWriter.escape_field("a;b"), "a;b");
    }
}
