//! Records and the corpus they accumulate into.

use crate::model::FieldValue;
use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Column name of the originating file.
pub const SOURCEFILE_COLUMN: &str = "sourcefile";

/// Column name of the date token derived from the file name.
pub const DATE_COLUMN: &str = "date";

/// Ordered field mapping decoded from one block.
///
/// Keys are unique and keep the position of their first appearance.
/// Inserting an existing key replaces the value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    entries: Vec<(String, FieldValue)>,
}

impl FieldMap {
    /// Empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field. Returns the previous value, if any.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        let name = name.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Look up a field by exact (case-sensitive) name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no field was decoded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Field names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// One transaction recovered from a log file.
///
/// `sourcefile` and `date` are provenance and always present (`date` may be
/// empty). Decoded fields are kept verbatim, even ones that happen to be
/// named like a provenance column; on output the provenance value wins.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    sourcefile: String,
    date: String,
    fields: FieldMap,
}

impl Record {
    /// Build a record from its parts.
    pub fn new(sourcefile: impl Into<String>, date: impl Into<String>, fields: FieldMap) -> Self {
        Self {
            sourcefile: sourcefile.into(),
            date: date.into(),
            fields,
        }
    }

    /// Name of the file the record was found in.
    pub fn sourcefile(&self) -> &str {
        &self.sourcefile
    }

    /// `YYYY-MM-DD` token from the file name, or empty.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// The date as a calendar date, when it is a valid one.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Decoded fields, without provenance.
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Look up a column, provenance included.
    ///
    /// Provenance columns are answered from provenance and yield a
    /// `FieldValue::String`.
    pub fn get(&self, column: &str) -> Option<FieldValue> {
        match column {
            SOURCEFILE_COLUMN => Some(FieldValue::String(self.sourcefile.clone())),
            DATE_COLUMN => Some(FieldValue::String(self.date.clone())),
            other => self.fields.get(other).cloned(),
        }
    }

    /// Decoded fields that do not collide with a provenance column.
    pub fn data_fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields
            .iter()
            .filter(|(k, _)| !is_provenance_column(k))
    }
}

/// True for `sourcefile` and `date`.
pub fn is_provenance_column(name: &str) -> bool {
    name == SOURCEFILE_COLUMN || name == DATE_COLUMN
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let data: Vec<_> = self.data_fields().collect();
        let mut map = serializer.serialize_map(Some(data.len() + 2))?;
        map.serialize_entry(SOURCEFILE_COLUMN, &self.sourcefile)?;
        map.serialize_entry(DATE_COLUMN, &self.date)?;
        for (k, v) in data {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// All records produced by one run, in file order then discovery order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    records: Vec<Record>,
}

impl Corpus {
    /// Empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record.
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Append records in order.
    pub fn extend(&mut self, records: impl IntoIterator<Item = Record>) {
        self.records.extend(records);
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no record was produced.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in corpus order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Records as a slice.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Union of column names across all records.
    ///
    /// Provenance columns come first, then every other field name in order
    /// of first appearance across the corpus.
    pub fn column_names(&self) -> Vec<String> {
        let mut columns = vec![SOURCEFILE_COLUMN.to_string(), DATE_COLUMN.to_string()];
        for record in &self.records {
            for (name, _) in record.data_fields() {
                if !columns.iter().any(|c| c == name) {
                    columns.push(name.to_string());
                }
            }
        }
        columns
    }
}

impl IntoIterator for Corpus {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
