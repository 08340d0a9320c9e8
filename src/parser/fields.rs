//! Field decoder: turns a block body into typed fields.
//!
//! A body is read line by line. Each line is split into entries at
//! top-level commas (outside quotes and nested `{}`/`[]`), so both
//! pretty-printed bodies (one field per line) and inline bodies
//! (`a: 1, b: 'x'`) decode the same way. A comma-separated segment with no
//! `:` continues the previous entry's value rather than being dropped.

use crate::model::{FieldMap, FieldValue};
use crate::parser::matcher::QuoteState;

/// Decode the inner text of one block.
///
/// Returns an empty map when no line carries a `name: value` entry; the
/// caller is expected to skip such blocks.
pub fn decode_fields(inner: &str) -> FieldMap {
    let mut fields = FieldMap::new();

    for line in inner.lines() {
        let line = line.trim();
        if is_structural_line(line) {
            continue;
        }
        for entry in split_entries(line) {
            if let Some((name, value)) = decode_entry(entry) {
                fields.insert(name, value);
            }
        }
    }

    fields
}

/// Empty lines and bare braces left over from pretty-printing.
fn is_structural_line(line: &str) -> bool {
    matches!(line, "" | "{" | "}" | "},")
}

/// Split one line at top-level commas.
fn split_entries(line: &str) -> Vec<&str> {
    let mut spans: Vec<(usize, usize)> = Vec::new();
    let mut quotes = QuoteState::default();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in line.char_indices() {
        if !quotes.advance(c) {
            continue;
        }
        match c {
            '{' | '[' => depth += 1,
            '}' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                push_segment(line, &mut spans, start, i);
                start = i + 1;
            }
            _ => {}
        }
    }
    push_segment(line, &mut spans, start, line.len());

    spans.into_iter().map(|(s, e)| &line[s..e]).collect()
}

fn push_segment(line: &str, spans: &mut Vec<(usize, usize)>, start: usize, end: usize) {
    let segment = line[start..end].trim();
    match spans.last_mut() {
        // `note: hello, world` keeps its comma
        Some(last) if !segment.is_empty() && !segment.contains(':') => last.1 = end,
        _ => spans.push((start, end)),
    }
}

/// Decode a single `name: value` entry.
///
/// The name is everything before the first `:`; entries without a `:` or
/// with an empty name yield `None`.
fn decode_entry(entry: &str) -> Option<(&str, FieldValue)> {
    let (name, raw) = entry.split_once(':')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name, FieldValue::coerce(normalize_value(raw))))
}

/// Trim, drop one trailing comma, then drop one pair of enclosing quotes.
///
/// # Examples
///
/// ```
/// use txnlog::parser::normalize_value;
///
/// assert_eq!(normalize_value(" 'EUR' , "), "EUR");
/// assert_eq!(normalize_value(r#""a,b""#), "a,b");
/// assert_eq!(normalize_value("'unbalanced"), "'unbalanced");
/// ```
pub fn normalize_value(raw: &str) -> &str {
    let mut value = raw.trim();
    if let Some(stripped) = value.strip_suffix(',') {
        value = stripped.trim_end();
    }
    strip_enclosing_quotes(value)
}

fn strip_enclosing_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(&first), Some(&last))
            if bytes.len() >= 2 && first == last && (first == b'\'' || first == b'"') =>
        {
            &value[1..value.len() - 1]
        }
        _ => value,
    }
}
