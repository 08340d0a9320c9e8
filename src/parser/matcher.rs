//! Delimiter matcher: brace balancing with quote and escape awareness.
//!
//! The scan is an explicit state machine over four pieces of state:
//!
//! - a nesting depth, changed only by unquoted, unescaped braces;
//! - an in-single-quote flag;
//! - an in-double-quote flag;
//! - an escape-pending flag set by a backslash for exactly one character.
//!
//! A quote character toggles its own flag only while the other kind is
//! closed, so `"it's"` stays a single double-quoted span and `'say "hi"'`
//! a single single-quoted one. An escaped character is always literal.

/// Quote and escape state shared by the block matcher and the entry splitter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct QuoteState {
    in_single: bool,
    in_double: bool,
    escaped: bool,
}

impl QuoteState {
    /// Advance over `c`.
    ///
    /// Returns `true` when `c` is structural: outside every quoted span,
    /// not escaped, and not itself a quote or backslash. Only structural
    /// characters may change nesting depth or split entries.
    pub(crate) fn advance(&mut self, c: char) -> bool {
        if self.escaped {
            self.escaped = false;
            return false;
        }
        match c {
            '\\' => {
                self.escaped = true;
                false
            }
            '\'' if !self.in_double => {
                self.in_single = !self.in_single;
                false
            }
            '"' if !self.in_single => {
                self.in_double = !self.in_double;
                false
            }
            _ => !self.in_single && !self.in_double,
        }
    }
}

/// Body of one matched block, borrowed from the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawBlock<'a> {
    /// Text between the braces, both braces excluded.
    pub inner: &'a str,
    /// Byte offset of the opening `{`.
    pub start: usize,
    /// Byte offset just past the closing `}`.
    pub end: usize,
}

/// Match the brace at `open` with its closing brace.
///
/// Scanning stops the moment depth returns to zero. Returns `None` when
/// `open` does not point at a `{`, or when the text ends first (an
/// unterminated block).
///
/// # Examples
///
/// ```
/// use txnlog::parser::match_block;
///
/// let text = r#"transaction: {meta: '{"a":1}'} tail"#;
/// let block = match_block(text, 13).unwrap();
/// assert_eq!(block.inner, r#"meta: '{"a":1}'"#);
/// assert_eq!(&text[block.end..], " tail");
/// ```
pub fn match_block(text: &str, open: usize) -> Option<RawBlock<'_>> {
    let body = text.get(open..)?;
    if !body.starts_with('{') {
        return None;
    }

    let mut depth = 0usize;
    let mut quotes = QuoteState::default();

    for (offset, c) in body.char_indices() {
        if !quotes.advance(c) {
            continue;
        }
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let close = open + offset;
                    return Some(RawBlock {
                        inner: &text[open + 1..close],
                        start: open,
                        end: close + 1,
                    });
                }
            }
            _ => {}
        }
    }

    None
}
