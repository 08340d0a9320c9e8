//! Block locator: finds where the next transaction body opens.

/// Literal text that introduces a transaction record.
pub const MARKER: &str = "transaction:";

/// Find the opening brace of the next block at or after `from`.
///
/// Looks for [`MARKER`] at or after `from`, then for the first `{` at or
/// after the end of the marker. Any text may sit between the two.
///
/// Returns the byte offset of the `{`, or `None` when either the marker or a
/// following brace is missing. `None` is also returned when `from` is past
/// the end of `text` or not on a char boundary.
pub fn find_block_start(text: &str, from: usize) -> Option<usize> {
    let marker_at = from + text.get(from..)?.find(MARKER)?;
    let body_from = marker_at + MARKER.len();
    text[body_from..].find('{').map(|i| body_from + i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_brace_after_marker() {
        let text = "INFO transaction: {a: 1}";
        assert_eq!(find_block_start(text, 0), Some(18));
        assert_eq!(&text[18..19], "{");
    }

    #[test]
    fn brace_may_be_on_a_later_line() {
        let text = "transaction:\n  {\n a: 1 }";
        let at = find_block_start(text, 0).unwrap();
        assert_eq!(&text[at..at + 1], "{");
        assert_eq!(at, 15);
    }

    #[test]
    fn ignores_braces_before_marker() {
        let text = "{noise} transaction: {a: 1}";
        assert_eq!(find_block_start(text, 0), Some(21));
    }

    #[test]
    fn missing_marker_is_none() {
        assert_eq!(find_block_start("nothing to see {a: 1}", 0), None);
    }

    #[test]
    fn marker_without_brace_is_none() {
        assert_eq!(find_block_start("transaction: pending", 0), None);
    }

    #[test]
    fn respects_search_offset() {
        let text = "transaction: {a:1} transaction: {b:2}";
        let first = find_block_start(text, 0).unwrap();
        let second = find_block_start(text, first + 1).unwrap();
        assert_eq!(first, 13);
        assert_eq!(second, 32);
        assert_eq!(find_block_start(text, second + 1), None);
    }

    #[test]
    fn offset_past_end_is_none() {
        assert_eq!(find_block_start("transaction: {}", 100), None);
    }

    #[test]
    fn marker_is_case_sensitive() {
        assert_eq!(find_block_start("Transaction: {a: 1}", 0), None);
    }
}
