//! String literal escaping.

/// Escape `text` for the inside of a double-quoted literal.
///
/// Line breaks, backspace, tab and `"` are escaped; every other character
/// is copied as is. A backslash that already starts an escape sequence
/// (`\uXXXX`, `\xXX`, or a one to three digit octal escape) is kept
/// single, any other backslash is doubled.
pub fn escape(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut escaped = String::with_capacity(text.len());

    for (i, c) in text.char_indices() {
        match c {
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\u{8}' => escaped.push_str("\\b"),
            '"' => escaped.push_str("\\\""),
            '\t' => escaped.push_str("\\t"),
            '\\' if starts_escape_sequence(bytes, i) => escaped.push('\\'),
            '\\' => escaped.push_str("\\\\"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Whether the backslash at `i` begins an escape that must not be doubled.
///
/// The checks run in a fixed order and use the same bounds as the
/// historical output, so the two-digit and one-digit octal forms still
/// require three characters after the backslash.
fn starts_escape_sequence(bytes: &[u8], i: usize) -> bool {
    let at = |n: usize| bytes.get(i + n).copied().unwrap_or(0);
    let len = bytes.len();
    let hex = |n: usize| at(n).is_ascii_hexdigit();
    let octal = |n: usize| (b'0'..=b'7').contains(&at(n));

    if i + 5 < len && at(1) == b'u' && hex(2) && hex(3) && hex(4) && hex(5) {
        return true;
    }
    if i + 3 < len && at(1) == b'x' && hex(2) && hex(3) {
        return true;
    }
    if i + 3 < len && (b'0'..=b'3').contains(&at(1)) && octal(2) && octal(3) {
        return true;
    }
    if i + 3 < len && octal(1) && octal(2) {
        return true;
    }
    i + 3 < len && octal(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_characters() {
        assert_eq!(escape("a\nb\rc\td\u{8}e"), r"a\nb\rc\td\be");
        assert_eq!(escape(r#"say "hi""#), r#"say \"hi\""#);
        // Not in the escaped set: passed through untouched.
        assert_eq!(escape("'\u{b}\u{c}"), "'\u{b}\u{c}");
    }

    #[test]
    fn test_existing_unicode_escape_is_kept() {
        assert_eq!(escape(r"caf\u00e9 "), r"caf\u00e9 ");
        assert_eq!(escape(r"\u00e9"), r"\u00e9");
        // Four hex digits are needed.
        assert_eq!(escape(r"\u00e"), r"\\u00e");
        assert_eq!(escape(r"\u00g9 "), r"\\u00g9 ");
    }

    #[test]
    fn test_existing_hex_and_octal_escapes_are_kept() {
        assert_eq!(escape(r"\x41 "), r"\x41 ");
        assert_eq!(escape(r"\101 "), r"\101 ");
        assert_eq!(escape(r"\47x "), r"\47x ");
        assert_eq!(escape(r"\0ab"), r"\0ab");
    }

    #[test]
    fn test_lone_backslash_is_doubled() {
        assert_eq!(escape("\\"), r"\\");
        assert_eq!(escape(r"a\b"), r"a\\b");
        assert_eq!(escape(r"C:\path"), r"C:\\path");
        // A short octal run at the very end does not satisfy the bound.
        assert_eq!(escape(r"x\0"), r"x\\0");
    }

    #[test]
    fn test_non_ascii_is_copied() {
        assert_eq!(escape("\u{65e5}\u{672c}\u{e9}"), "\u{65e5}\u{672c}\u{e9}");
    }
}
