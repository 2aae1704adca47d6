//! Source excerpts with a caret under an error position.

/// Show up to `before` characters leading to `offset`, the rest of that
/// line (at most `after` characters past `offset` when given), and a caret
/// line pointing at `offset`.
///
/// `offset` is a byte offset; it is clamped to the text.
pub fn excerpt(text: &str, offset: usize, before: usize, after: Option<usize>) -> String {
    let chars: Vec<char> = text.chars().collect();
    let at = char_index(text, offset);
    let start = at.saturating_sub(before);

    let mut end = chars.len();
    if let Some(after) = after {
        end = end.min(at.saturating_add(after));
    }
    if let Some(newline) = chars[at..end].iter().position(|&c| c == '\n') {
        end = at + newline;
    }

    let column = chars[start..at]
        .iter()
        .rev()
        .take_while(|&&c| c != '\n')
        .count();

    let snippet: String = chars[start..end].iter().collect();
    format!("{snippet}\n{}^", " ".repeat(column))
}

/// Character index of the byte `offset`, clamped to the text.
fn char_index(text: &str, offset: usize) -> usize {
    text.char_indices()
        .take_while(|&(i, _)| i < offset)
        .count()
}
