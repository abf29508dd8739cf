//! Terminal-punctuation completeness with soft recovery.

/// Sentence-terminal punctuation.
const TERMINAL: &[char] = &['.', '!', '?'];

/// Trailing characters allowed after the terminal, e.g. closing quotes.
const CLOSERS: &[char] = &['"', '\'', ')', '\u{201D}', '\u{2019}'];

/// Whether text ends at a sentence boundary.
pub fn ends_complete(text: &str) -> bool {
    let trimmed = text.trim_end_matches(|c: char| CLOSERS.contains(&c) || c.is_whitespace());
    trimmed.chars().last().is_some_and(|c| TERMINAL.contains(&c))
}

/// Trim back to the last sentence boundary.
///
/// Returns `None` when no terminal punctuation exists anywhere — the
/// irrecoverable case. The returned text keeps everything up to and
/// including the last terminal character.
pub fn trim_to_terminal(text: &str) -> Option<String> {
    let last = text.rfind(|c: char| TERMINAL.contains(&c))?;
    let end = last + text[last..].chars().next().map_or(1, char::len_utf8);
    Some(text[..end].to_string())
}
