//! Text canonicalization, run before any other integrity check so the
//! heuristics downstream operate on clean input.

/// Zero-width characters that survive some provider decoders.
const ZERO_WIDTH: &[char] = &[
    '\u{200B}', // zero width space
    '\u{200C}', // zero width non-joiner
    '\u{200D}', // zero width joiner
    '\u{2060}', // word joiner
    '\u{FEFF}', // BOM / zero width no-break space
];

/// Canonicalize whitespace variants to single spaces and strip zero-width
/// characters. The result is trimmed.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars() {
        if ZERO_WIDTH.contains(&c) {
            continue;
        }
        if c.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(c);
    }
    out
}
