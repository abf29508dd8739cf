//! Phrase tables for the no-retrieval-cost classifier stage.

/// Standalone greeting phrases, matched against the whole normalized query.
const GREETINGS: &[&str] = &[
    "hello",
    "hello there",
    "hi",
    "hi there",
    "hey",
    "hey there",
    "good morning",
    "good afternoon",
    "good evening",
    "greetings",
    "howdy",
];

/// Standalone thanks phrases.
const THANKS: &[&str] = &[
    "thanks",
    "thank you",
    "thanks a lot",
    "thank you very much",
    "thx",
    "ty",
    "cheers",
    "much appreciated",
];

/// Strip surrounding punctuation so "hello!" matches "hello".
fn strip_punctuation(text: &str) -> &str {
    text.trim_matches(|c: char| !c.is_alphanumeric())
}

pub fn is_greeting(normalized: &str) -> bool {
    GREETINGS.contains(&strip_punctuation(normalized))
}

pub fn is_thanks(normalized: &str) -> bool {
    THANKS.contains(&strip_punctuation(normalized))
}
