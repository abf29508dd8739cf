//! Citation-marker extraction.
//!
//! Markers are the bracketed passage numbers the prompt introduced
//! (`[1]`-style, 1-based). Markers that don't map to a supplied passage are
//! ignored; an output with no mappable markers yields an empty citation set,
//! which the grounding firewall treats as ungrounded downstream.

use std::sync::LazyLock;

use regex::Regex;
use tether_core::models::RetrievalHit;

static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\d{1,3})\]").expect("marker regex is valid"));

/// Map citation markers in generated text back to chunk ids, in first-use
/// order, deduplicated.
pub fn extract(text: &str, hits: &[RetrievalHit]) -> Vec<String> {
    let mut seen = Vec::new();
    for cap in MARKER_RE.captures_iter(text) {
        let Ok(marker) = cap[1].parse::<usize>() else {
            continue;
        };
        if marker == 0 || marker > hits.len() {
            continue;
        }
        let id = hits[marker - 1].chunk_id();
        if !seen.iter().any(|s: &String| s == id) {
            seen.push(id.to_string());
        }
    }
    seen
}
