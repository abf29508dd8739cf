//! Context-only prompt assembly.
//!
//! The prompt carries the retrieved passages with explicit citation markers
//! and an instruction forbidding outside knowledge. On retry the prior
//! failure reason is appended as a correction; the context itself is reused
//! verbatim — retries never re-fetch.

use std::fmt::Write;

use tether_core::models::{Query, RetrievalHit};

/// Fixed answer the model is told to give when the context is insufficient.
pub const INSUFFICIENT_CONTEXT_REPLY: &str =
    "I don't know based on the available documentation.";

const INSTRUCTION: &str = "You are a retrieval-grounded assistant. Answer the question using only \
the numbered context passages below. Do not use any other knowledge. Every sentence of the answer \
must end with the bracketed number of the passage that supports it, such as [1]. If the passages \
do not contain the answer, reply exactly:";

/// Build the generation prompt for one attempt.
pub fn build(query: &Query, hits: &[RetrievalHit], prior_failure: Option<&str>) -> String {
    let mut out = String::new();

    out.push_str(INSTRUCTION);
    out.push(' ');
    out.push_str(INSUFFICIENT_CONTEXT_REPLY);
    out.push_str("\n\nContext:\n");

    for (i, hit) in hits.iter().enumerate() {
        let meta = &hit.chunk.metadata;
        let _ = writeln!(
            out,
            "[{}] ({}, {}) {}",
            i + 1,
            meta.source,
            meta.section,
            hit.chunk.text.trim()
        );
    }

    let _ = write!(out, "\nQuestion: {}\n", query.raw.trim());

    if let Some(reason) = prior_failure {
        let _ = write!(
            out,
            "\nCorrection: the previous answer was rejected ({reason}). \
             Produce a corrected answer from the same passages.\n"
        );
    }

    out.push_str("\nAnswer:");
    out
}
