//! Canonical user-visible replies.
//!
//! Refusal kinds map to fixed, distinct messages. There are no softened
//! variants: a grounding failure gets the same canonical text as any other
//! no-information outcome.

use tether_core::models::RefusalKind;

pub const NO_RELEVANT_INFORMATION: &str =
    "I couldn't find relevant information in the knowledge base to answer that.";

pub const SERVICE_UNAVAILABLE: &str =
    "The answering service is temporarily unavailable. Please try again shortly.";

pub const CLARIFICATION_NEEDED: &str =
    "Could you add a bit more detail? The question was too short for me to act on.";

pub const TIMEOUT: &str =
    "Processing took too long and was cancelled. Please try again.";

/// Canned smalltalk replies — returned without retrieval or generation.
pub const GREETING_REPLY: &str =
    "Hello! Ask me anything covered by the knowledge base and I'll answer with sources.";

pub const THANKS_REPLY: &str = "You're welcome!";

pub fn message_for(kind: RefusalKind) -> &'static str {
    match kind {
        RefusalKind::NoRelevantInformation => NO_RELEVANT_INFORMATION,
        RefusalKind::ServiceUnavailable => SERVICE_UNAVAILABLE,
        RefusalKind::ClarificationNeeded => CLARIFICATION_NEEDED,
        RefusalKind::Timeout => TIMEOUT,
    }
}
