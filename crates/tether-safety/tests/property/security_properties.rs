//! Property suites for the credential filter and truncation repair.

use proptest::prelude::*;
use tether_safety::{IntegrityValidator, SecurityFilter};

// ── Credential non-leakage ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn password_values_never_survive_redaction(
        value in "[A-Za-z0-9]{4,24}"
    ) {
        let input = format!("The backup password: {value} was mentioned in passing.");
        let outcome = SecurityFilter::new().scan(&input);
        prop_assert!(
            !outcome.redacted_text.contains(&value),
            "password value leaked: {}",
            outcome.redacted_text
        );
    }

    #[test]
    fn aws_keys_never_survive_redaction(
        suffix in "[0-9A-Z]{16}"
    ) {
        let key = format!("AKIA{suffix}");
        let input = format!("Logs referenced {key} twice.");
        let outcome = SecurityFilter::new().scan(&input);
        prop_assert!(!outcome.redacted_text.contains(&key));
    }

    #[test]
    fn redaction_is_idempotent(
        value in "[A-Za-z0-9]{4,24}"
    ) {
        let input = format!("api_key = {value}{value} stored badly.");
        let filter = SecurityFilter::new();
        let first = filter.scan(&input);
        let second = filter.scan(&first.redacted_text);
        prop_assert_eq!(&first.redacted_text, &second.redacted_text);
    }
}

// ── Truncation recovery ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn recovered_text_never_ends_mid_word(
        body in "[a-z]{2,8}( [a-z]{2,8}){0,12}",
        cut in "[a-z]{1,10}"
    ) {
        // A complete sentence followed by a mid-word cutoff.
        let input = format!("{body} ends here. {cut}");
        let outcome = IntegrityValidator::new().validate(&input);
        if outcome.is_complete {
            prop_assert!(
                outcome.normalized_text.trim_end().ends_with(['.', '!', '?']),
                "recovered text lacks terminal punctuation: {}",
                outcome.normalized_text
            );
        }
    }

    #[test]
    fn terminal_free_text_is_always_irrecoverable(
        body in "[a-z]{2,8}( [a-z]{2,8}){0,12}"
    ) {
        let outcome = IntegrityValidator::new().validate(&body);
        prop_assert!(!outcome.is_complete);
    }
}
