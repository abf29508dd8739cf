/// Tether system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Replacement token for redacted credential spans.
pub const MASK_TOKEN: &str = "[REDACTED]";

/// Upper bound on chunks injected into a single prompt, regardless of config.
pub const MAX_PROMPT_CHUNKS: usize = 16;

/// Hard cap on generation attempts per request, regardless of config.
pub const MAX_ATTEMPTS_CAP: u32 = 5;
