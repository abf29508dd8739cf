//! Per-request context.
//!
//! Each request owns exactly one of these; it is threaded through the
//! stages by reference and never shared across concurrent requests. Shared
//! resources (indexes, embedder, provider) are injected read-only handles
//! on the pipeline itself.

use std::time::Instant;

use tether_core::models::{Query, RetrievalResult};

pub struct RequestContext {
    pub query: Query,
    /// Fixed after the RETRIEVE state; retries reuse it verbatim.
    pub retrieval: RetrievalResult,
    started: Instant,
}

impl RequestContext {
    pub fn new(query: Query, retrieval: RetrievalResult, started: Instant) -> Self {
        Self {
            query,
            retrieval,
            started,
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}
