use serde::{Deserialize, Serialize};

/// A unit of indexed corpus text.
///
/// Created by the ingestion layer, immutable once indexed. Requests hold
/// chunks behind `Arc` and reference them by id — never by mutable copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub text: String,
    /// Embedding of `text` under the index's model version.
    pub dense_vector: Vec<f32>,
    /// Pre-tokenized terms for the sparse index.
    pub sparse_tokens: Vec<String>,
    pub metadata: ChunkMetadata,
}

/// Provenance metadata attached at ingestion time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Originating document or collection.
    pub source: String,
    /// Section heading within the source.
    pub section: String,
    /// Ingestion-assigned intent label (e.g. "howto", "reference").
    pub intent: String,
}
