//! Candidate gathering: per-list ranking → weighted RRF fusion.

pub mod rrf_fusion;

pub use rrf_fusion::{fuse, FusedCandidate, RankedList};
