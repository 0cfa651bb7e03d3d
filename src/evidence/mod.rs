//! Evidence documents, relevance scoring, and the retrieval cache

pub mod cache;
pub mod document;
pub mod scorer;

pub use cache::EvidenceCache;
pub use document::EvidenceDocument;
pub use scorer::{RelevanceScorer, ScoredEvidence};
