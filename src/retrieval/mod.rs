//! Knowledge-source retrieval: per-concept resolution to evidence text

pub mod wikipedia;

pub use wikipedia::WikipediaClient;

use crate::cancel::CancellationToken;
use crate::error::Result;
use crate::evidence::EvidenceDocument;
use async_trait::async_trait;

/// Resolves one concept to encyclopedic evidence, if any exists
///
/// `Ok(None)` means the knowledge source has nothing for this concept, which is
/// never pipeline-fatal. `Err` is reserved for transport-level failures that
/// survived the retry policy.
#[async_trait]
pub trait KnowledgeRetriever: Send + Sync {
    async fn resolve(
        &self,
        concept: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<EvidenceDocument>>;
}
