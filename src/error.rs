//! Error types for the verification pipeline

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, VerifyError>;

/// Verification pipeline errors
///
/// The first three variants are the terminal pipeline states short of consensus;
/// each maps to a distinct user-visible message at the reporting boundary.
/// An oracle reply that cannot be mapped to a verdict is NOT an error here:
/// it downgrades to `Verdict::Unparseable` and the run continues to consensus.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("claim is empty or whitespace-only")]
    InvalidClaim,

    #[error("no qualifying concept could be extracted from the claim")]
    NoConcepts,

    #[error("none of the {attempted} concepts resolved to an encyclopedic document")]
    NoEvidence { attempted: usize },

    #[error("{scored} documents were retrieved but none reached the relevance threshold of {threshold}")]
    InsufficientEvidence { scored: usize, threshold: u32 },

    #[error("{service} call failed: {reason}")]
    ExternalService { service: &'static str, reason: String },

    #[error("verification was cancelled")]
    Cancelled,
}

impl VerifyError {
    /// Construct an external-service failure for a named collaborator.
    pub fn external(service: &'static str, reason: impl Into<String>) -> Self {
        Self::ExternalService {
            service,
            reason: reason.into(),
        }
    }
}
