//! veridict: dual-oracle factual claim verification
//!
//! Verifies a natural-language claim by extracting its key concepts, retrieving
//! encyclopedic evidence for each, filtering the evidence with a lexical
//! relevance heuristic, and reconciling two independently obtained judgments:
//! - a free-form causal explanation grounded in the evidence, and
//! - a strict, evidence-free three-way classification.
//!
//! The two verdicts either concord (same truth value) or disagree; every other
//! terminal state is a distinguishable failure, never a silent exit.

pub mod cancel;
pub mod concepts;
pub mod config;
pub mod consensus;
pub mod error;
pub mod evidence;
pub mod lexicon;
pub mod oracle;
pub mod pipeline;
pub mod retrieval;
pub mod verdict;

pub use cancel::CancellationToken;
pub use concepts::{Claim, ConceptExtractor, ConceptSet};
pub use config::{PipelineConfig, RetryPolicy};
pub use consensus::{ConsensusEngine, ConsensusOutcome, ConsensusResult};
pub use error::{Result, VerifyError};
pub use evidence::{EvidenceCache, EvidenceDocument, RelevanceScorer, ScoredEvidence};
pub use lexicon::Lexicon;
pub use oracle::{
    OllamaChatClient, OllamaReasoningOracle, OllamaReferenceOracle, ReasoningOracle,
    ReferenceOracle,
};
pub use pipeline::{PipelineState, VerificationPipeline, VerificationReport};
pub use retrieval::{KnowledgeRetriever, WikipediaClient};
pub use verdict::Verdict;
