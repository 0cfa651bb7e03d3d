//! Pipeline orchestration: extraction → retrieval → filtering → judgments → consensus

use crate::cancel::CancellationToken;
use crate::concepts::{Claim, ConceptExtractor, ConceptSet};
use crate::consensus::{ConsensusEngine, ConsensusResult};
use crate::error::{Result, VerifyError};
use crate::evidence::{EvidenceDocument, RelevanceScorer, ScoredEvidence};
use crate::lexicon::Lexicon;
use crate::oracle::{ReasoningOracle, ReferenceOracle};
use crate::retrieval::KnowledgeRetriever;
use crate::verdict::{classify_freeform, parse_constrained};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Observer invoked on every pipeline state transition
pub type StateObserver = Box<dyn Fn(PipelineState) + Send + Sync>;

/// States traversed by a verification run.
///
/// The chain is linear; the three error states are terminal and short-circuit
/// every remaining stage. Only the orchestrator performs transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineState {
    ConceptsExtracted,
    NoConceptsError,
    EvidenceRetrieved,
    NoEvidenceError,
    EvidenceFiltered,
    InsufficientEvidenceError,
    JudgmentsObtained,
    ConsensusComputed,
}

/// Everything a completed run produced, for reporting and inspection
#[derive(Debug)]
pub struct VerificationReport {
    pub claim: Claim,
    pub concepts: ConceptSet,
    pub evidence: Vec<ScoredEvidence>,
    pub consensus: ConsensusResult,
    /// States traversed, in order
    pub states: Vec<PipelineState>,
}

/// The verification pipeline, wired from caller-owned collaborators.
///
/// The retriever and the two oracles are injected behind their trait seams, so
/// tests substitute doubles and the binary controls every client's lifecycle.
pub struct VerificationPipeline {
    extractor: ConceptExtractor,
    scorer: RelevanceScorer,
    retriever: Arc<dyn KnowledgeRetriever>,
    reasoning: Arc<dyn ReasoningOracle>,
    reference: Arc<dyn ReferenceOracle>,
    lexicon: Lexicon,
    max_concurrent_retrievals: usize,
    observer: Option<StateObserver>,
}

impl VerificationPipeline {
    pub fn new(
        lexicon: Lexicon,
        relevance_threshold: u32,
        max_concurrent_retrievals: usize,
        retriever: Arc<dyn KnowledgeRetriever>,
        reasoning: Arc<dyn ReasoningOracle>,
        reference: Arc<dyn ReferenceOracle>,
    ) -> Self {
        Self {
            extractor: ConceptExtractor::new(lexicon.clone()),
            scorer: RelevanceScorer::new(lexicon.clone(), relevance_threshold),
            retriever,
            reasoning,
            reference,
            lexicon,
            max_concurrent_retrievals: max_concurrent_retrievals.max(1),
            observer: None,
        }
    }

    /// Install an observer notified of every state transition (progress output).
    pub fn with_observer(mut self, observer: StateObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Run the full pipeline for one claim.
    ///
    /// Terminal failures come back as the matching [`VerifyError`]; a completed
    /// run yields the consensus report. No partial consensus is computed on
    /// cancellation.
    pub async fn run(
        &self,
        claim: &Claim,
        cancel: &CancellationToken,
    ) -> Result<VerificationReport> {
        let run_id = Uuid::new_v4();
        let span = info_span!("verification", %run_id);
        self.run_stages(claim, cancel).instrument(span).await
    }

    async fn run_stages(
        &self,
        claim: &Claim,
        cancel: &CancellationToken,
    ) -> Result<VerificationReport> {
        let mut states = Vec::with_capacity(5);
        let transition = |state: PipelineState, states: &mut Vec<PipelineState>| {
            debug!(?state, "pipeline transition");
            if let Some(observer) = &self.observer {
                observer(state);
            }
            states.push(state);
        };

        // Stage 1: concept extraction
        let concepts = self.extractor.extract(claim);
        if concepts.is_empty() {
            transition(PipelineState::NoConceptsError, &mut states);
            return Err(VerifyError::NoConcepts);
        }
        info!(concepts = %concepts.joined(), "concepts extracted");
        transition(PipelineState::ConceptsExtracted, &mut states);

        if cancel.is_cancelled() {
            return Err(VerifyError::Cancelled);
        }

        // Stage 2: per-concept retrieval, bounded parallelism
        let documents = self.retrieve_all(&concepts, cancel).await?;
        if documents.is_empty() {
            transition(PipelineState::NoEvidenceError, &mut states);
            return Err(VerifyError::NoEvidence {
                attempted: concepts.len(),
            });
        }
        transition(PipelineState::EvidenceRetrieved, &mut states);

        if cancel.is_cancelled() {
            return Err(VerifyError::Cancelled);
        }

        // Stage 3: relevance filtering
        let retrieved = documents.len();
        let evidence: Vec<ScoredEvidence> = documents
            .into_iter()
            .filter_map(|document| self.scorer.admit(document, &concepts))
            .collect();
        if evidence.is_empty() {
            transition(PipelineState::InsufficientEvidenceError, &mut states);
            return Err(VerifyError::InsufficientEvidence {
                scored: retrieved,
                threshold: self.scorer.threshold(),
            });
        }
        info!(
            admitted = evidence.len(),
            rejected = retrieved - evidence.len(),
            "evidence filtered"
        );
        transition(PipelineState::EvidenceFiltered, &mut states);

        if cancel.is_cancelled() {
            return Err(VerifyError::Cancelled);
        }

        // Stage 4: both oracles, issued concurrently
        let evidence_text = evidence
            .iter()
            .map(|scored| scored.document.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let (reasoning_text, reference_text) = tokio::try_join!(
            self.reasoning.judge(claim, &concepts, &evidence_text, cancel),
            self.reference.classify(claim, cancel),
        )?;
        transition(PipelineState::JudgmentsObtained, &mut states);

        // Stage 5: verdict mapping and consensus
        let reasoning_verdict = classify_freeform(&reasoning_text, &self.lexicon);
        let reference_verdict = parse_constrained(&reference_text, &self.lexicon);
        let outcome = ConsensusEngine::reconcile(reasoning_verdict, reference_verdict);
        info!(%reasoning_verdict, %reference_verdict, %outcome, "consensus computed");
        transition(PipelineState::ConsensusComputed, &mut states);

        Ok(VerificationReport {
            claim: claim.clone(),
            concepts,
            evidence,
            consensus: ConsensusResult {
                reasoning_verdict,
                reference_verdict,
                outcome,
                reasoning_text,
                reference_text,
            },
            states,
        })
    }

    /// Resolve every concept independently; failures are logged and skipped.
    async fn retrieve_all(
        &self,
        concepts: &ConceptSet,
        cancel: &CancellationToken,
    ) -> Result<Vec<EvidenceDocument>> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_retrievals));

        let lookups = concepts.iter().map(|concept| {
            let semaphore = Arc::clone(&semaphore);
            let retriever = Arc::clone(&self.retriever);
            let concept = concept.to_string();
            let cancel = cancel.clone();
            async move {
                let _permit = semaphore.acquire().await.expect("semaphore never closed");
                let resolved = retriever.resolve(&concept, &cancel).await;
                (concept, resolved)
            }
        });

        let mut documents = Vec::new();
        for (concept, resolved) in futures::future::join_all(lookups).await {
            match resolved {
                Ok(Some(document)) => documents.push(document),
                Ok(None) => {}
                Err(VerifyError::Cancelled) => return Err(VerifyError::Cancelled),
                // Per-concept failures are tolerated, never escalated
                Err(e) => {
                    warn!(concept = %concept, error = %e, "skipping concept after retrieval failure");
                }
            }
        }

        if cancel.is_cancelled() {
            return Err(VerifyError::Cancelled);
        }

        Ok(documents)
    }
}
