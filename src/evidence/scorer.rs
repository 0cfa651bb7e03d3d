//! Lexical relevance scoring of evidence against the concept set

use super::document::EvidenceDocument;
use crate::concepts::ConceptSet;
use crate::lexicon::Lexicon;
use std::collections::HashMap;
use tracing::debug;

/// Score weight of each causal marker found in a document
const CAUSAL_MARKER_WEIGHT: u32 = 2;

/// An evidence document together with its computed relevance score
#[derive(Debug, Clone)]
pub struct ScoredEvidence {
    pub document: EvidenceDocument,
    pub score: u32,
}

/// Scores evidence text against the concept set and a causal-language heuristic
///
/// Scoring is purely lexical:
/// score = Σ term frequency of concept tokens + 2 × causal markers present.
/// A document can be admitted on causal density alone, with zero concept
/// overlap, or on concept repetition alone, with no causal language.
#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    lexicon: Lexicon,
    threshold: u32,
}

impl RelevanceScorer {
    pub fn new(lexicon: Lexicon, threshold: u32) -> Self {
        Self { lexicon, threshold }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Compute the relevance score of one document against the concept set.
    pub fn score(&self, document: &EvidenceDocument, concepts: &ConceptSet) -> u32 {
        let text = document.text.to_lowercase();

        let mut frequencies: HashMap<&str, u32> = HashMap::new();
        for token in text.split_whitespace() {
            *frequencies.entry(token).or_insert(0) += 1;
        }

        let concept_hits: u32 = concepts
            .iter()
            .map(|concept| frequencies.get(concept).copied().unwrap_or(0))
            .sum();

        let causal_hits = self
            .lexicon
            .causal_markers
            .iter()
            .filter(|marker| text.contains(*marker))
            .count() as u32;

        concept_hits + causal_hits * CAUSAL_MARKER_WEIGHT
    }

    /// Score a document and decide admission at the threshold.
    pub fn admit(&self, document: EvidenceDocument, concepts: &ConceptSet) -> Option<ScoredEvidence> {
        let score = self.score(&document, concepts);
        let admitted = score >= self.threshold;

        debug!(
            concept = %document.concept,
            title = %document.title,
            score,
            admitted,
            "scored evidence document"
        );

        admitted.then_some(ScoredEvidence { document, score })
    }
}
