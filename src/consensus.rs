//! Reconciliation of the two oracle verdicts

use crate::verdict::Verdict;
use serde::{Deserialize, Serialize};

/// Outcome of comparing the two verdicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsensusOutcome {
    /// Both oracles committed to the same truth value
    Concordant,
    /// The oracles disagree, or at least one did not commit to a truth value
    Disagreement,
}

impl std::fmt::Display for ConsensusOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsensusOutcome::Concordant => f.write_str("CONCORDANT"),
            ConsensusOutcome::Disagreement => f.write_str("DISAGREEMENT"),
        }
    }
}

/// The two verdicts, their reconciliation, and the reasoning text for human inspection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusResult {
    pub reasoning_verdict: Verdict,
    pub reference_verdict: Verdict,
    pub outcome: ConsensusOutcome,
    pub reasoning_text: String,
    pub reference_text: String,
}

/// Pure reconciliation of two verdicts.
///
/// Concordant iff both verdicts resolve to the same value among {True, False}.
/// Every other combination, including any Uncertain or Unparseable verdict, is
/// a Disagreement.
pub struct ConsensusEngine;

impl ConsensusEngine {
    pub fn reconcile(reasoning: Verdict, reference: Verdict) -> ConsensusOutcome {
        if reasoning.is_decisive() && reasoning == reference {
            ConsensusOutcome::Concordant
        } else {
            ConsensusOutcome::Disagreement
        }
    }
}
