//! Free-form reasoning oracle, grounded in the retrieved evidence

use super::chat::OllamaChatClient;
use crate::cancel::CancellationToken;
use crate::concepts::{Claim, ConceptSet};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

const SERVICE: &str = "reasoning oracle";

/// Produces a grounded, free-form causal verdict from claim + concepts + evidence
#[async_trait]
pub trait ReasoningOracle: Send + Sync {
    async fn judge(
        &self,
        claim: &Claim,
        concepts: &ConceptSet,
        evidence: &str,
        cancel: &CancellationToken,
    ) -> Result<String>;
}

/// Reasoning oracle backed by an Ollama chat model
pub struct OllamaReasoningOracle {
    chat: Arc<OllamaChatClient>,
    model: String,
}

impl OllamaReasoningOracle {
    pub fn new(chat: Arc<OllamaChatClient>, model: impl Into<String>) -> Self {
        Self {
            chat,
            model: model.into(),
        }
    }

    /// Prompt contract: answer strictly from the supplied context, explain the
    /// causal mechanism tied to the concepts, state true or false, and flag
    /// insufficiency explicitly.
    fn build_prompt(claim: &Claim, concepts: &ConceptSet, evidence: &str) -> String {
        format!(
            "CONTEXTE (encyclopédique) :\n\
             {evidence}\n\n\
             En te basant STRICTEMENT sur ce contexte :\n\
             - explique le mécanisme réel lié aux concepts : {concepts}\n\
             - indique si l'affirmation est vraie ou fausse\n\
             - si l'information est insuffisante, dis-le clairement\n\n\
             AFFIRMATION : \"{claim}\"\n\n\
             Réponse courte, factuelle et causale.",
            concepts = concepts.joined(),
        )
    }
}

#[async_trait]
impl ReasoningOracle for OllamaReasoningOracle {
    async fn judge(
        &self,
        claim: &Claim,
        concepts: &ConceptSet,
        evidence: &str,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let prompt = Self::build_prompt(claim, concepts, evidence);
        self.chat.chat(SERVICE, &self.model, &prompt, cancel).await
    }
}
