//! Constrained reference oracle: evidence-free three-way classification

use super::chat::OllamaChatClient;
use crate::cancel::CancellationToken;
use crate::concepts::Claim;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

const SERVICE: &str = "reference oracle";

/// Produces a strictly constrained three-way classification from the claim alone.
///
/// The oracle sees only the claim, never the evidence, and so acts as an
/// uncontextualized prior against which the grounded reasoner is checked.
#[async_trait]
pub trait ReferenceOracle: Send + Sync {
    async fn classify(&self, claim: &Claim, cancel: &CancellationToken) -> Result<String>;
}

/// Reference oracle backed by an Ollama chat model
pub struct OllamaReferenceOracle {
    chat: Arc<OllamaChatClient>,
    model: String,
}

impl OllamaReferenceOracle {
    pub fn new(chat: Arc<OllamaChatClient>, model: impl Into<String>) -> Self {
        Self {
            chat,
            model: model.into(),
        }
    }

    /// Prompt contract: exactly one of the three canonical tokens, no other text.
    fn build_prompt(claim: &Claim) -> String {
        format!(
            "Tu es un système de fact-checking très strict.\n\n\
             AFFIRMATION :\n\
             \"{claim}\"\n\n\
             Règles :\n\
             - Réponds UNIQUEMENT par l'une des valeurs suivantes :\n\
             \x20\x20RESULTAT_ATTENDU: VRAI\n\
             \x20\x20RESULTAT_ATTENDU: FAUX\n\
             \x20\x20RESULTAT_ATTENDU: INCERTAIN\n\
             - N'ajoute aucune justification\n\
             - N'ajoute aucun autre texte\n\
             - Si le doute existe, réponds INCERTAIN"
        )
    }
}

#[async_trait]
impl ReferenceOracle for OllamaReferenceOracle {
    async fn classify(&self, claim: &Claim, cancel: &CancellationToken) -> Result<String> {
        let prompt = Self::build_prompt(claim);
        self.chat.chat(SERVICE, &self.model, &prompt, cancel).await
    }
}
