//! Language-model oracles: a grounded reasoner and a strict reference classifier

pub mod chat;
pub mod reasoning;
pub mod reference;

pub use chat::OllamaChatClient;
pub use reasoning::{OllamaReasoningOracle, ReasoningOracle};
pub use reference::{OllamaReferenceOracle, ReferenceOracle};
