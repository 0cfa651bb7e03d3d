//! Retrieved evidence text bound to a single concept

use serde::{Deserialize, Serialize};

/// A bounded-length encyclopedic text retrieved for one concept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceDocument {
    /// The concept this document was resolved from
    pub concept: String,
    /// Title of the source page
    pub title: String,
    /// Extract text, prefix-truncated to the configured maximum
    pub text: String,
}

impl EvidenceDocument {
    /// Build a document, truncating the text to at most `max_chars` characters
    /// on a char boundary.
    pub fn new(
        concept: impl Into<String>,
        title: impl Into<String>,
        text: &str,
        max_chars: usize,
    ) -> Self {
        let text = match text.char_indices().nth(max_chars) {
            Some((byte_index, _)) => text[..byte_index].to_string(),
            None => text.to_string(),
        };

        Self {
            concept: concept.into(),
            title: title.into(),
            text,
        }
    }
}
