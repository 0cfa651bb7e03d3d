//! Concept extraction from raw claim text

use crate::lexicon::Lexicon;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum number of concepts retained per claim
pub const MAX_CONCEPTS: usize = 5;

/// Minimum character length (exclusive) for a qualifying concept
pub const MIN_CONCEPT_LEN: usize = 3;

/// Maximal runs of alphabetic characters, accented letters included
static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\p{Alphabetic}+").expect("word pattern is valid")
});

/// The claim under verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim(String);

impl Claim {
    /// Wrap a raw input string; `None` for empty or whitespace-only input.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Claim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// At most [`MAX_CONCEPTS`] distinct lowercase terms derived from a claim,
/// in first-occurrence order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConceptSet(Vec<String>);

impl ConceptSet {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn terms(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Comma-separated rendering for prompts and progress output.
    pub fn joined(&self) -> String {
        self.0.join(", ")
    }
}

/// Turns raw claim text into a bounded set of candidate concepts
#[derive(Debug, Clone)]
pub struct ConceptExtractor {
    lexicon: Lexicon,
}

impl ConceptExtractor {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Extract up to [`MAX_CONCEPTS`] concepts from a claim.
    ///
    /// Tokens are lowercased; stopwords and tokens of length ≤ [`MIN_CONCEPT_LEN`]
    /// are dropped. Duplicates collapse to their first occurrence, which keeps
    /// concept selection reproducible across runs.
    pub fn extract(&self, claim: &Claim) -> ConceptSet {
        let mut seen = Vec::with_capacity(MAX_CONCEPTS);

        for token in WORD_PATTERN.find_iter(claim.text()) {
            let term = token.as_str().to_lowercase();
            if term.chars().count() <= MIN_CONCEPT_LEN || self.lexicon.is_stopword(&term) {
                continue;
            }
            if seen.contains(&term) {
                continue;
            }
            seen.push(term);
            if seen.len() == MAX_CONCEPTS {
                break;
            }
        }

        ConceptSet(seen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> ConceptExtractor {
        ConceptExtractor::new(Lexicon::french())
    }

    fn claim(text: &str) -> Claim {
        Claim::new(text).unwrap()
    }

    #[test]
    fn test_extracts_lowercased_significant_terms() {
        let concepts = extractor().extract(&claim("Le Soleil provoque la photosynthèse"));
        assert_eq!(
            concepts.terms(),
            ["soleil", "provoque", "photosynthèse"]
        );
    }

    #[test]
    fn test_drops_stopwords_and_short_tokens() {
        let concepts = extractor().extract(&claim("La lune est un petit objet gris"));
        assert_eq!(concepts.terms(), ["lune", "petit", "objet", "gris"]);

        let lexicon = Lexicon::french();
        for term in concepts.iter() {
            assert!(!lexicon.is_stopword(term));
            assert!(term.chars().count() > MIN_CONCEPT_LEN);
        }
    }

    #[test]
    fn test_caps_at_five_concepts() {
        let concepts = extractor().extract(&claim(
            "océan montagne rivière forêt désert volcan glacier",
        ));
        assert_eq!(concepts.len(), MAX_CONCEPTS);
        assert_eq!(
            concepts.terms(),
            ["océan", "montagne", "rivière", "forêt", "désert"]
        );
    }

    #[test]
    fn test_dedup_keeps_first_occurrence_order() {
        let concepts = extractor().extract(&claim("terre soleil terre orbite soleil lune"));
        assert_eq!(concepts.terms(), ["terre", "soleil", "orbite", "lune"]);
    }

    #[test]
    fn test_deterministic_across_runs() {
        let c = claim("La Terre tourne autour du Soleil en une année");
        assert_eq!(extractor().extract(&c), extractor().extract(&c));
    }

    #[test]
    fn test_all_tokens_filtered_yields_empty_set() {
        let concepts = extractor().extract(&claim("Le la des"));
        assert!(concepts.is_empty());
    }

    #[test]
    fn test_accented_words_tokenize_as_single_terms() {
        let concepts = extractor().extract(&claim("La température élevée"));
        assert_eq!(concepts.terms(), ["température", "élevée"]);
    }

    #[test]
    fn test_empty_claim_rejected() {
        assert!(Claim::new("   ").is_none());
        assert!(Claim::new("").is_none());
    }
}
