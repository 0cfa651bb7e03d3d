//! Locale lexicon: stopwords, causal markers, and truth-marker tokens
//!
//! The extraction and scoring heuristics are purely lexical, so everything
//! language-specific lives here. French is the default locale; English is
//! provided for the configurable-stopword-list escape hatch.

use std::collections::HashSet;

/// Language-specific word lists used by extraction, scoring, and verdict parsing
#[derive(Debug, Clone)]
pub struct Lexicon {
    /// Tokens never admitted as concepts
    pub stopwords: HashSet<&'static str>,
    /// Connector phrases signaling explanatory/causal language
    pub causal_markers: Vec<&'static str>,
    /// Word tokens counting as an affirmative truth judgment
    pub true_markers: HashSet<&'static str>,
    /// Word tokens counting as a negative truth judgment
    pub false_markers: HashSet<&'static str>,
    /// Word tokens counting as an explicit abstention
    pub uncertain_markers: HashSet<&'static str>,
}

impl Lexicon {
    /// French lexicon (default locale)
    pub fn french() -> Self {
        Self {
            stopwords: HashSet::from([
                "le", "la", "les", "un", "une", "des", "est", "sont", "ne", "pas",
                "que", "qui", "dans", "sur", "avec", "pour", "par", "ce", "cela",
            ]),
            causal_markers: vec![
                "car", "parce que", "en raison", "provoque", "résulte", "cause",
            ],
            true_markers: HashSet::from(["vrai", "vraie", "vrais", "vraies"]),
            false_markers: HashSet::from(["faux", "fausse", "fausses"]),
            uncertain_markers: HashSet::from(["incertain", "incertaine", "insuffisant", "insuffisante"]),
        }
    }

    /// English lexicon
    pub fn english() -> Self {
        Self {
            stopwords: HashSet::from([
                "the", "a", "an", "is", "are", "was", "were", "not", "that",
                "which", "in", "on", "with", "for", "by", "this", "it", "of", "to",
            ]),
            causal_markers: vec![
                "because", "causes", "caused by", "results in", "due to", "leads to",
            ],
            true_markers: HashSet::from(["true", "correct", "accurate"]),
            false_markers: HashSet::from(["false", "incorrect", "inaccurate"]),
            uncertain_markers: HashSet::from(["uncertain", "insufficient", "unknown"]),
        }
    }

    /// Lexicon for a locale code, falling back to French.
    pub fn for_locale(locale: &str) -> Self {
        match locale {
            "en" => Self::english(),
            _ => Self::french(),
        }
    }

    /// Whether a lowercased token is a stopword.
    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_french_is_default_fallback() {
        let lexicon = Lexicon::for_locale("pt");
        assert!(lexicon.is_stopword("les"));
        assert!(lexicon.true_markers.contains("vrai"));
    }

    #[test]
    fn test_english_locale() {
        let lexicon = Lexicon::for_locale("en");
        assert!(lexicon.is_stopword("the"));
        assert!(lexicon.false_markers.contains("false"));
    }

    #[test]
    fn test_causal_markers_include_multiword_phrases() {
        let lexicon = Lexicon::french();
        assert!(lexicon.causal_markers.contains(&"parce que"));
    }
}
