//! Canonical verdicts and oracle-output parsing
//!
//! Both oracle replies are mapped into the same [`Verdict`] abstraction, but
//! through different parsers: the constrained reference oracle gets a strict
//! exactly-one-token parser, the free-form reasoning oracle a best-effort
//! keyword classifier. Neither guesses: anything ambiguous is `Unparseable`.

use crate::lexicon::Lexicon;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\p{Alphabetic}+").expect("token pattern is valid")
});

/// Canonical truth judgment derived from an oracle reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    True,
    False,
    Uncertain,
    /// The reply could not be mapped to a single canonical judgment
    Unparseable,
}

impl Verdict {
    /// Whether this verdict commits to a truth value.
    pub fn is_decisive(self) -> bool {
        matches!(self, Verdict::True | Verdict::False)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Verdict::True => "TRUE",
            Verdict::False => "FALSE",
            Verdict::Uncertain => "UNCERTAIN",
            Verdict::Unparseable => "UNPARSEABLE",
        };
        f.write_str(label)
    }
}

fn marker_hits(reply: &str, lexicon: &Lexicon) -> (bool, bool, bool) {
    let mut has_true = false;
    let mut has_false = false;
    let mut has_uncertain = false;

    for token in TOKEN_PATTERN.find_iter(reply) {
        let token = token.as_str().to_lowercase();
        has_true |= lexicon.true_markers.contains(token.as_str());
        has_false |= lexicon.false_markers.contains(token.as_str());
        has_uncertain |= lexicon.uncertain_markers.contains(token.as_str());
    }

    (has_true, has_false, has_uncertain)
}

/// Strict parser for the constrained reference oracle.
///
/// The reply must contain exactly one distinct canonical truth token
/// (word-boundary match, case-insensitive). Zero tokens, or tokens from more
/// than one category, map to [`Verdict::Unparseable`].
pub fn parse_constrained(reply: &str, lexicon: &Lexicon) -> Verdict {
    let (has_true, has_false, has_uncertain) = marker_hits(reply, lexicon);

    match (has_true, has_false, has_uncertain) {
        (true, false, false) => Verdict::True,
        (false, true, false) => Verdict::False,
        (false, false, true) => Verdict::Uncertain,
        _ => {
            warn!(reply = %reply.trim(), "reference reply is not a single canonical token");
            Verdict::Unparseable
        }
    }
}

/// Best-effort keyword classifier for the free-form reasoning oracle.
///
/// A reply carrying only true-markers is `True`, only false-markers `False`,
/// neither `Uncertain`. A reply carrying both contradicts itself and maps to
/// `Unparseable` rather than letting one marker win.
pub fn classify_freeform(reply: &str, lexicon: &Lexicon) -> Verdict {
    let (has_true, has_false, _) = marker_hits(reply, lexicon);

    match (has_true, has_false) {
        (true, true) => {
            warn!("reasoning reply contains both true and false markers, treating as unparseable");
            Verdict::Unparseable
        }
        (true, false) => Verdict::True,
        (false, true) => Verdict::False,
        (false, false) => Verdict::Uncertain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        Lexicon::french()
    }

    #[test]
    fn test_constrained_accepts_single_canonical_token() {
        assert_eq!(parse_constrained("RESULTAT_ATTENDU: VRAI", &lexicon()), Verdict::True);
        assert_eq!(parse_constrained("RESULTAT_ATTENDU: FAUX", &lexicon()), Verdict::False);
        assert_eq!(
            parse_constrained("RESULTAT_ATTENDU: INCERTAIN", &lexicon()),
            Verdict::Uncertain
        );
    }

    #[test]
    fn test_constrained_rejects_multiple_categories() {
        assert_eq!(
            parse_constrained("VRAI ou FAUX, difficile à dire", &lexicon()),
            Verdict::Unparseable
        );
    }

    #[test]
    fn test_constrained_rejects_no_token() {
        assert_eq!(parse_constrained("peut-être", &lexicon()), Verdict::Unparseable);
        assert_eq!(parse_constrained("", &lexicon()), Verdict::Unparseable);
    }

    #[test]
    fn test_constrained_matches_whole_words_only() {
        // "vraiment" must not count as a VRAI token
        assert_eq!(parse_constrained("vraiment", &lexicon()), Verdict::Unparseable);
    }

    #[test]
    fn test_freeform_true_marker_only() {
        assert_eq!(
            classify_freeform("Le mécanisme est expliqué, l'affirmation est VRAIE.", &lexicon()),
            Verdict::True
        );
    }

    #[test]
    fn test_freeform_false_marker_only() {
        assert_eq!(
            classify_freeform("Non, cette affirmation est fausse car le Soleil est central.", &lexicon()),
            Verdict::False
        );
    }

    #[test]
    fn test_freeform_no_marker_is_uncertain() {
        assert_eq!(
            classify_freeform("Le contexte ne permet pas de conclure.", &lexicon()),
            Verdict::Uncertain
        );
    }

    #[test]
    fn test_freeform_contradictory_markers_are_unparseable() {
        assert_eq!(
            classify_freeform("C'est vrai en partie, mais globalement faux.", &lexicon()),
            Verdict::Unparseable
        );
    }

    #[test]
    fn test_decisive_verdicts() {
        assert!(Verdict::True.is_decisive());
        assert!(Verdict::False.is_decisive());
        assert!(!Verdict::Uncertain.is_decisive());
        assert!(!Verdict::Unparseable.is_decisive());
    }
}
