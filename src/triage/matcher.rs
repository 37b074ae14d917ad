//! Symptom matching
//!
//! Case-insensitive substring scan of free-text input against the
//! knowledge base. Matching is literal: a multi-word keyword only hits
//! when it appears verbatim, and a keyword embedded inside a longer
//! word still counts.

use serde::{Deserialize, Serialize};

use crate::triage::knowledge::{KnowledgeBase, Severity};

/// Sentinel symptom name used when nothing in the table matched
pub const UNKNOWN_SYMPTOM: &str = "Unknown";
const UNKNOWN_DIAGNOSIS: &str = "No specific diagnosis found.";
const UNKNOWN_ADVICE: &str = "Please consult a healthcare professional.";

/// One matched symptom with its guidance, as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub symptom: String,
    pub diagnosis: String,
    pub advice: String,
    pub severity: Severity,
}

impl DiagnosisResult {
    /// The fallback result returned when no keyword matched
    pub fn unknown() -> Self {
        DiagnosisResult {
            symptom: UNKNOWN_SYMPTOM.to_string(),
            diagnosis: UNKNOWN_DIAGNOSIS.to_string(),
            advice: UNKNOWN_ADVICE.to_string(),
            severity: Severity::Unknown,
        }
    }

    /// True for the sentinel produced by an unmatched input
    pub fn is_unknown(&self) -> bool {
        self.symptom == UNKNOWN_SYMPTOM
    }
}

impl KnowledgeBase {
    /// Match free-text symptom input against the table
    ///
    /// Scans every entry in definition order and collects those whose
    /// keyword occurs in the lowercased input. Never returns an empty
    /// vector: an input that matches nothing yields the single
    /// [`DiagnosisResult::unknown`] sentinel.
    pub fn diagnose(&self, input: &str) -> Vec<DiagnosisResult> {
        let normalized = input.to_lowercase();

        let found: Vec<DiagnosisResult> = self
            .entries()
            .iter()
            .filter(|entry| normalized.contains(entry.symptom))
            .map(|entry| DiagnosisResult {
                symptom: entry.symptom.to_string(),
                diagnosis: entry.diagnosis.to_string(),
                advice: entry.advice.to_string(),
                severity: entry.severity,
            })
            .collect();

        if found.is_empty() {
            vec![DiagnosisResult::unknown()]
        } else {
            found
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_single_keyword_match() {
        let results = KnowledgeBase::builtin().diagnose("I have a fever");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].symptom, "fever");
        assert_eq!(results[0].severity, Severity::Moderate);
        assert!(results[0].diagnosis.contains("viral infection"));
    }

    #[test]
    fn test_results_follow_table_order_not_mention_order() {
        let results =
            KnowledgeBase::builtin().diagnose("bad cough, a mild fever and some headache");
        let symptoms: Vec<_> = results.iter().map(|r| r.symptom.as_str()).collect();
        assert_eq!(symptoms, vec!["fever", "cough", "headache"]);
    }

    #[test]
    fn test_case_insensitive() {
        let upper = KnowledgeBase::builtin().diagnose("FEVER AND SORE THROAT");
        let lower = KnowledgeBase::builtin().diagnose("fever and sore throat");
        assert_eq!(upper, lower);
        assert_eq!(upper.len(), 2);
    }

    #[test]
    fn test_keyword_inside_longer_word_matches() {
        let results = KnowledgeBase::builtin().diagnose("I've been coughing all night");
        assert_eq!(results[0].symptom, "cough");
    }

    #[test]
    fn test_multiword_keyword_requires_exact_phrase() {
        // "pain in my chest" never contains the literal "chest pain"
        let results = KnowledgeBase::builtin().diagnose("pain in my chest");
        assert_eq!(results.len(), 1);
        assert!(results[0].is_unknown());
    }

    #[test]
    fn test_no_match_returns_sentinel() {
        let results = KnowledgeBase::builtin().diagnose("qwerty 12345");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].symptom, "Unknown");
        assert_eq!(results[0].diagnosis, "No specific diagnosis found.");
        assert_eq!(results[0].advice, "Please consult a healthcare professional.");
        assert_eq!(results[0].severity, Severity::Unknown);
    }

    #[test]
    fn test_empty_input_returns_sentinel() {
        let results = KnowledgeBase::builtin().diagnose("");
        assert_eq!(results.len(), 1);
        assert!(results[0].is_unknown());
    }

    #[test]
    fn test_overlapping_keywords_both_match() {
        let results =
            KnowledgeBase::builtin().diagnose("frequent urination and burning urination");
        let symptoms: Vec<_> = results.iter().map(|r| r.symptom.as_str()).collect();
        assert_eq!(symptoms, vec!["frequent urination", "burning urination"]);
    }

    #[quickcheck]
    fn prop_never_empty(input: String) -> bool {
        !KnowledgeBase::builtin().diagnose(&input).is_empty()
    }

    #[quickcheck]
    fn prop_embedded_keyword_always_matches(prefix: String, suffix: String) -> bool {
        let input = format!("{} fever {}", prefix, suffix);
        KnowledgeBase::builtin()
            .diagnose(&input)
            .iter()
            .any(|r| r.symptom == "fever")
    }

    #[quickcheck]
    fn prop_ascii_case_insensitive(input: String) -> bool {
        let kb = KnowledgeBase::builtin();
        kb.diagnose(&input) == kb.diagnose(&input.to_ascii_uppercase())
    }

    #[quickcheck]
    fn prop_results_are_subsequence_of_table(input: String) -> bool {
        let kb = KnowledgeBase::builtin();
        let results = kb.diagnose(&input);
        if results[0].is_unknown() {
            return results.len() == 1;
        }
        let order: Vec<&str> = kb.keywords().collect();
        let positions: Vec<usize> = results
            .iter()
            .map(|r| order.iter().position(|k| *k == r.symptom).unwrap())
            .collect();
        positions.windows(2).all(|w| w[0] < w[1])
    }
}
