//! Triage orchestrator - main coordinator
//!
//! Runs one symptom check end to end, coordinating:
//! - Knowledge base lookup
//! - Guidance text assembly
//! - Summarization
//! - Background speech playback

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::errors::Result;
use crate::speech::SpeechEngine;
use crate::summarizer::{Summarizer, SummaryOptions};
use crate::triage::{DiagnosisResult, KnowledgeBase};

/// Outcome of one triage run
#[derive(Debug, Clone, Serialize)]
pub struct TriageReport {
    /// Correlation id, also written to the request log
    pub request_id: Uuid,

    /// Matched guidance, in knowledge base order
    pub results: Vec<DiagnosisResult>,

    /// Patient-facing summary of the guidance
    pub summary: String,

    /// When the report was produced
    pub generated_at: DateTime<Utc>,
}

/// Join matched guidance into the text handed to the summarizer
///
/// One sentence pair per result: "<symptom> causes <diagnosis>. Advice:
/// <advice>.", joined by single spaces.
pub fn build_prompt(results: &[DiagnosisResult]) -> String {
    results
        .iter()
        .map(|item| {
            format!(
                "{} causes {}. Advice: {}.",
                item.symptom, item.diagnosis, item.advice
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Main triage coordinator
///
/// Holds the knowledge base plus the two injected collaborators. One
/// instance is shared by all requests.
pub struct TriageOrchestrator {
    knowledge: KnowledgeBase,
    summarizer: Arc<dyn Summarizer>,
    speech: Arc<dyn SpeechEngine>,
    options: SummaryOptions,
}

impl TriageOrchestrator {
    /// Create an orchestrator over the given collaborators
    pub fn new(
        knowledge: KnowledgeBase,
        summarizer: Arc<dyn Summarizer>,
        speech: Arc<dyn SpeechEngine>,
        options: SummaryOptions,
    ) -> Self {
        Self {
            knowledge,
            summarizer,
            speech,
            options,
        }
    }

    /// The knowledge base behind this orchestrator
    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Run the full pipeline for one free-text input
    ///
    /// Summarization failures abort the run. Speech playback runs in
    /// the background and its failures are only logged.
    pub async fn triage(&self, input: &str) -> Result<TriageReport> {
        let request_id = Uuid::new_v4();

        let results = self.knowledge.diagnose(input);
        let prompt = build_prompt(&results);
        let summary = self.summarizer.summarize(&prompt, &self.options).await?;

        self.spawn_speech(summary.clone());

        Ok(TriageReport {
            request_id,
            results,
            summary,
            generated_at: Utc::now(),
        })
    }

    /// Start reading the summary aloud without waiting for it
    fn spawn_speech(&self, summary: String) {
        let speech = Arc::clone(&self.speech);
        tokio::spawn(async move {
            if let Err(e) = speech.speak(&summary).await {
                warn!("Speech playback failed: {}", e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::Severity;

    fn result(symptom: &str, diagnosis: &str, advice: &str) -> DiagnosisResult {
        DiagnosisResult {
            symptom: symptom.to_string(),
            diagnosis: diagnosis.to_string(),
            advice: advice.to_string(),
            severity: Severity::Mild,
        }
    }

    #[test]
    fn test_prompt_matches_template() {
        let results = vec![result(
            "headache",
            "Possibly migraine, dehydration, or stress-related.",
            "Stay hydrated, rest in a quiet dark room, and consider mild painkillers.",
        )];

        let prompt = build_prompt(&results);
        assert_eq!(
            prompt,
            "headache causes Possibly migraine, dehydration, or stress-related.. \
             Advice: Stay hydrated, rest in a quiet dark room, and consider mild painkillers.."
        );
    }

    #[test]
    fn test_prompt_joins_results_with_spaces() {
        let results = vec![
            result("fever", "d1.", "a1."),
            result("cough", "d2.", "a2."),
        ];

        let prompt = build_prompt(&results);
        assert_eq!(
            prompt,
            "fever causes d1.. Advice: a1.. cough causes d2.. Advice: a2.."
        );
    }

    #[test]
    fn test_prompt_for_sentinel_result() {
        let prompt = build_prompt(&[DiagnosisResult::unknown()]);
        assert_eq!(
            prompt,
            "Unknown causes No specific diagnosis found.. \
             Advice: Please consult a healthcare professional.."
        );
    }
}
