//! Integration tests for the triage pipeline
//!
//! Exercises the orchestrator end to end against stub collaborators,
//! without requiring Ollama or a speech engine on the machine.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_test::assert_ok;

use symtriage::orchestrator::{build_prompt, TriageOrchestrator};
use symtriage::speech::SpeechEngine;
use symtriage::summarizer::{Summarizer, SummaryOptions};
use symtriage::triage::KnowledgeBase;
use symtriage::{Result, TriageError};

/// Returns a canned summary and records every prompt it was handed
struct RecordingSummarizer {
    seen: Mutex<Vec<String>>,
    response: String,
}

impl RecordingSummarizer {
    fn new(response: &str) -> Self {
        Self {
            seen: Mutex::new(Vec::new()),
            response: response.to_string(),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Summarizer for RecordingSummarizer {
    async fn summarize(&self, text: &str, _options: &SummaryOptions) -> Result<String> {
        self.seen.lock().unwrap().push(text.to_string());
        Ok(self.response.clone())
    }
}

/// Always fails, like a backend with the model missing
struct FailingSummarizer;

#[async_trait]
impl Summarizer for FailingSummarizer {
    async fn summarize(&self, _text: &str, _options: &SummaryOptions) -> Result<String> {
        Err(TriageError::SummarizerApi(
            "model 'qwen2.5:7b-instruct' not found".to_string(),
        ))
    }
}

/// Forwards spoken text over a channel so tests can await it
struct ChannelSpeech {
    tx: mpsc::UnboundedSender<String>,
}

#[async_trait]
impl SpeechEngine for ChannelSpeech {
    async fn speak(&self, text: &str) -> Result<()> {
        let _ = self.tx.send(text.to_string());
        Ok(())
    }
}

/// Always fails, like a machine without espeak-ng installed
struct FailingSpeech;

#[async_trait]
impl SpeechEngine for FailingSpeech {
    async fn speak(&self, _text: &str) -> Result<()> {
        Err(TriageError::Speech("espeak-ng: command not found".to_string()))
    }
}

/// Sink for tests that do not care about playback
struct SilentSpeech;

#[async_trait]
impl SpeechEngine for SilentSpeech {
    async fn speak(&self, _text: &str) -> Result<()> {
        Ok(())
    }
}

fn orchestrator_with(
    summarizer: Arc<dyn Summarizer>,
    speech: Arc<dyn SpeechEngine>,
) -> TriageOrchestrator {
    TriageOrchestrator::new(
        KnowledgeBase::builtin(),
        summarizer,
        speech,
        SummaryOptions::default(),
    )
}

#[tokio::test]
async fn test_summarizer_receives_joined_guidance() {
    let stub = Arc::new(RecordingSummarizer::new("Rest and drink fluids."));
    let orchestrator = orchestrator_with(stub.clone(), Arc::new(SilentSpeech));

    let report = orchestrator
        .triage("I have a fever and a bad cough")
        .await
        .unwrap();

    assert_eq!(report.results.len(), 2);

    let prompts = stub.prompts();
    assert_eq!(prompts.len(), 1);

    // The summarizer sees exactly the guidance joined by build_prompt
    let expected = build_prompt(&KnowledgeBase::builtin().diagnose("I have a fever and a bad cough"));
    assert_eq!(prompts[0], expected);
    assert!(prompts[0].starts_with(
        "fever causes You may have a viral infection such as the flu, dengue, or COVID-19."
    ));
    assert!(prompts[0].contains("cough causes Could be bronchitis, cold, or COVID-19."));
}

#[tokio::test]
async fn test_summary_lands_in_report() {
    let stub = Arc::new(RecordingSummarizer::new("Drink fluids and see a doctor."));
    let orchestrator = orchestrator_with(stub, Arc::new(SilentSpeech));

    let report = orchestrator.triage("headache").await.unwrap();
    assert_eq!(report.summary, "Drink fluids and see a doctor.");
}

#[tokio::test]
async fn test_unrecognized_input_still_flows_through() {
    let stub = Arc::new(RecordingSummarizer::new("See a professional."));
    let orchestrator = orchestrator_with(stub.clone(), Arc::new(SilentSpeech));

    let report = orchestrator.triage("pain in my chest").await.unwrap();

    assert_eq!(report.results.len(), 1);
    assert!(report.results[0].is_unknown());

    let prompts = stub.prompts();
    assert!(prompts[0].starts_with("Unknown causes No specific diagnosis found."));
}

#[tokio::test]
async fn test_speech_receives_the_summary() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let stub = Arc::new(RecordingSummarizer::new("Stay hydrated."));
    let orchestrator = orchestrator_with(stub, Arc::new(ChannelSpeech { tx }));

    orchestrator.triage("fever").await.unwrap();

    // Playback runs on a background task, so give it a moment
    let spoken = tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("speech was never invoked");
    assert_eq!(spoken.as_deref(), Some("Stay hydrated."));
}

#[tokio::test]
async fn test_speech_failure_does_not_fail_triage() {
    let stub = Arc::new(RecordingSummarizer::new("Stay hydrated."));
    let orchestrator = orchestrator_with(stub, Arc::new(FailingSpeech));

    let report = assert_ok!(orchestrator.triage("fever").await);
    assert_eq!(report.summary, "Stay hydrated.");
}

#[tokio::test]
async fn test_summarizer_error_propagates() {
    let orchestrator = orchestrator_with(Arc::new(FailingSummarizer), Arc::new(SilentSpeech));

    let result = orchestrator.triage("fever").await;
    match result {
        Err(TriageError::SummarizerApi(msg)) => {
            assert!(msg.contains("not found"));
        }
        other => panic!("Expected SummarizerApi error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_each_run_gets_its_own_request_id() {
    let stub = Arc::new(RecordingSummarizer::new("Rest."));
    let orchestrator = orchestrator_with(stub, Arc::new(SilentSpeech));

    let first = orchestrator.triage("fever").await.unwrap();
    let second = orchestrator.triage("fever").await.unwrap();
    assert_ne!(first.request_id, second.request_id);
}
