//! Summarization module
//!
//! Provides the `Summarizer` abstraction used by the triage pipeline
//! and its Ollama-backed implementation.

pub mod ollama;
pub mod stream;

use async_trait::async_trait;

use crate::errors::Result;

// Re-export commonly used types
pub use ollama::{OllamaSummarizer, DEFAULT_MODEL, DEFAULT_SUMMARIZER_URL};
pub use stream::{ChunkParser, MAX_BUFFER_SIZE};

/// Length bounds and sampling behavior for a summary request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryOptions {
    /// Soft lower bound on summary length, in tokens
    pub min_length: u32,
    /// Hard upper bound on generated tokens
    pub max_length: u32,
    /// Disable sampling so identical input yields identical output
    pub deterministic: bool,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            min_length: 30,
            max_length: 100,
            deterministic: true,
        }
    }
}

/// Condenses concatenated guidance text into a short patient-facing summary
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Produce a summary of `text` within the given bounds
    async fn summarize(&self, text: &str, options: &SummaryOptions) -> Result<String>;
}
