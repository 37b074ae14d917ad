//! Error types for the symtriage service
//!
//! One error enum covers the matcher, the collaborators, and the service
//! shell; request handlers map these onto generic HTTP failures.

use thiserror::Error;

/// Main error type for the triage service
#[derive(Error, Debug)]
pub enum TriageError {
    /// Summarizer API errors (bad status, malformed payloads)
    #[error("Summarizer API error: {0}")]
    SummarizerApi(String),

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Streaming errors while reading the summarizer response
    #[error("Streaming error: {0}")]
    Streaming(String),

    /// JSON parsing errors
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Speech playback errors
    #[error("Speech playback failed: {0}")]
    Speech(String),

    /// PDF rendering errors
    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors with context
    #[error("Triage error: {0}")]
    Generic(String),
}

/// Result type alias for triage operations
pub type Result<T> = std::result::Result<T, TriageError>;

/// Convert anyhow errors to TriageError
impl From<anyhow::Error> for TriageError {
    fn from(err: anyhow::Error) -> Self {
        TriageError::Generic(err.to_string())
    }
}
