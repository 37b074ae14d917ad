//! Symptom triage module
//!
//! Provides the static knowledge base and the substring matcher
//! that turns free-text symptom descriptions into guidance.

pub mod knowledge;
pub mod matcher;

// Re-export commonly used types
pub use knowledge::{KnowledgeBase, Severity, SymptomEntry};
pub use matcher::{DiagnosisResult, UNKNOWN_SYMPTOM};
