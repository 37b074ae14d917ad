//! SymTriage - Symptom Checker Service
//!
//! A web service that matches free-text symptom descriptions against a
//! built-in guidance table, condenses the matched advice through a local
//! Ollama summarization model, and hands the result back as HTML, JSON,
//! or a downloadable PDF report.
//!
//! # Architecture
//!
//! - **triage**: symptom knowledge base + substring matcher
//! - **summarizer**: streaming Ollama client behind the `Summarizer` trait
//! - **speech**: optional spoken playback of summaries
//! - **export**: PDF report writer
//! - **server**: axum HTTP surface

pub mod errors;
pub mod config;
pub mod triage;
pub mod summarizer;
pub mod speech;
pub mod export;
pub mod orchestrator;
pub mod server;
pub mod doctor;
pub mod cli;

// Re-export commonly used types
pub use errors::{Result, TriageError};
