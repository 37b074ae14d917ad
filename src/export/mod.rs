//! Document export module
//!
//! Turns a summary into a downloadable PDF.

pub mod pdf;

// Re-export commonly used items
pub use pdf::{render_summary, PDF_FILENAME};
