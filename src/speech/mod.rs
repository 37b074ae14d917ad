//! Speech output module
//!
//! Reads summaries aloud through an external text-to-speech command.
//! Playback is best-effort: the pipeline never waits on it and never
//! fails because of it.

use async_trait::async_trait;
use tokio::process::Command;

use crate::errors::{Result, TriageError};

/// Default text-to-speech binary
pub const DEFAULT_SPEECH_COMMAND: &str = "espeak-ng";

/// Speaks a piece of text out loud
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Speak `text`, returning once playback finished
    async fn speak(&self, text: &str) -> Result<()>;
}

/// Speech engine that shells out to a TTS command such as espeak-ng
#[derive(Debug, Clone)]
pub struct CommandSpeech {
    command: String,
}

impl CommandSpeech {
    /// Create an engine around the given TTS binary
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
        }
    }

    /// Get the configured binary name
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Check whether the TTS binary exists on PATH
    pub async fn is_available(&self) -> bool {
        Command::new("which")
            .arg(&self.command)
            .output()
            .await
            .map(|output| output.status.success())
            .unwrap_or(false)
    }
}

#[async_trait]
impl SpeechEngine for CommandSpeech {
    async fn speak(&self, text: &str) -> Result<()> {
        let output = Command::new(&self.command)
            .arg(text)
            .output()
            .await
            .map_err(|e| {
                TriageError::Speech(format!("failed to run {}: {}", self.command, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TriageError::Speech(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

/// Speech engine that discards all output (used with --no-speech)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSpeech;

#[async_trait]
impl SpeechEngine for NullSpeech {
    async fn speak(&self, _text: &str) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_speech_stores_binary() {
        let speech = CommandSpeech::new("espeak-ng");
        assert_eq!(speech.command(), "espeak-ng");
    }

    #[tokio::test]
    async fn test_null_speech_always_succeeds() {
        let speech = NullSpeech;
        assert!(speech.speak("any summary").await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_binary_is_an_error() {
        let speech = CommandSpeech::new("no-such-tts-binary");
        let result = speech.speak("hello").await;
        assert!(matches!(result, Err(TriageError::Speech(_))));
    }

    #[tokio::test]
    async fn test_missing_binary_reported_unavailable() {
        let speech = CommandSpeech::new("no-such-tts-binary");
        assert!(!speech.is_available().await);
    }

    #[tokio::test]
    async fn test_failing_command_is_an_error() {
        let speech = CommandSpeech::new("false");
        let result = speech.speak("hello").await;
        assert!(matches!(result, Err(TriageError::Speech(_))));
    }
}
