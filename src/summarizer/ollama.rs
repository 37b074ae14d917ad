//! Ollama-backed summarizer
//!
//! Streams a summary from a local Ollama instance via POST /api/generate
//! and reassembles the response fragments into the final text. Sampling
//! is pinned (temperature 0, fixed seed) so the same guidance text always
//! summarizes to the same words.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TriageError};
use crate::summarizer::stream::ChunkParser;
use crate::summarizer::{Summarizer, SummaryOptions};

/// Default summarizer API endpoint
pub const DEFAULT_SUMMARIZER_URL: &str = "http://127.0.0.1:11434";

/// Default model
pub const DEFAULT_MODEL: &str = "qwen2.5:7b-instruct";

/// Seed used for pinned sampling
const DETERMINISTIC_SEED: i64 = 42;

/// Request timeout (60 seconds; covers model cold start)
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Streaming summarizer client
#[derive(Debug, Clone)]
pub struct OllamaSummarizer {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaSummarizer {
    /// Create a summarizer against the default local endpoint
    pub fn new() -> Result<Self> {
        Self::with_config(DEFAULT_SUMMARIZER_URL, DEFAULT_MODEL)
    }

    /// Create a summarizer with custom endpoint and model
    pub fn with_config(base_url: &str, model: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(TriageError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    /// Check if the summarizer API answers at all
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/api/version", self.base_url);

        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    /// List models installed on the summarizer host
    pub async fn list_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TriageError::SummarizerApi(format!("Failed to list models: {}", e)))?;

        if !response.status().is_success() {
            return Err(TriageError::SummarizerApi(
                "Failed to retrieve model list".to_string(),
            ));
        }

        let models_response: ModelsResponse = response
            .json()
            .await
            .map_err(|e| TriageError::SummarizerApi(format!("Failed to parse models: {}", e)))?;

        Ok(models_response
            .models
            .into_iter()
            .map(|m| m.name)
            .collect())
    }

    /// Check whether the configured model is installed
    pub async fn model_available(&self) -> Result<bool> {
        let models = self.list_models().await?;
        Ok(models.iter().any(|name| name == &self.model))
    }

    /// Get current model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Wrap guidance text in the summarization instruction
    fn build_instruction(text: &str, options: &SummaryOptions) -> String {
        format!(
            "Summarize the following health guidance for a patient in plain language. \
             Write one paragraph of roughly {} to {} words, keeping every recommendation. \
             Do not invent advice that is not in the text.\n\n{}",
            options.min_length, options.max_length, text
        )
    }
}

#[async_trait]
impl Summarizer for OllamaSummarizer {
    async fn summarize(&self, text: &str, options: &SummaryOptions) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);

        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: Self::build_instruction(text, options),
            stream: true,
            options: GenerateParams::from_options(options),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| TriageError::SummarizerApi(format!("Failed to send request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TriageError::SummarizerApi(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let mut stream = response.bytes_stream();
        let mut parser = ChunkParser::new();
        let mut summary = String::new();
        let mut done = false;

        while let Some(item) = stream.next().await {
            let bytes = item.map_err(|e| TriageError::Streaming(e.to_string()))?;

            for json in parser.add_bytes(&bytes)? {
                let chunk = ChunkParser::parse_chunk(&json)?;

                if let Some(error) = chunk.error {
                    return Err(TriageError::SummarizerApi(error));
                }

                summary.push_str(&chunk.response);

                if chunk.done {
                    done = true;
                }
            }

            if done {
                break;
            }
        }

        if !done {
            return Err(TriageError::Streaming(
                "stream ended before completion".to_string(),
            ));
        }

        let summary = summary.trim().to_string();
        if summary.is_empty() {
            return Err(TriageError::SummarizerApi(
                "summarizer returned an empty summary".to_string(),
            ));
        }

        Ok(summary)
    }
}

/// Generate request body
#[derive(Debug, Clone, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: GenerateParams,
}

/// Model parameters for a generate call
#[derive(Debug, Clone, Serialize)]
struct GenerateParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<i64>,
    num_predict: u32,
}

impl GenerateParams {
    fn from_options(options: &SummaryOptions) -> Self {
        if options.deterministic {
            Self {
                temperature: Some(0.0),
                seed: Some(DETERMINISTIC_SEED),
                num_predict: options.max_length,
            }
        } else {
            Self {
                temperature: None,
                seed: None,
                num_predict: options.max_length,
            }
        }
    }
}

/// Models list response
#[derive(Debug, Deserialize)]
struct ModelsResponse {
    models: Vec<ModelInfo>,
}

/// Model information
#[derive(Debug, Deserialize)]
struct ModelInfo {
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarizer_creation() {
        let summarizer = OllamaSummarizer::new();
        assert!(summarizer.is_ok());

        let summarizer = summarizer.unwrap();
        assert_eq!(summarizer.model(), DEFAULT_MODEL);
        assert_eq!(summarizer.base_url(), DEFAULT_SUMMARIZER_URL);
    }

    #[test]
    fn test_summarizer_with_config() {
        let summarizer = OllamaSummarizer::with_config(
            "http://localhost:11434/",
            "llama2:7b",
        );
        assert!(summarizer.is_ok());

        let summarizer = summarizer.unwrap();
        assert_eq!(summarizer.model(), "llama2:7b");
        assert_eq!(summarizer.base_url(), "http://localhost:11434");
    }

    #[test]
    fn test_instruction_carries_bounds_and_text() {
        let options = SummaryOptions::default();
        let prompt = OllamaSummarizer::build_instruction("fever causes infection.", &options);

        assert!(prompt.contains("30 to 100 words"));
        assert!(prompt.ends_with("fever causes infection."));
    }

    #[test]
    fn test_deterministic_params_pin_sampling() {
        let params = GenerateParams::from_options(&SummaryOptions::default());
        let json = serde_json::to_value(&params).unwrap();

        assert_eq!(json["temperature"], 0.0);
        assert_eq!(json["seed"], 42);
        assert_eq!(json["num_predict"], 100);
    }

    #[test]
    fn test_sampled_params_omit_pinning() {
        let options = SummaryOptions {
            deterministic: false,
            ..Default::default()
        };
        let json = serde_json::to_value(GenerateParams::from_options(&options)).unwrap();

        assert!(json.get("temperature").is_none());
        assert!(json.get("seed").is_none());
        assert_eq!(json["num_predict"], 100);
    }
}
