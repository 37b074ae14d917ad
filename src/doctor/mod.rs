//! Doctor command for service diagnostics
//!
//! Checks every collaborator the symptom checker depends on and the
//! local environment it runs in.

use std::path::PathBuf;

use colored::Colorize;
use sysinfo::System;

use crate::config::Config;
use crate::errors::Result;
use crate::speech::CommandSpeech;
use crate::summarizer::OllamaSummarizer;
use crate::triage::KnowledgeBase;

/// Health check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Pass,
    Warn(String),
    Fail(String),
}

/// Individual health check
#[derive(Debug)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
}

/// Doctor diagnostics system
pub struct Doctor {
    summarizer: OllamaSummarizer,
    speech: CommandSpeech,
    config_dir: PathBuf,
}

impl Doctor {
    /// Create a doctor for the given configuration
    pub fn new(config: &Config) -> Result<Self> {
        let summarizer =
            OllamaSummarizer::with_config(&config.summarizer.base_url(), &config.summarizer.model)?;
        let speech = CommandSpeech::new(&config.speech.command);
        let config_dir = Config::config_path()?
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            summarizer,
            speech,
            config_dir,
        })
    }

    /// Run all health checks
    pub async fn run_diagnostics(&self) -> Vec<HealthCheck> {
        let mut checks = Vec::new();

        checks.push(self.check_summarizer_api().await);
        checks.push(self.check_model_available().await);
        checks.push(self.check_speech_engine().await);
        checks.push(self.check_knowledge_base());
        checks.push(self.check_config_dir());
        checks.push(self.check_memory());

        checks
    }

    /// Check 1: Summarizer API reachable
    async fn check_summarizer_api(&self) -> HealthCheck {
        let name = "Summarizer API".to_string();

        match self.summarizer.health_check().await {
            Ok(true) => HealthCheck {
                name,
                status: HealthStatus::Pass,
            },
            Ok(false) => HealthCheck {
                name,
                status: HealthStatus::Fail(format!(
                    "No response from {}",
                    self.summarizer.base_url()
                )),
            },
            Err(e) => HealthCheck {
                name,
                status: HealthStatus::Fail(format!("Error checking summarizer: {}", e)),
            },
        }
    }

    /// Check 2: Summarization model installed
    async fn check_model_available(&self) -> HealthCheck {
        let name = "Summarization Model".to_string();

        match self.summarizer.model_available().await {
            Ok(true) => HealthCheck {
                name,
                status: HealthStatus::Pass,
            },
            Ok(false) => HealthCheck {
                name,
                status: HealthStatus::Fail(format!(
                    "Model '{}' not installed (try: ollama pull {})",
                    self.summarizer.model(),
                    self.summarizer.model()
                )),
            },
            Err(e) => HealthCheck {
                name,
                status: HealthStatus::Fail(format!("Cannot check models: {}", e)),
            },
        }
    }

    /// Check 3: Text-to-speech binary on PATH
    ///
    /// Speech is optional, so a missing binary only warns.
    async fn check_speech_engine(&self) -> HealthCheck {
        let name = "Speech Engine".to_string();

        if self.speech.is_available().await {
            HealthCheck {
                name,
                status: HealthStatus::Pass,
            }
        } else {
            HealthCheck {
                name,
                status: HealthStatus::Warn(format!(
                    "'{}' not found, summaries will not be spoken",
                    self.speech.command()
                )),
            }
        }
    }

    /// Check 4: Knowledge base integrity
    fn check_knowledge_base(&self) -> HealthCheck {
        let name = "Knowledge Base".to_string();
        let kb = KnowledgeBase::builtin();

        if kb.is_empty() {
            return HealthCheck {
                name,
                status: HealthStatus::Fail("Knowledge base is empty".to_string()),
            };
        }

        let mut seen = std::collections::HashSet::new();
        for entry in kb.entries() {
            if entry.symptom.is_empty() || entry.diagnosis.is_empty() || entry.advice.is_empty() {
                return HealthCheck {
                    name,
                    status: HealthStatus::Fail(format!("Incomplete entry '{}'", entry.symptom)),
                };
            }
            if entry.symptom != entry.symptom.to_lowercase() {
                return HealthCheck {
                    name,
                    status: HealthStatus::Fail(format!(
                        "Key '{}' is not lowercase",
                        entry.symptom
                    )),
                };
            }
            if !seen.insert(entry.symptom) {
                return HealthCheck {
                    name,
                    status: HealthStatus::Fail(format!("Duplicate key '{}'", entry.symptom)),
                };
            }
        }

        HealthCheck {
            name,
            status: HealthStatus::Pass,
        }
    }

    /// Check 5: Config directory writable
    fn check_config_dir(&self) -> HealthCheck {
        let name = "Config Directory".to_string();

        if let Err(e) = std::fs::create_dir_all(&self.config_dir) {
            return HealthCheck {
                name,
                status: HealthStatus::Fail(format!(
                    "Cannot create {}: {}",
                    self.config_dir.display(),
                    e
                )),
            };
        }

        let test_file = self.config_dir.join(".symtriage_test");
        match std::fs::write(&test_file, "test") {
            Ok(_) => {
                let _ = std::fs::remove_file(&test_file);
                HealthCheck {
                    name,
                    status: HealthStatus::Pass,
                }
            }
            Err(_) => HealthCheck {
                name,
                status: HealthStatus::Fail(format!(
                    "No write permission in {}",
                    self.config_dir.display()
                )),
            },
        }
    }

    /// Check 6: Memory availability
    fn check_memory(&self) -> HealthCheck {
        let name = "Memory".to_string();
        let mut sys = System::new_all();
        sys.refresh_memory();

        let available_gb = sys.available_memory() / (1024 * 1024 * 1024);

        if available_gb < 1 {
            HealthCheck {
                name,
                status: HealthStatus::Fail(format!(
                    "Less than 1GB RAM available ({} GB)",
                    available_gb
                )),
            }
        } else if available_gb < 2 {
            HealthCheck {
                name,
                status: HealthStatus::Warn(format!("Low memory ({} GB available)", available_gb)),
            }
        } else {
            HealthCheck {
                name,
                status: HealthStatus::Pass,
            }
        }
    }

    /// Display diagnostics results
    pub fn display_results(checks: &[HealthCheck]) {
        println!("\nSymptom Checker Diagnostics\n");
        println!("{:<22} {}", "Check", "Status");
        println!("{}", "=".repeat(50));

        for check in checks {
            let status = match &check.status {
                HealthStatus::Pass => format!("{} PASS", "✓".green()),
                HealthStatus::Warn(msg) => format!("{} WARN: {}", "⚠".yellow(), msg),
                HealthStatus::Fail(msg) => format!("{} FAIL: {}", "✗".red(), msg),
            };

            println!("{:<22} {}", check.name, status);
        }

        println!();
    }

    /// Get overall health status
    pub fn overall_status(checks: &[HealthCheck]) -> bool {
        !checks.iter().any(|c| matches!(c.status, HealthStatus::Fail(_)))
    }
}
