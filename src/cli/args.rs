//! Command-line argument parsing for the symptom checker
//!
//! Provides clap-based CLI with subcommands and verbosity control.
//! Options given on the command line override values from the config
//! file.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;

/// symtriage - symptom checker with summarized, spoken, printable guidance
#[derive(Parser, Debug)]
#[command(name = "symtriage")]
#[command(version)]
#[command(about = "Match free-text symptoms against known guidance and summarize it", long_about = None)]
pub struct Args {
    /// Web server host
    #[arg(long)]
    pub host: Option<String>,

    /// Web server port
    #[arg(long)]
    pub port: Option<u16>,

    /// Summarizer API host
    #[arg(long)]
    pub summarizer_host: Option<String>,

    /// Summarizer API port
    #[arg(long)]
    pub summarizer_port: Option<u16>,

    /// Summarization model to use
    #[arg(short, long)]
    pub model: Option<String>,

    /// Disable spoken playback of summaries
    #[arg(long)]
    pub no_speech: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors and warnings only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the web service (the default when no subcommand is given)
    Serve,

    /// Check symptoms once from the terminal
    Check {
        /// Free-text symptom description
        #[arg(value_name = "SYMPTOMS")]
        symptoms: String,
    },

    /// List the known symptom keywords
    Keywords,

    /// Run health checks against the collaborators
    Doctor,

    /// Display current configuration
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Fold command-line overrides into a loaded configuration
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(host) = &self.summarizer_host {
            config.summarizer.host = host.clone();
        }
        if let Some(port) = self.summarizer_port {
            config.summarizer.port = port;
        }
        if let Some(model) = &self.model {
            config.summarizer.model = model.clone();
        }
        if self.no_speech {
            config.speech.enabled = false;
        }
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Log filter directive for the tracing subscriber
    pub fn log_filter(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "warn",
            Verbosity::Normal => "info",
            Verbosity::Verbose => "debug",
            Verbosity::VeryVerbose => "trace",
        }
    }

    /// Check if should show progress spinners
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }
}
