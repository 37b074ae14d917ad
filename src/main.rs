//! SymTriage - Main CLI Entry Point

use anyhow::Result;
use clap::Parser;
use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;

use symtriage::cli::{Args, Commands, Verbosity};
use symtriage::config::Config;
use symtriage::doctor::Doctor;
use symtriage::orchestrator::{TriageOrchestrator, TriageReport};
use symtriage::server;
use symtriage::speech::{CommandSpeech, NullSpeech, SpeechEngine};
use symtriage::summarizer::{OllamaSummarizer, SummaryOptions};
use symtriage::triage::{KnowledgeBase, Severity};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let verbosity = args.verbosity();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(verbosity.log_filter())),
        )
        .init();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    args.apply_to(&mut config);

    match &args.command {
        Some(Commands::Check { symptoms }) => {
            run_check(&config, symptoms, verbosity).await?;
        }
        Some(Commands::Keywords) => {
            show_keywords();
        }
        Some(Commands::Doctor) => {
            run_doctor(&config).await?;
        }
        Some(Commands::Config) => {
            show_config(&config)?;
        }
        Some(Commands::Serve) | None => {
            run_server(&config).await?;
        }
    }

    Ok(())
}

/// Build the collaborator stack from config and serve HTTP
async fn run_server(config: &Config) -> Result<()> {
    let summarizer = OllamaSummarizer::with_config(
        &config.summarizer.base_url(),
        &config.summarizer.model,
    )?;

    if !summarizer.health_check().await.unwrap_or(false) {
        tracing::warn!(
            "Summarizer backend at {} is not responding, requests will fail until it is up",
            summarizer.base_url()
        );
    }

    let speech: Arc<dyn SpeechEngine> = if config.speech.enabled {
        Arc::new(CommandSpeech::new(&config.speech.command))
    } else {
        Arc::new(NullSpeech)
    };

    let orchestrator = Arc::new(TriageOrchestrator::new(
        KnowledgeBase::builtin(),
        Arc::new(summarizer),
        speech,
        summary_options(config),
    ));

    server::run(&config.server, orchestrator).await?;
    Ok(())
}

/// Run one triage pass from the command line
async fn run_check(config: &Config, symptoms: &str, verbosity: Verbosity) -> Result<()> {
    let summarizer = OllamaSummarizer::with_config(
        &config.summarizer.base_url(),
        &config.summarizer.model,
    )?;

    // Check summarizer availability before doing any work
    if !summarizer.health_check().await.unwrap_or(false) {
        eprintln!("❌ Summarizer backend is not running!");
        eprintln!("
Start Ollama with: ollama serve
Then pull the model with: ollama pull {}", config.summarizer.model);
        std::process::exit(2);
    }

    // The terminal is the output here, so summaries are never spoken
    let orchestrator = TriageOrchestrator::new(
        KnowledgeBase::builtin(),
        Arc::new(summarizer),
        Arc::new(NullSpeech),
        summary_options(config),
    );

    let spinner = if verbosity.show_progress() {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap()
        );
        pb.set_message("Summarizing guidance...");
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let outcome = orchestrator.triage(symptoms).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    print_report(&outcome?);
    Ok(())
}

/// Print matched guidance and the summary to the terminal
fn print_report(report: &TriageReport) {
    println!();
    println!("{}", "Matched Guidance".cyan().bold());
    println!("{}", "=".repeat(60));

    for item in &report.results {
        println!(
            "{} {}",
            format!("{:<22}", item.symptom).bold(),
            severity_label(&item.severity)
        );
        println!("  {}", item.diagnosis);
        println!("  {}", item.advice);
        println!();
    }

    println!("{}", "Summary".cyan().bold());
    println!("{}", "=".repeat(60));
    println!("{}", report.summary);
    println!();
}

fn severity_label(severity: &Severity) -> ColoredString {
    let text = format!("[{}]", severity);
    match severity {
        Severity::High | Severity::ModerateToHigh => text.red(),
        Severity::Moderate | Severity::MildToModerate => text.yellow(),
        Severity::Mild => text.green(),
        Severity::Unknown => text.normal(),
    }
}

/// List every symptom keyword the matcher knows
fn show_keywords() {
    let kb = KnowledgeBase::builtin();
    println!("{} known symptoms:", kb.len());
    println!();
    for keyword in kb.keywords() {
        println!("  {}", keyword);
    }
}

/// Run environment diagnostics, exit 1 when unhealthy
async fn run_doctor(config: &Config) -> Result<()> {
    let doctor = Doctor::new(config)?;
    let results = doctor.run_diagnostics().await;
    Doctor::display_results(&results);

    if !Doctor::overall_status(&results) {
        std::process::exit(1);
    }
    Ok(())
}

fn show_config(config: &Config) -> Result<()> {
    println!("
╔═══════════════════════════════════════════════════════╗
║ SymTriage Configuration                               ║
╚═══════════════════════════════════════════════════════╝
");

    println!("Server:");
    println!("  Bind:  {}", config.server.bind_addr());
    println!();

    println!("Summarizer:");
    println!("  Endpoint: {}", config.summarizer.base_url());
    println!("  Model:    {}", config.summarizer.model);
    println!("  Length:   {} to {} tokens", config.summarizer.min_length, config.summarizer.max_length);
    println!();

    println!("Speech:");
    println!("  Playback: {}", if config.speech.enabled { "enabled" } else { "disabled" });
    println!("  Command:  {}", config.speech.command);
    println!();

    println!("Config file: {}", Config::config_path()?.display());
    println!();

    Ok(())
}

fn summary_options(config: &Config) -> SummaryOptions {
    SummaryOptions {
        min_length: config.summarizer.min_length as u32,
        max_length: config.summarizer.max_length as u32,
        deterministic: true,
    }
}
