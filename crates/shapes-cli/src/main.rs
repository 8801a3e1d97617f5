mod classifier;
mod config;
mod page;
mod server;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shapes_core::{FactStore, FormulaService, SynonymTable};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "shapes", about = "Look up area and perimeter formulas for shapes")]
struct Cli {
    /// Config file (defaults to $SHAPES_CONFIG, else built-in defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Fact base (.toml or .json), overrides the config file
    #[arg(long, global = true)]
    facts: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web front end
    Serve {
        /// Address to listen on, overrides the config file
        #[arg(long)]
        bind: Option<String>,
    },

    /// Answer a query, e.g. "area of circle"
    Query {
        /// Text to query
        text: String,
    },

    /// Show the canonical identifier a query normalizes to
    Normalize {
        /// Text to normalize
        text: String,
    },

    /// Print the loaded fact base as JSON
    Facts,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn load_facts(cli: &Cli, config: &Config) -> Result<FactStore> {
    match cli.facts.as_deref().or(config.facts.path.as_deref()) {
        Some(path) => shapes_store::load_path(path)
            .with_context(|| format!("failed to load fact base {}", path.display())),
        None => shapes_store::builtin().context("failed to load built-in fact base"),
    }
}

fn build_service(cli: &Cli, config: &Config) -> Result<FormulaService> {
    let facts = load_facts(cli, config)?;
    let synonyms = SynonymTable::default().with_entries(config.synonyms.clone());
    tracing::debug!(
        "{} shape records, {} synonyms",
        facts.len(),
        synonyms.len()
    );

    let mut service = FormulaService::new(facts, synonyms)
        .with_classifier_timeout(config.classifier.timeout());
    if let Some(classifier) = classifier::build_classifier(&config.classifier) {
        service = service.with_classifier(classifier);
    }
    Ok(service)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::resolve(cli.config.as_deref())?;
    let service = build_service(&cli, &config)?;

    match &cli.command {
        Commands::Serve { bind } => {
            let bind = bind.as_deref().unwrap_or(&config.server.bind);
            server::serve(Arc::new(service), bind).await
        }
        Commands::Query { text } => cmd_query(&cli, &service, text).await,
        Commands::Normalize { text } => cmd_normalize(&service, text).await,
        Commands::Facts => cmd_facts(&service),
    }
}

async fn cmd_query(cli: &Cli, service: &FormulaService, text: &str) -> Result<()> {
    let answer = service.answer(text).await;
    println!("{}", answer.response);

    if cli.verbose {
        eprintln!(
            "--- normalized: {}, found: {} ---",
            answer.normalized, answer.found
        );
    }
    Ok(())
}

async fn cmd_normalize(service: &FormulaService, text: &str) -> Result<()> {
    println!("{}", service.normalizer().normalize(text).await);
    Ok(())
}

fn cmd_facts(service: &FormulaService) -> Result<()> {
    let json = serde_json::to_string_pretty(&server::facts_json(service.facts()))
        .context("failed to serialize fact base")?;
    println!("{json}");
    Ok(())
}
