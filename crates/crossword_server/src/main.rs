//! Crossword Helper - Unified CLI

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use crossword_rules::{Pattern, ValidationResult, validate};
use crossword_server::{AppState, LlmClient, ServerConfig, router};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config, host, port } => run_server(config, host, port).await,
        Command::Validate {
            word,
            pattern,
            num_letters,
        } => run_validate(&word, &pattern, num_letters),
    }
}

/// Run the HTTP server
#[instrument(skip_all, fields(config_path = %config_path.display()))]
async fn run_server(config_path: PathBuf, host: Option<String>, port: Option<u16>) -> Result<()> {
    initialize_tracing();

    let config = ServerConfig::load(&config_path)?.with_bind(host, port);
    let client = LlmClient::new(config.create_llm_config()?);
    let state = AppState::with_sessions(
        Arc::new(client),
        config.completion_settings(),
        config.session_store(),
    );
    let app = router(state);

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!("✅ Server ready at http://{}:{}/", config.host(), config.port());
    info!("🧩 Endpoints: guess-word, guess-word/structured, validate-word, get-hint");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Validate a word offline and print the JSON verdict
fn run_validate(word: &str, pattern: &str, num_letters: Option<usize>) -> Result<()> {
    let pattern = Pattern::parse(pattern);
    let expected = num_letters.unwrap_or_else(|| pattern.len());
    let result = ValidationResult::from(validate(word, expected, &pattern));
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,crossword_server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Tracing initialized");
}
