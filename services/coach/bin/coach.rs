//! Main Entrypoint for the Interview Coach
//!
//! This binary is responsible for:
//! 1. Parsing command-line arguments.
//! 2. Loading configuration from the environment.
//! 3. Initializing logging.
//! 4. Building the feedback client and orchestrator.
//! 5. Running one practice session on the terminal.

use anyhow::Context;
use clap::Parser;
use coach_core::{FeedbackOrchestrator, GenerationParams, OpenAiFeedbackClient};
use coach_service::{
    cli::Cli,
    config::Config,
    prompter::{Prompter, TerminalPrompter},
    session::run_session,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    // --- 3. Initialize Feedback Services ---
    let credential = if cli.offline {
        None
    } else {
        config.openai_api_key.as_ref()
    };
    let client = OpenAiFeedbackClient::new(
        config.api_url.clone(),
        GenerationParams::with_model(&config.chat_model),
        config.request_timeout,
    )?;
    let orchestrator = FeedbackOrchestrator::new(Arc::new(client));
    info!(
        remote = credential.is_some(),
        model = %config.chat_model,
        endpoint = %config.api_url,
        "Feedback configured"
    );

    // --- 4. Run Session ---
    println!("Welcome to the Interview Practice Coach!");
    let mut prompter = TerminalPrompter;
    let category = match cli.category {
        Some(category) => category,
        None => prompter.choose_category()?,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_session(&mut prompter, &orchestrator, category, credential, &mut out).await?;

    Ok(())
}
