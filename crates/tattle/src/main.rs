// SPDX-FileCopyrightText: 2026 Tattle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! tattle - send annotated screenshots as feedback cards.
//!
//! This is the binary entry point.

mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tattle_config::TattleConfig;
use tattle_core::{HealthStatus, PluginAdapter, SubmissionOutcome};
use tattle_trello::TrelloSender;
use tracing::{debug, error};

/// tattle - send annotated screenshots as feedback cards.
#[derive(Parser, Debug)]
#[command(name = "tattle", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Send a screenshot as feedback.
    Send {
        /// The captured screenshot.
        #[arg(long)]
        image: PathBuf,
        /// Annotated rendition, sent instead of the original when given.
        #[arg(long)]
        annotated: Option<PathBuf>,
        /// Text accompanying the report.
        #[arg(long)]
        text: Option<String>,
    },
    /// Check that the configured Trello list is reachable.
    Check,
    /// Print the effective configuration with secrets redacted.
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => tattle_config::load_and_validate_path(path),
        None => tattle_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            tattle_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.logging.level);
    debug!(command = ?cli.command, "configuration loaded");

    match cli.command {
        Commands::Send {
            image,
            annotated,
            text,
        } => send(&config, image, annotated, text).await,
        Commands::Check => check(&config).await,
        Commands::Config => print_config(&config),
    }
}

async fn send(
    config: &TattleConfig,
    image: PathBuf,
    annotated: Option<PathBuf>,
    text: Option<String>,
) -> ExitCode {
    let sender = match TrelloSender::from_config(&config.trello) {
        Ok(sender) => sender,
        Err(e) => {
            error!(error = %e, "cannot create Trello sender");
            return ExitCode::FAILURE;
        }
    };

    let payload = match report::load_payload(&image, annotated.as_deref(), text) {
        Ok(payload) => payload,
        Err(e) => {
            error!(error = %e, "cannot build feedback payload");
            return ExitCode::FAILURE;
        }
    };

    match report::deliver(&sender, payload).await {
        SubmissionOutcome::Succeeded(_) => {
            println!("feedback sent");
            ExitCode::SUCCESS
        }
        SubmissionOutcome::Failed(e) => {
            eprintln!("tattle: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn check(config: &TattleConfig) -> ExitCode {
    let sender = match TrelloSender::from_config(&config.trello) {
        Ok(sender) => sender,
        Err(e) => {
            error!(error = %e, "cannot create Trello sender");
            return ExitCode::FAILURE;
        }
    };

    match sender.health_check().await {
        Ok(HealthStatus::Healthy) => {
            println!("{}: healthy", sender.name());
            ExitCode::SUCCESS
        }
        Ok(HealthStatus::Unhealthy(reason)) => {
            println!("{}: unhealthy ({reason})", sender.name());
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(error = %e, "health check failed");
            ExitCode::FAILURE
        }
    }
}

fn print_config(config: &TattleConfig) -> ExitCode {
    let shown = TattleConfig {
        trello: config.trello.redacted(),
        ..config.clone()
    };
    match toml::to_string_pretty(&shown) {
        Ok(rendered) => {
            print!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "failed to render configuration");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tattle={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
