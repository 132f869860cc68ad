//! Pulse CLI - Business growth dashboard
//!
//! Usage:
//!   pulse serve --port 8080     Start web server
//!   pulse ask "Show my ROI"     Ask the assistant
//!   pulse simulate -f inv.pdf   Simulate invoice extraction
//!   pulse schedule              Preview scheduled alerts

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Serve {
            port,
            host,
            demo,
            static_dir,
        } => {
            commands::cmd_serve(
                cli.config.as_deref(),
                &host,
                port,
                demo,
                static_dir.as_deref(),
            )
            .await
        }
        Commands::Ask { message, persona } => commands::cmd_ask(&message, persona),
        Commands::Simulate {
            file,
            client,
            project,
            seed,
            json,
        } => commands::cmd_simulate(
            file.as_deref(),
            client.as_deref(),
            project.as_deref(),
            seed,
            json,
        ),
        Commands::Schedule { count } => commands::cmd_schedule(cli.config.as_deref(), count),
    }
}
