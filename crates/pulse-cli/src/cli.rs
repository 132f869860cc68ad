//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pulse_core::Persona;

/// Pulse - Business growth and ROI dashboard
#[derive(Parser)]
#[command(name = "pulse")]
#[command(about = "In-memory business dashboard API with simulated invoice OCR", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to <config dir>/pulse/pulse.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Accept mutating requests without a session
        ///
        /// WARNING: anyone who can reach the server can then add clients,
        /// upload invoices and run agents.
        #[arg(long)]
        demo: bool,

        /// Directory containing the dashboard build to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Ask the assistant a question (answers use default figures)
    Ask {
        /// The question
        message: String,

        /// Which assistant answers: widget or full
        #[arg(long, default_value = "full")]
        persona: Persona,
    },

    /// Run the simulated invoice extraction on a local file
    Simulate {
        /// Invoice file (only its size is used; omit for an empty upload)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Client name on the invoice
        #[arg(long)]
        client: Option<String>,

        /// Project name on the invoice
        #[arg(long)]
        project: Option<String>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Print the full JSON response
        #[arg(long)]
        json: bool,
    },

    /// Preview upcoming scheduled alerts
    Schedule {
        /// Number of firings to show
        #[arg(short = 'n', long, default_value = "5")]
        count: usize,
    },
}
