//! CLI command definitions for the `concierge` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod ask;
pub mod chat;
pub mod rules;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Site concierge for Veridian AI: chat with Vera from the terminal or serve
/// the widget API.
#[derive(Parser)]
#[command(name = "concierge", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress decoration. Errors and bare command results are still printed.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open an interactive chat widget in the terminal.
    Chat {
        /// Override the simulated thinking delay, in milliseconds.
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Resolve a single message and print the reply.
    Ask {
        /// Message text (words are joined with spaces).
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Show the intent rule table in evaluation order.
    Rules,

    /// Start the REST API server.
    Serve {
        /// Port to listen on (defaults to `server.port` in config.toml).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to `server.host` in config.toml).
        #[arg(long)]
        host: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
