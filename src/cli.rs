//! CLI argument definitions using clap with subcommand architecture

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Streaming token categorization service
#[derive(Parser, Debug)]
#[command(name = "entity-stream")]
#[command(about = "Tags text messages and groups their tokens by grammatical category")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Show verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the websocket server until SIGTERM or Ctrl-C
    Serve(ServeArgs),

    /// Classify one message and print the response JSON
    #[command(visible_alias = "c")]
    Classify(ClassifyArgs),
}

// ============================================
// Serve Subcommand
// ============================================

/// Arguments for the serve command
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Host to bind to
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// TOML config file with a [server] table
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Seconds to wait for open sessions on shutdown (0 = no limit)
    #[arg(long, value_name = "SECS")]
    pub drain_timeout: Option<u64>,

    /// Longest accepted message, in characters
    #[arg(long, value_name = "CHARS")]
    pub max_message_chars: Option<usize>,
}

// ============================================
// Classify Subcommand
// ============================================

/// Arguments for the classify command
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Text to classify (reads stdin when omitted)
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}
