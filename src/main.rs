//! Entity-stream CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use entity_stream::commands::{run_classify, run_serve};
use entity_stream::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run(cli: &Cli) -> entity_stream::Result<String> {
    match &cli.command {
        Commands::Serve(args) => run_serve(args),
        Commands::Classify(args) => run_classify(args),
    }
}

/// Log to stderr; `RUST_LOG` wins over the default level
fn init_logging(verbose: bool) {
    let default = if verbose {
        "entity_stream=debug"
    } else {
        "entity_stream=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
