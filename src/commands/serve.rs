//! Serve command handler
//!
//! Resolves the server configuration, binds the listener and runs it until
//! SIGTERM or Ctrl-C, then drains open sessions before returning.

use std::sync::Arc;

use crate::cli::ServeArgs;
use crate::config::ServerConfig;
use crate::error::EntityStreamError;
use crate::socket_server::{shutdown_signal, Listener};
use crate::tagger::{RuleTagger, Tagger};

/// Run the websocket server
///
/// This creates a tokio runtime and blocks until the server has drained.
pub fn run_serve(args: &ServeArgs) -> crate::Result<String> {
    let config = resolve_config(args)?;

    let runtime = tokio::runtime::Runtime::new().map_err(|e| EntityStreamError::Runtime {
        message: format!("Failed to create tokio runtime: {}", e),
    })?;

    runtime.block_on(async { run_serve_async(config).await })?;

    // Server exits cleanly - no output needed
    Ok(String::new())
}

async fn run_serve_async(config: ServerConfig) -> crate::Result<()> {
    tracing::info!(
        "Starting entity-stream v{} on {}",
        env!("CARGO_PKG_VERSION"),
        config.bind_addr()
    );

    let tagger: Arc<dyn Tagger> =
        Arc::new(RuleTagger::new().with_max_chars(config.max_message_chars));
    let listener = Listener::bind(&config, tagger).await?;
    listener.run(shutdown_signal()).await
}

/// Defaults, then the config file, then env/CLI overrides
pub fn resolve_config(args: &ServeArgs) -> crate::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };

    if let Some(host) = &args.host {
        config = config.with_host(host.clone());
    }
    if let Some(port) = args.port {
        config = config.with_port(port);
    }
    if let Some(secs) = args.drain_timeout {
        config = config.with_drain_timeout_secs(secs);
    }
    if let Some(chars) = args.max_message_chars {
        config = config.with_max_message_chars(chars);
    }

    config.validate()?;
    Ok(config)
}
