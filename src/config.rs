//! Server configuration
//!
//! Values come from, in increasing precedence: built-in defaults, an optional
//! TOML file with a `[server]` table, then environment/CLI overrides applied
//! by the `serve` command.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8765
//! drain_timeout_secs = 10
//! max_message_chars = 100000
//! max_frame_bytes = 1048576
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{EntityStreamError, Result};

/// Top-level config file layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub server: ServerConfig,
}

/// Configuration for the websocket service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind (0 picks a free port)
    #[serde(default = "default_port")]
    pub port: u16,

    /// How long to wait for open sessions after a shutdown signal (0 = no limit)
    #[serde(default = "default_drain_timeout_secs")]
    pub drain_timeout_secs: u64,

    /// Longest message the tagger accepts, in characters
    #[serde(default = "default_max_message_chars")]
    pub max_message_chars: usize,

    /// Largest websocket message accepted from a client, in bytes
    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8765
}

fn default_drain_timeout_secs() -> u64 {
    10
}

fn default_max_message_chars() -> usize {
    crate::tagger::rules::DEFAULT_MAX_CHARS
}

fn default_max_frame_bytes() -> usize {
    1024 * 1024 // 1 MiB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            drain_timeout_secs: default_drain_timeout_secs(),
            max_message_chars: default_max_message_chars(),
            max_frame_bytes: default_max_frame_bytes(),
        }
    }
}

impl ServerConfig {
    /// Load the `[server]` table from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| EntityStreamError::Config {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;
        Self::from_toml(&content).map_err(|e| match e {
            EntityStreamError::Config { message } => EntityStreamError::Config {
                message: format!("{}: {}", path.display(), message),
            },
            other => other,
        })
    }

    /// Parse the `[server]` table from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content).map_err(|e| EntityStreamError::Config {
            message: e.to_string(),
        })?;
        file.server.validate()?;
        Ok(file.server)
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_drain_timeout_secs(mut self, secs: u64) -> Self {
        self.drain_timeout_secs = secs;
        self
    }

    pub fn with_max_message_chars(mut self, chars: usize) -> Self {
        self.max_message_chars = chars;
        self
    }

    /// `host:port` string suitable for binding
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Drain limit, `None` when sessions may take as long as they need
    pub fn drain_timeout(&self) -> Option<Duration> {
        match self.drain_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Reject values the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(EntityStreamError::Config {
                message: "host must not be empty".to_string(),
            });
        }
        if self.max_message_chars == 0 {
            return Err(EntityStreamError::Config {
                message: "max_message_chars must be greater than 0".to_string(),
            });
        }
        if self.max_frame_bytes == 0 {
            return Err(EntityStreamError::Config {
                message: "max_frame_bytes must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}
