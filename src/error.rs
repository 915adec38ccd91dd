//! Error types and exit codes for entity-stream
//!
//! Only process-level failures live here. Per-message failures
//! ([`DecodeError`](crate::socket_server::DecodeError),
//! [`TaggingError`](crate::tagger::TaggingError)) and transport failures stay
//! inside the session that hit them and never reach this type.

use std::process::ExitCode;
use thiserror::Error;

/// Main error type for entity-stream operations
#[derive(Error, Debug)]
pub enum EntityStreamError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Runtime error: {message}")]
    Runtime { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EntityStreamError {
    /// Convert error to an exit code:
    /// - 0: Success
    /// - 1: IO / runtime error
    /// - 2: Listening endpoint could not be bound
    /// - 3: Invalid configuration
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Bind { .. } => ExitCode::from(2),
            Self::Config { .. } => ExitCode::from(3),
            Self::Runtime { .. } => ExitCode::from(1),
            Self::Io(_) => ExitCode::from(1),
        }
    }
}

/// Result type alias for entity-stream operations
pub type Result<T> = std::result::Result<T, EntityStreamError>;
