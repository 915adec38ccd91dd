//! Entity-stream: streaming token categorization over websockets
//!
//! Clients send short text messages; each one is tagged, its tokens grouped
//! into six fixed buckets (`noun`, `proper_noun`, `verb`, `number`, `symbol`,
//! `misc`), and the buckets returned on the same connection.
//!
//! # Example
//!
//! ```
//! use entity_stream::{classify, BucketKey, RuleTagger};
//!
//! let store = classify(&RuleTagger::new(), "The cat sat on 3 mats.").unwrap();
//! let nouns: Vec<&str> = store
//!     .bucket(BucketKey::Noun)
//!     .iter()
//!     .map(|t| t.value.as_str())
//!     .collect();
//! assert_eq!(nouns, ["cat", "mats"]);
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod entities;
pub mod error;
pub mod schema;
pub mod socket_server;
pub mod tagger;

// Re-export commonly used types
pub use cli::{Cli, Commands};
pub use config::ServerConfig;
pub use entities::{categorize, classify, BucketStore};
pub use error::{EntityStreamError, Result};
pub use schema::{BucketKey, Token};
pub use socket_server::{Listener, ListenerState};
pub use tagger::{RuleTagger, Serialized, Tagger, TaggerMut, TaggingError};
