//! Command modules for the entity-stream CLI
//!
//! Each command module implements a single top-level command:
//! - `serve` - Run the websocket service
//! - `classify` - Classify one message offline
//!
//! All command handlers take their respective `Args` struct from `cli.rs`
//! and return the text to print on success.

pub mod classify;
pub mod serve;

pub use classify::run_classify;
pub use serve::run_serve;
