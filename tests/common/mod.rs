//! Common test utilities for entity-stream integration tests
//!
//! This module provides:
//! - `TestServer` for running a listener on an ephemeral port
//! - `TestClient`, a thin websocket client speaking the JSON protocol
//! - Test taggers with controllable timing
//! - Assertions over response envelopes

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod taggers;

pub use assertions::*;
pub use taggers::*;
pub use test_server::{TestClient, TestServer};
