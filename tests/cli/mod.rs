//! Tests that drive the compiled `entity-stream` binary

mod serve_tests;
