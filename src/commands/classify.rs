//! Classify command handler
//!
//! Runs one message through the same tag-and-categorize path the server
//! uses and prints the response envelope. There is no request, so `id` is
//! `null`.

use std::io::{self, Read};

use serde_json::Value;

use crate::cli::ClassifyArgs;
use crate::entities::classify;
use crate::error::EntityStreamError;
use crate::socket_server::ServerMessage;
use crate::tagger::RuleTagger;

/// Classify the given text (or stdin) and return the JSON envelope
pub fn run_classify(args: &ClassifyArgs) -> crate::Result<String> {
    let text = match &args.text {
        Some(text) => text.clone(),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    let reply = classify_text(&text);
    let json = if args.pretty {
        serde_json::to_string_pretty(&reply)
    } else {
        serde_json::to_string(&reply)
    }
    .map_err(|e| EntityStreamError::Runtime {
        message: format!("JSON serialization failed: {}", e),
    })?;

    Ok(format!("{}\n", json))
}

fn classify_text(text: &str) -> ServerMessage {
    match classify(&RuleTagger::new(), text) {
        Ok(entities) => ServerMessage::Entities {
            entities,
            id: Value::Null,
        },
        Err(e) => ServerMessage::Error {
            error: e.to_string(),
            id: Value::Null,
        },
    }
}
