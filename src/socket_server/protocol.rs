//! Socket server protocol message types
//!
//! Defines the JSON envelopes exchanged over the websocket.
//!
//! ```json
//! // Client -> Server
//! {"message": "The cat sat.", "id": 7}
//!
//! // Server -> Client
//! {"entities": {"noun": [...], "proper_noun": [], ...}, "id": 7}
//! {"error": "message too long: ...", "id": 7}
//! ```

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::entities::BucketStore;

/// Client-to-server request
#[derive(Debug, Clone, PartialEq)]
pub struct ClientRequest {
    /// Correlation id, echoed back unchanged
    pub id: Value,
    /// Text to classify
    pub message: String,
}

/// Server-to-client message
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ServerMessage {
    /// Categorized tokens for one request
    Entities { entities: BucketStore, id: Value },
    /// Per-request failure
    Error { error: String, id: Value },
}

/// Why an inbound frame could not be turned into a [`ClientRequest`]
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("frame is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary frame is not valid UTF-8")]
    NotUtf8,

    #[error("request must be a JSON object")]
    NotAnObject,

    #[error("request has no 'id' field")]
    MissingId,

    #[error("request has no 'message' field")]
    MissingMessage { id: Value },

    #[error("'message' must be a string")]
    MessageNotString { id: Value },
}

impl DecodeError {
    /// The request id, if it could be recovered from the bad frame
    pub fn recoverable_id(&self) -> Option<&Value> {
        match self {
            Self::MissingMessage { id } | Self::MessageNotString { id } => Some(id),
            _ => None,
        }
    }
}

impl ClientRequest {
    /// Decode a text frame
    pub fn decode(text: &str) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_str(text)?;
        let mut object = match value {
            Value::Object(object) => object,
            _ => return Err(DecodeError::NotAnObject),
        };

        let id = object.remove("id").ok_or(DecodeError::MissingId)?;
        match object.remove("message") {
            Some(Value::String(message)) => Ok(Self { id, message }),
            Some(_) => Err(DecodeError::MessageNotString { id }),
            None => Err(DecodeError::MissingMessage { id }),
        }
    }

    /// Decode a binary frame holding UTF-8 JSON
    pub fn decode_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let text = std::str::from_utf8(bytes).map_err(|_| DecodeError::NotUtf8)?;
        Self::decode(text)
    }
}

/// First 10 characters of a message, with `...` when it was cut
pub fn preview(message: &str) -> String {
    const PREVIEW_CHARS: usize = 10;
    let mut chars = message.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
