//! Entity-stream socket server
//!
//! A websocket service that classifies short text messages: every request is
//! tagged, its tokens grouped into buckets, and the buckets sent back on the
//! same connection.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Listener (accept loop)                    │
//! │   Starting ─► Listening ─► Draining ─► Stopped                  │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  SessionRegistry (Arc<RwLock>)   bookkeeping of open sessions   │
//! │  Arc<dyn Tagger>                 shared, read-only              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  Session per client (tokio task)                                │
//! │    frame ─► ClientRequest ─► spawn_blocking(tag + categorize)   │
//! │          ─► ServerMessage ─► same connection                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Protocol
//!
//! All messages are JSON over WebSocket:
//!
//! ```json
//! // Client -> Server
//! {"message": "The cat sat on 3 mats.", "id": 1}
//!
//! // Server -> Client
//! {"entities": {"noun": [{"value": "cat", "type": "NOUN", "offset": 4, "length": 3}, ...],
//!               "proper_noun": [], "verb": [...], "number": [...], "symbol": [], "misc": [...]},
//!  "id": 1}
//! {"error": "message too long: ...", "id": 1}
//! ```

pub mod connection;
pub mod listener;
pub mod protocol;
pub mod session_registry;

pub use connection::{handle_connection, SessionContext};
pub use listener::{shutdown_signal, Listener, ListenerState};
pub use protocol::{preview, ClientRequest, DecodeError, ServerMessage};
pub use session_registry::{SessionId, SessionInfo, SessionRegistry};
