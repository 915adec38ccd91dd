//! Registry of open sessions
//!
//! Bookkeeping only: sessions register on open and unregister on close so the
//! listener can report how many are still draining. No linguistic state is
//! shared through here.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use parking_lot::RwLock;

/// Unique identifier for a session
pub type SessionId = String;

/// What the registry knows about an open session
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub id: SessionId,
    pub peer: Option<SocketAddr>,
    pub opened_at: Instant,
}

/// Open sessions, keyed by id
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, SessionInfo>>,
    total_opened: AtomicU64,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an id and record the session as open
    pub fn register(&self, peer: Option<SocketAddr>) -> SessionId {
        let id = new_session_id();
        let info = SessionInfo {
            id: id.clone(),
            peer,
            opened_at: Instant::now(),
        };
        self.sessions.write().insert(id.clone(), info);
        self.total_opened.fetch_add(1, Ordering::Relaxed);
        id
    }

    /// Forget a session; returns its info if it was registered
    pub fn unregister(&self, id: &str) -> Option<SessionInfo> {
        self.sessions.write().remove(id)
    }

    /// Number of open sessions
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Sessions opened since the registry was created
    pub fn total_opened(&self) -> u64 {
        self.total_opened.load(Ordering::Relaxed)
    }

    /// Copy of the open sessions, oldest first
    pub fn snapshot(&self) -> Vec<SessionInfo> {
        let mut sessions: Vec<SessionInfo> = self.sessions.read().values().cloned().collect();
        sessions.sort_by_key(|s| s.opened_at);
        sessions
    }
}

fn new_session_id() -> SessionId {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    format!("ses_{}", &uuid[..8])
}
