// ===== keyforge-session/src/registry.rs =====
//! Process-wide connection registry. Sessions themselves run entirely on
//! their own thread; this map only tracks which connections are live, for
//! introspection and graceful accounting on disconnect.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::Instant;

pub type ConnectionId = u64;

#[derive(Debug, Clone)]
pub struct SessionHandle {
    pub peer: SocketAddr,
    pub connected_at: Instant,
}

/// A reader/writer lock around the whole map, per the external contract:
/// registration and removal take the write lock, everything else (length,
/// lookups) takes the read lock.
pub struct SessionRegistry {
    next_id: AtomicU64,
    sessions: RwLock<HashMap<ConnectionId, SessionHandle>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn register(&self, peer: SocketAddr) -> ConnectionId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.sessions
            .write()
            .unwrap()
            .insert(id, SessionHandle { peer, connected_at: Instant::now() });
        id
    }

    pub fn unregister(&self, id: ConnectionId) {
        self.sessions.write().unwrap().remove(&id);
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap().len()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
