use dashmap::DashMap;

use super::session::Session;

/// Set of currently connected sessions, keyed by session id.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    sessions: DashMap<String, Session>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, session: Session) {
        self.sessions.insert(session.session_id.clone(), session);
    }

    /// Removing an absent session is a no-op.
    pub fn remove(&self, session_id: &str) {
        self.sessions.remove(session_id);
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }

    /// Point-in-time copy of the registered sessions. Callers iterate the copy
    /// so no shard lock is held while sending.
    pub fn snapshot(&self) -> Vec<Session> {
        self.sessions
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
