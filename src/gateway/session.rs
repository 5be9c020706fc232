use tokio::sync::mpsc;

use crate::error::GatewayError;

/// Handle to one live connection. Cloning shares the outbound queue.
#[derive(Debug, Clone)]
pub struct Session {
    pub session_id: String,
    tx: mpsc::UnboundedSender<String>,
}

impl Session {
    pub fn new(session_id: String, tx: mpsc::UnboundedSender<String>) -> Self {
        Self { session_id, tx }
    }

    /// Creates a session with a fresh id and returns the receiving half of
    /// its outbound queue.
    pub fn open() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(uuid::Uuid::new_v4().to_string(), tx), rx)
    }

    /// Queue a serialized payload for the connection's writer. Never waits on
    /// the socket.
    pub fn send(&self, payload: String) -> Result<(), GatewayError> {
        self.tx.send(payload).map_err(|_| GatewayError::Delivery {
            session_id: self.session_id.clone(),
        })
    }
}

/// Lifecycle of a gateway connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Connected,
    Active,
    Disconnected,
}

impl SessionPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionPhase::Connected => "connected",
            SessionPhase::Active => "active",
            SessionPhase::Disconnected => "disconnected",
        }
    }
}
