use std::sync::Arc;

use super::events::Event;
use super::registry::ConnectionRegistry;

/// Fans events out to every registered session.
#[derive(Debug, Clone)]
pub struct BroadcastHub {
    registry: Arc<ConnectionRegistry>,
}

impl BroadcastHub {
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Serialize `event` once and queue it for every session in a fresh
    /// registry snapshot, skipping `exclude`. A closed session is logged and
    /// skipped. Returns the number of sessions the event was queued for.
    pub fn publish(&self, event: &Event, exclude: Option<&str>) -> usize {
        let payload = match serde_json::to_string(event) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(event = event.kind(), error = %e, "failed to serialize event");
                return 0;
            }
        };

        let sessions = self.registry.snapshot();
        let mut delivered = 0;
        for session in &sessions {
            if exclude == Some(session.session_id.as_str()) {
                continue;
            }
            match session.send(payload.clone()) {
                Ok(()) => delivered += 1,
                Err(e) => tracing::warn!(session_id = %session.session_id, "{e}"),
            }
        }

        tracing::debug!(
            event = event.kind(),
            recipients = sessions.len(),
            delivered,
            "published event"
        );
        delivered
    }
}
