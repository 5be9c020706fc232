pub mod events;
pub mod hub;
pub mod registry;
pub mod session;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};

use crate::error::GatewayError;
use crate::input::Key;
use crate::state::AppState;
use events::{Event, GestureEvent};
use session::{Session, SessionPhase};

pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut ws_sink, mut ws_stream) = socket.split();

    let (session, mut rx) = Session::open();
    let session_id = session.session_id.clone();
    let mut phase = SessionPhase::Connected;
    tracing::debug!(session_id = %session_id, phase = phase.as_str(), "connection opened");

    state.registry.add(session);
    phase = SessionPhase::Active;
    tracing::info!(
        session_id = %session_id,
        phase = phase.as_str(),
        clients = state.registry.len(),
        "client connected"
    );

    let reason = loop {
        tokio::select! {
            // Outgoing events queued by the hub
            Some(payload) = rx.recv() => {
                if let Err(e) = ws_sink.send(Message::Text(payload.into())).await {
                    break GatewayError::Transport(e.to_string());
                }
            }
            // Incoming messages
            msg = ws_stream.next() => {
                match read_frame(msg) {
                    Ok(Some(text)) => handle_text(&state, &session_id, &text),
                    Ok(None) => {}
                    Err(e) => break e,
                }
            }
        }
    };

    phase = SessionPhase::Disconnected;
    state.registry.remove(&session_id);
    match reason {
        GatewayError::ConnectionClosed => tracing::info!(
            session_id = %session_id,
            phase = phase.as_str(),
            clients = state.registry.len(),
            "client disconnected"
        ),
        e => tracing::warn!(
            session_id = %session_id,
            phase = phase.as_str(),
            clients = state.registry.len(),
            "client dropped: {e}"
        ),
    }
}

/// Text payload of an inbound frame. Control frames yield `Ok(None)`; close
/// and stream end yield [`GatewayError::ConnectionClosed`].
fn read_frame(msg: Option<Result<Message, axum::Error>>) -> Result<Option<String>, GatewayError> {
    match msg {
        Some(Ok(Message::Text(text))) => Ok(Some(text.as_str().to_owned())),
        Some(Ok(Message::Binary(bytes))) => String::from_utf8(bytes.to_vec())
            .map(Some)
            .or_else(|e| {
                tracing::warn!("{}", GatewayError::Decode(e.to_string()));
                Ok(None)
            }),
        Some(Ok(Message::Close(_))) | None => Err(GatewayError::ConnectionClosed),
        Some(Ok(_)) => Ok(None),
        Some(Err(e)) => Err(GatewayError::Transport(e.to_string())),
    }
}

/// Decode and dispatch one inbound message. Decode failures are logged and
/// leave the session open.
pub fn handle_text(state: &AppState, session_id: &str, text: &str) {
    let event = match serde_json::from_str::<Event>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(session_id, "{}", GatewayError::from(e));
            return;
        }
    };
    tracing::debug!(session_id, event = event.kind(), "received");

    match event {
        Event::Command(command) => {
            let Some(cmd) = command.cmd else {
                tracing::debug!(session_id, "command without cmd ignored");
                return;
            };
            match state.toggles.toggle(&cmd) {
                Some(enabled) => tracing::info!(session_id, cmd = %cmd, enabled, "toggle flipped"),
                None => tracing::debug!(session_id, cmd = %cmd, "unknown command ignored"),
            }
        }
        Event::Gesture(gesture) => relay_gesture(state, session_id, gesture),
        other => tracing::debug!(session_id, event = other.kind(), "ignored inbound event"),
    }
}

fn relay_gesture(state: &AppState, session_id: &str, gesture: GestureEvent) {
    if !state.relay_gestures {
        tracing::debug!(session_id, gesture = %gesture.gesture, "gesture relay disabled");
        return;
    }
    if let Some(key) = Key::for_gesture(&gesture.gesture) {
        state.injector.inject(key);
    }
    let delivered = state
        .hub
        .publish(&Event::Gesture(gesture), Some(session_id));
    tracing::debug!(session_id, delivered, "relayed gesture");
}
