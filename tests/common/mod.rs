#![allow(dead_code)]

use futures_util::{SinkExt, StreamExt};
use gesturehub::config::EmitterConfig;
use gesturehub::emitter::spawn_emitters;
use gesturehub::input::{InputInjector, Key};
use gesturehub::routes;
use gesturehub::state::AppState;
use gesturehub::toggles::ToggleState;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

pub type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Records key presses instead of touching the host keyboard.
#[derive(Default)]
pub struct RecordingInjector {
    keys: Mutex<Vec<Key>>,
}

impl RecordingInjector {
    pub fn keys(&self) -> Vec<Key> {
        self.keys.lock().unwrap().clone()
    }
}

impl InputInjector for RecordingInjector {
    fn inject(&self, key: Key) {
        self.keys.lock().unwrap().push(key);
    }
}

/// Isolated server state; safe for parallel tests.
pub struct TestServer {
    pub state: AppState,
    pub injector: Arc<RecordingInjector>,
}

impl TestServer {
    pub fn new() -> Self {
        Self::with_relay(true)
    }

    pub fn with_relay(relay_gestures: bool) -> Self {
        let injector = Arc::new(RecordingInjector::default());
        let state = AppState::new(ToggleState::default(), injector.clone(), relay_gestures);
        Self { state, injector }
    }

    /// Returns an Axum Router wired to this server's state for `oneshot()` calls.
    pub fn router(&self) -> axum::Router {
        routes::router(self.state.clone())
    }

    /// Binds a TCP listener on port 0, spawns the server, and returns the
    /// WebSocket base URL.
    pub async fn spawn(&self) -> String {
        let app = self.router();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("ws://127.0.0.1:{}", addr.port())
    }

    pub fn spawn_emitters(&self, config: &EmitterConfig) -> Vec<JoinHandle<()>> {
        spawn_emitters(&self.state, config)
    }

    pub async fn wait_for_sessions(&self, count: usize) {
        let registry = self.state.registry.clone();
        wait_until(move || registry.len() == count).await;
    }
}

pub async fn test_app() -> axum::Router {
    TestServer::new().router()
}

/// Emitter timings short enough for integration tests.
pub fn fast_emitters() -> EmitterConfig {
    EmitterConfig {
        gesture_min_delay: Duration::from_millis(10),
        gesture_max_delay: Duration::from_millis(30),
        driver_poll: Duration::from_millis(10),
        driver_cooldown: Duration::from_secs(20),
    }
}

/// Polls `cond` every 10ms, panicking after 5s.
pub async fn wait_until(cond: impl Fn() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while !cond() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not met within 5s"
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

pub async fn connect(url: &str) -> Client {
    let (ws, _) = connect_async(url).await.unwrap();
    ws
}

pub async fn send_json(ws: &mut Client, value: serde_json::Value) {
    ws.send(Message::Text(value.to_string().into())).await.unwrap();
}

/// Next JSON text message, or `None` if nothing arrives within `wait`.
pub async fn recv_json(ws: &mut Client, wait: Duration) -> Option<serde_json::Value> {
    let deadline = tokio::time::Instant::now() + wait;
    loop {
        let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
        let msg = tokio::time::timeout(remaining, ws.next()).await.ok()??.ok()?;
        if msg.is_text() {
            let text = msg.into_text().unwrap();
            return Some(serde_json::from_str(&text).unwrap());
        }
    }
}

/// Discards everything that arrives within `wait`.
pub async fn drain(ws: &mut Client, wait: Duration) -> usize {
    let mut count = 0;
    while recv_json(ws, wait).await.is_some() {
        count += 1;
    }
    count
}
