use std::sync::Arc;

use crate::config::KeyInjection;

/// Synthetic key presses a gesture can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Enter,
    Space,
}

impl Key {
    pub fn for_gesture(label: &str) -> Option<Self> {
        match label {
            "swipe_left" => Some(Key::Left),
            "swipe_right" => Some(Key::Right),
            "push" => Some(Key::Enter),
            "tap" => Some(Key::Space),
            "rotate_clockwise" => Some(Key::Down),
            "rotate_counterclockwise" => Some(Key::Up),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Key::Left => "left",
            Key::Right => "right",
            Key::Up => "up",
            Key::Down => "down",
            Key::Enter => "enter",
            Key::Space => "space",
        }
    }

    /// X11 keysym name understood by `xdotool key`.
    pub fn keysym(self) -> &'static str {
        match self {
            Key::Left => "Left",
            Key::Right => "Right",
            Key::Up => "Up",
            Key::Down => "Down",
            Key::Enter => "Return",
            Key::Space => "space",
        }
    }
}

/// Host-side key injection. Calls are fire-and-forget: implementations must
/// not block and report failures only through logs.
pub trait InputInjector: Send + Sync {
    fn inject(&self, key: Key);
}

pub struct NoopInjector;

impl InputInjector for NoopInjector {
    fn inject(&self, _key: Key) {}
}

pub struct LogInjector;

impl InputInjector for LogInjector {
    fn inject(&self, key: Key) {
        tracing::info!(key = key.as_str(), "key press (log only)");
    }
}

/// Presses keys through the `xdotool` binary. Requires a tokio runtime.
pub struct XdotoolInjector {
    program: String,
}

impl XdotoolInjector {
    pub fn new() -> Self {
        Self::with_program("xdotool")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for XdotoolInjector {
    fn default() -> Self {
        Self::new()
    }
}

impl InputInjector for XdotoolInjector {
    fn inject(&self, key: Key) {
        let spawned = tokio::process::Command::new(&self.program)
            .args(["key", key.keysym()])
            .kill_on_drop(false)
            .spawn();

        match spawned {
            Ok(mut child) => {
                tokio::spawn(async move {
                    match child.wait().await {
                        Ok(status) if !status.success() => {
                            tracing::warn!(key = key.as_str(), %status, "xdotool exited with failure");
                        }
                        Err(e) => tracing::warn!(key = key.as_str(), "xdotool wait failed: {e}"),
                        _ => {}
                    }
                });
            }
            Err(e) => tracing::warn!(key = key.as_str(), "failed to spawn xdotool: {e}"),
        }
    }
}

pub fn injector_for(mode: &KeyInjection) -> Arc<dyn InputInjector> {
    match mode {
        KeyInjection::Off => Arc::new(NoopInjector),
        KeyInjection::Log => Arc::new(LogInjector),
        KeyInjection::Xdotool => Arc::new(XdotoolInjector::new()),
    }
}
