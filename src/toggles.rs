use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};

/// Debug flags that clients can flip at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    GestureDebug,
    DriverDebug,
}

impl Toggle {
    pub const ALL: [Toggle; 2] = [Toggle::GestureDebug, Toggle::DriverDebug];

    pub fn name(self) -> &'static str {
        match self {
            Toggle::GestureDebug => "gesture_debug",
            Toggle::DriverDebug => "driver_debug",
        }
    }

    /// Accepts both the bare flag name and the `toggle_` command form.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.strip_prefix("toggle_").unwrap_or(name);
        Self::ALL.into_iter().find(|t| t.name() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToggleSnapshot {
    pub gesture_debug: bool,
    pub driver_debug: bool,
}

#[derive(Debug, Default)]
pub struct ToggleState {
    gesture_debug: AtomicBool,
    driver_debug: AtomicBool,
}

impl ToggleState {
    pub fn new(gesture_debug: bool, driver_debug: bool) -> Self {
        Self {
            gesture_debug: AtomicBool::new(gesture_debug),
            driver_debug: AtomicBool::new(driver_debug),
        }
    }

    fn flag(&self, toggle: Toggle) -> &AtomicBool {
        match toggle {
            Toggle::GestureDebug => &self.gesture_debug,
            Toggle::DriverDebug => &self.driver_debug,
        }
    }

    /// Flip a toggle by name. Returns the new value, or `None` (and changes
    /// nothing) when the name is not a known toggle.
    pub fn toggle(&self, name: &str) -> Option<bool> {
        Toggle::from_name(name).map(|t| self.flip(t))
    }

    pub fn flip(&self, toggle: Toggle) -> bool {
        !self.flag(toggle).fetch_xor(true, Ordering::SeqCst)
    }

    pub fn set(&self, toggle: Toggle, enabled: bool) {
        self.flag(toggle).store(enabled, Ordering::SeqCst);
    }

    pub fn is_enabled(&self, toggle: Toggle) -> bool {
        self.flag(toggle).load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> ToggleSnapshot {
        ToggleSnapshot {
            gesture_debug: self.is_enabled(Toggle::GestureDebug),
            driver_debug: self.is_enabled(Toggle::DriverDebug),
        }
    }
}
