use std::sync::Arc;

use crate::config::Config;
use crate::gateway::hub::BroadcastHub;
use crate::gateway::registry::ConnectionRegistry;
use crate::input::{injector_for, InputInjector};
use crate::toggles::ToggleState;

/// Shared context handed to every session handler, emitter and route.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ConnectionRegistry>,
    pub hub: BroadcastHub,
    pub toggles: Arc<ToggleState>,
    pub injector: Arc<dyn InputInjector>,
    /// Relay client gestures to the other sessions.
    pub relay_gestures: bool,
}

impl AppState {
    pub fn new(toggles: ToggleState, injector: Arc<dyn InputInjector>, relay_gestures: bool) -> Self {
        let registry = Arc::new(ConnectionRegistry::new());
        Self {
            hub: BroadcastHub::new(registry.clone()),
            registry,
            toggles: Arc::new(toggles),
            injector,
            relay_gestures,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ToggleState::new(config.gesture_debug, config.driver_debug),
            injector_for(&config.key_injection),
            config.relay_gestures,
        )
    }
}
