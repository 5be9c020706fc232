use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum KeyInjection {
    Off,
    Log,
    Xdotool,
}

impl KeyInjection {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "off" | "none" | "0" | "false" => Some(KeyInjection::Off),
            "log" => Some(KeyInjection::Log),
            "xdotool" => Some(KeyInjection::Xdotool),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyInjection::Off => "off",
            KeyInjection::Log => "log",
            KeyInjection::Xdotool => "xdotool",
        }
    }
}

/// Timing of the synthetic emitters.
#[derive(Debug, Clone, PartialEq)]
pub struct EmitterConfig {
    pub gesture_min_delay: Duration,
    pub gesture_max_delay: Duration,
    pub driver_poll: Duration,
    pub driver_cooldown: Duration,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            gesture_min_delay: Duration::from_millis(500),
            gesture_max_delay: Duration::from_millis(2000),
            driver_poll: Duration::from_millis(1000),
            driver_cooldown: Duration::from_secs(20),
        }
    }
}

pub struct Config {
    pub host: String,
    pub port: u16,
    pub relay_gestures: bool,
    pub key_injection: KeyInjection,
    pub gesture_debug: bool,
    pub driver_debug: bool,
    pub emitters: EmitterConfig,
}

/// Unrecognised values fall back to `default`.
fn env_flag(name: &str, default: bool) -> bool {
    let Ok(value) = std::env::var(name) else {
        return default;
    };
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            tracing::warn!(name, value = %value, "unrecognised flag value, using default");
            default
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

/// Zero would make an emitter loop without sleeping, so it counts as invalid.
fn env_millis(name: &str) -> Option<Duration> {
    env_parse::<u64>(name)
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = EmitterConfig::default();

        let mut gesture_min_delay =
            env_millis("GESTUREHUB_GESTURE_MIN_MS").unwrap_or(defaults.gesture_min_delay);
        let mut gesture_max_delay =
            env_millis("GESTUREHUB_GESTURE_MAX_MS").unwrap_or(defaults.gesture_max_delay);
        if gesture_min_delay > gesture_max_delay {
            std::mem::swap(&mut gesture_min_delay, &mut gesture_max_delay);
        }

        let emitters = EmitterConfig {
            gesture_min_delay,
            gesture_max_delay,
            driver_poll: env_millis("GESTUREHUB_DRIVER_POLL_MS").unwrap_or(defaults.driver_poll),
            driver_cooldown: env_parse("GESTUREHUB_DRIVER_COOLDOWN_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.driver_cooldown),
        };

        let key_injection = std::env::var("GESTUREHUB_KEY_INJECTION")
            .ok()
            .and_then(|v| KeyInjection::parse(&v))
            .unwrap_or(KeyInjection::Log);

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env_parse("PORT").unwrap_or(8765),
            relay_gestures: env_flag("GESTUREHUB_RELAY_GESTURES", true),
            key_injection,
            gesture_debug: env_flag("GESTUREHUB_GESTURE_DEBUG", false),
            driver_debug: env_flag("GESTUREHUB_DRIVER_DEBUG", false),
            emitters,
        }
    }
}
