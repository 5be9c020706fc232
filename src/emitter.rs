//! Background producers of synthetic debug events.
//!
//! Each [`EmitterLoop`] sleeps per its [`Cadence`], checks its toggle and
//! optional [`Cooldown`], and publishes whatever its [`Synthesizer`] builds.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::config::EmitterConfig;
use crate::gateway::events::{
    now_ts, round2, DriverStateEvent, Event, GestureEvent, DEBUG_SOURCE, GESTURE_LABELS,
};
use crate::gateway::hub::BroadcastHub;
use crate::state::AppState;
use crate::toggles::{Toggle, ToggleState};

/// How long an emitter sleeps between cycles.
#[derive(Debug, Clone, PartialEq)]
pub enum Cadence {
    Fixed(Duration),
    Uniform { min: Duration, max: Duration },
}

impl Cadence {
    pub fn next_delay(&self, rng: &mut impl Rng) -> Duration {
        match self {
            Cadence::Fixed(d) => *d,
            Cadence::Uniform { min, max } if min >= max => *min,
            Cadence::Uniform { min, max } => {
                Duration::from_secs_f64(rng.gen_range(min.as_secs_f64()..=max.as_secs_f64()))
            }
        }
    }
}

/// Minimum spacing between two emissions. The first emission is always
/// allowed.
#[derive(Debug, Clone)]
pub struct Cooldown {
    interval: Duration,
    last: Option<Instant>,
}

impl Cooldown {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn ready(&self, now: Instant) -> bool {
        self.last
            .map_or(true, |last| now.saturating_duration_since(last) >= self.interval)
    }

    pub fn record(&mut self, now: Instant) {
        self.last = Some(now);
    }
}

/// Builds one synthetic event per emission.
pub trait Synthesizer: Send + 'static {
    fn name(&self) -> &'static str;
    fn synthesize(&mut self, rng: &mut StdRng) -> Event;
}

/// Random gesture from [`GESTURE_LABELS`] with confidence in `[0.8, 1.0]`.
pub struct GestureSynth;

impl Synthesizer for GestureSynth {
    fn name(&self) -> &'static str {
        "gesture"
    }

    fn synthesize(&mut self, rng: &mut StdRng) -> Event {
        let gesture = GESTURE_LABELS
            .choose(rng)
            .copied()
            .unwrap_or(GESTURE_LABELS[0]);
        Event::Gesture(GestureEvent {
            ts: Some(now_ts()),
            gesture: gesture.to_string(),
            confidence: Some(round2(rng.gen_range(0.8..=1.0))),
            source: Some(DEBUG_SOURCE.to_string()),
            extra: Default::default(),
        })
    }
}

/// Fixed fatigue alert.
pub struct DriverFatigueSynth;

impl Synthesizer for DriverFatigueSynth {
    fn name(&self) -> &'static str {
        "driver"
    }

    fn synthesize(&mut self, _rng: &mut StdRng) -> Event {
        Event::DriverState(DriverStateEvent {
            ts: Some(now_ts()),
            fatigue: true,
            yawn: false,
            eye_closed: true,
            confidence: 0.95,
            source: DEBUG_SOURCE.to_string(),
        })
    }
}

pub struct EmitterLoop<S> {
    synth: S,
    toggle: Toggle,
    cadence: Cadence,
    cooldown: Option<Cooldown>,
    toggles: Arc<ToggleState>,
    hub: BroadcastHub,
    rng: StdRng,
}

impl<S: Synthesizer> EmitterLoop<S> {
    pub fn new(state: &AppState, synth: S, toggle: Toggle, cadence: Cadence) -> Self {
        Self {
            synth,
            toggle,
            cadence,
            cooldown: None,
            toggles: state.toggles.clone(),
            hub: state.hub.clone(),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_cooldown(mut self, interval: Duration) -> Self {
        self.cooldown = Some(Cooldown::new(interval));
        self
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// One cycle after the sleep: returns the event to publish, if any, and
    /// records the emission against the cooldown.
    pub fn poll(&mut self, now: Instant) -> Option<Event> {
        if !self.toggles.is_enabled(self.toggle) {
            return None;
        }
        if let Some(cooldown) = &self.cooldown {
            if !cooldown.ready(now) {
                return None;
            }
        }
        let event = self.synth.synthesize(&mut self.rng);
        if let Some(cooldown) = &mut self.cooldown {
            cooldown.record(now);
        }
        Some(event)
    }

    /// Runs until the task is dropped or the runtime shuts down.
    pub async fn run(mut self) {
        tracing::debug!(emitter = self.synth.name(), toggle = self.toggle.name(), "emitter started");
        loop {
            let delay = self.cadence.next_delay(&mut self.rng);
            tokio::time::sleep(delay).await;

            if let Some(event) = self.poll(Instant::now()) {
                tracing::info!(emitter = self.synth.name(), ?event, "emitting synthetic event");
                self.hub.publish(&event, None);
            }
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}

pub fn gesture_emitter(state: &AppState, config: &EmitterConfig) -> EmitterLoop<GestureSynth> {
    EmitterLoop::new(
        state,
        GestureSynth,
        Toggle::GestureDebug,
        Cadence::Uniform {
            min: config.gesture_min_delay,
            max: config.gesture_max_delay,
        },
    )
}

pub fn driver_emitter(state: &AppState, config: &EmitterConfig) -> EmitterLoop<DriverFatigueSynth> {
    EmitterLoop::new(
        state,
        DriverFatigueSynth,
        Toggle::DriverDebug,
        Cadence::Fixed(config.driver_poll),
    )
    .with_cooldown(config.driver_cooldown)
}

/// Spawn the gesture and driver emitters.
pub fn spawn_emitters(state: &AppState, config: &EmitterConfig) -> Vec<JoinHandle<()>> {
    vec![
        gesture_emitter(state, config).spawn(),
        driver_emitter(state, config).spawn(),
    ]
}
