use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use super::timing::{clamp_speed, step_speed, tick_delta};
use crate::config::ScrollConfig;

/// Mutable part of the engine, read by every tick
#[derive(Debug, Clone, Copy)]
struct State {
    speed: f64,
    playing: bool,
}

struct Shared {
    state: Mutex<State>,
    min: f64,
    max: f64,
    step: f64,
}

/// Emits a scroll delta on every tick while playing
///
/// State mutations and tick reads go through one lock that only guards the
/// small state record; the delta callback always runs with the lock released.
pub struct ScrollEngine {
    shared: Arc<Shared>,
    tick: Duration,
    shutdown_tx: watch::Sender<bool>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl ScrollEngine {
    /// Create an engine and start its tick loop.
    ///
    /// Must be called from within a Tokio runtime. The engine starts paused at
    /// `config.initial_speed` (clamped into the configured bounds).
    pub fn new<F>(config: &ScrollConfig, on_delta: F) -> Self
    where
        F: Fn(f64) + Send + 'static,
    {
        let shared = Arc::new(Shared {
            state: Mutex::new(State {
                speed: clamp_speed(config.initial_speed, config.min_speed, config.max_speed),
                playing: false,
            }),
            min: config.min_speed,
            max: config.max_speed,
            step: config.step,
        });
        let tick = config.tick_duration();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(run_loop(shared.clone(), tick, on_delta, shutdown_rx));
        debug!(
            tick_ms = tick.as_millis() as u64,
            min = config.min_speed,
            max = config.max_speed,
            step = config.step,
            "Scroll engine started"
        );

        Self {
            shared,
            tick,
            shutdown_tx,
            task: Mutex::new(Some(task)),
        }
    }

    /// Create an engine with the default bounds (20..300, step 20, 33 ms ticks)
    pub fn with_defaults<F>(on_delta: F) -> Self
    where
        F: Fn(f64) + Send + 'static,
    {
        Self::new(&ScrollConfig::default(), on_delta)
    }

    pub fn play(&self) {
        self.shared.state.lock().playing = true;
    }

    pub fn pause(&self) {
        self.shared.state.lock().playing = false;
    }

    /// Flip play/pause and return the new playing state
    pub fn toggle(&self) -> bool {
        let mut state = self.shared.state.lock();
        state.playing = !state.playing;
        state.playing
    }

    pub fn is_playing(&self) -> bool {
        self.shared.state.lock().playing
    }

    pub fn speed(&self) -> f64 {
        self.shared.state.lock().speed
    }

    /// Increase speed by one step, saturating at the maximum
    pub fn speed_up(&self) -> f64 {
        let mut state = self.shared.state.lock();
        state.speed = step_speed(state.speed, self.shared.step, self.shared.min, self.shared.max);
        state.speed
    }

    /// Decrease speed by one step, saturating at the minimum
    pub fn speed_down(&self) -> f64 {
        let mut state = self.shared.state.lock();
        state.speed = step_speed(state.speed, -self.shared.step, self.shared.min, self.shared.max);
        state.speed
    }

    /// Set an absolute speed, clamped into the engine bounds
    pub fn set_speed(&self, speed: f64) -> f64 {
        let mut state = self.shared.state.lock();
        state.speed = clamp_speed(speed, self.shared.min, self.shared.max);
        state.speed
    }

    pub fn min_speed(&self) -> f64 {
        self.shared.min
    }

    pub fn max_speed(&self) -> f64 {
        self.shared.max
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Terminate the tick loop and wait for it to exit.
    ///
    /// No delta is delivered once this returns. Calling it again is a no-op.
    pub async fn stop(&self) {
        let handle = self.task.lock().take();
        let Some(handle) = handle else {
            return;
        };

        let _ = self.shutdown_tx.send(true);
        if let Err(e) = handle.await {
            warn!("Scroll engine task ended abnormally: {}", e);
        }
        debug!("Scroll engine stopped");
    }
}

async fn run_loop<F>(
    shared: Arc<Shared>,
    tick: Duration,
    on_delta: F,
    mut shutdown: watch::Receiver<bool>,
) where
    F: Fn(f64) + Send + 'static,
{
    let mut interval = tokio::time::interval(tick);
    // A late tick is dropped rather than replayed, so no distance is caught up
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately
    interval.tick().await;

    loop {
        tokio::select! {
            biased;

            result = shutdown.changed() => {
                // Err: the engine was dropped without stop()
                if result.is_err() || *shutdown.borrow() {
                    break;
                }
            }

            _ = interval.tick() => {
                let snapshot = *shared.state.lock();
                if snapshot.playing {
                    on_delta(tick_delta(snapshot.speed, tick));
                }
            }
        }
    }
}
