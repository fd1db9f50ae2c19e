//! Countdown timer state machine
//!
//! ```text
//! Stopped --start--> Running --end / last tick--> Stopped
//! ```
//!
//! Ticks come from an armed [`PeriodicTrigger`]. All mutable state sits behind
//! one mutex; observer callbacks are always invoked after it is released, so
//! an observer may query the timer or call [`CountdownTimer::end`] from
//! inside a notification.

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::config::{StartEndCallback, TickCallback, TimerCallbacks, TimerConfig};
use crate::{
    error::{tick_period, validate_duration, validate_tick_interval, Result, TimerError},
    state::{RelayState, TimerStatus},
    trigger::{PeriodicTrigger, TriggerHandle},
};

/// The trigger arming currently owned by a running timer
#[derive(Debug, Clone, Copy)]
struct Arming {
    handle: TriggerHandle,
    generation: u64,
}

struct TimerInner {
    duration: f64,
    remaining: f64,
    tick_interval: f64,
    status: TimerStatus,
    started_at: Option<DateTime<Utc>>,
    callbacks: TimerCallbacks,
    trigger: Box<dyn PeriodicTrigger>,
    arming: Option<Arming>,
    generation: u64,
    updates: watch::Sender<RelayState>,
}

impl TimerInner {
    fn snapshot(&self) -> RelayState {
        match self.status {
            TimerStatus::Running => {
                RelayState::active(self.duration, self.remaining, self.started_at)
            }
            TimerStatus::Stopped => RelayState::inactive(),
        }
    }

    fn publish(&self) {
        self.updates.send_replace(self.snapshot());
    }

    /// Disarm and mark stopped. Returns the end observer to notify.
    fn stop(&mut self) -> Option<StartEndCallback> {
        if let Some(arming) = self.arming.take() {
            self.trigger.disarm(arming.handle);
            debug!("Released {}", arming.handle);
        }
        self.status = TimerStatus::Stopped;
        self.started_at = None;
        self.publish();
        self.callbacks.on_end.clone()
    }
}

/// A countdown that notifies observers on start, on every tick and on end.
///
/// The timer exclusively owns its trigger handle; dropping a running timer
/// disarms it without an end notification.
pub struct CountdownTimer {
    inner: Arc<Mutex<TimerInner>>,
}

impl CountdownTimer {
    /// Create a stopped timer of `duration` seconds with a one second tick
    pub fn new(duration: f64, trigger: impl PeriodicTrigger + 'static) -> Result<Self> {
        Self::with_config(TimerConfig::new(duration), trigger)
    }

    /// Create a timer from a full configuration, starting it if requested
    pub fn with_config(config: TimerConfig, trigger: impl PeriodicTrigger + 'static) -> Result<Self> {
        config.validate()?;

        let TimerConfig {
            duration,
            tick_interval,
            auto_start,
            callbacks,
        } = config;

        let (updates, _) = watch::channel(RelayState::inactive());
        let timer = Self {
            inner: Arc::new(Mutex::new(TimerInner {
                duration,
                remaining: duration,
                tick_interval,
                status: TimerStatus::Stopped,
                started_at: None,
                callbacks,
                trigger: Box::new(trigger),
                arming: None,
                generation: 0,
                updates,
            })),
        };

        debug!(
            "Created countdown: duration={}s, tick_interval={}s",
            duration, tick_interval
        );

        if auto_start {
            timer.start()?;
        }

        Ok(timer)
    }

    fn lock(&self) -> MutexGuard<'_, TimerInner> {
        lock_inner(&self.inner)
    }

    /// Arm the trigger and notify `on_start`.
    ///
    /// Fails with [`TimerError::AlreadyStarted`] while running; call
    /// [`end`](Self::end) first to restart.
    pub fn start(&self) -> Result<()> {
        let mut inner = self.lock();
        if inner.status.is_running() {
            return Err(TimerError::AlreadyStarted);
        }

        let interval = tick_period(inner.tick_interval)?;
        inner.generation += 1;
        let generation = inner.generation;
        let weak = Arc::downgrade(&self.inner);
        let handle = inner
            .trigger
            .arm(interval, Arc::new(move || fire(&weak, generation)));

        inner.arming = Some(Arming { handle, generation });
        inner.status = TimerStatus::Running;
        inner.started_at = Some(Utc::now());
        inner.publish();

        let duration = inner.duration;
        let remaining = inner.remaining;
        let on_start = inner.callbacks.on_start.clone();
        drop(inner);

        info!(
            "Countdown started: duration={}s, remaining={}s",
            duration, remaining
        );
        if let Some(on_start) = on_start {
            on_start(duration);
        }
        Ok(())
    }

    /// Disarm the trigger if armed, then notify `on_end`.
    ///
    /// `on_end` fires on every call, including on a timer that was never
    /// started or has already ended.
    pub fn end(&self) {
        let mut inner = self.lock();
        let was_running = inner.status.is_running();
        let on_end = inner.stop();
        let duration = inner.duration;
        drop(inner);

        if was_running {
            info!("Countdown ended: duration={}s", duration);
        } else {
            debug!("End requested on a stopped countdown");
        }
        if let Some(on_end) = on_end {
            on_end(duration);
        }
    }

    /// Reset duration and remaining time without touching the armed trigger
    pub fn set_duration(&self, duration: f64) -> Result<&Self> {
        let mut inner = self.lock();
        validate_duration(duration)?;
        validate_tick_interval(inner.tick_interval)?;

        inner.duration = duration;
        inner.remaining = duration;
        inner.publish();
        debug!("Countdown duration set to {}s", duration);
        Ok(self)
    }

    /// Replace all observer slots at once
    pub fn configure(&self, callbacks: TimerCallbacks) -> &Self {
        self.lock().callbacks = callbacks;
        self
    }

    pub fn set_start_callback<F>(&self, callback: F) -> &Self
    where
        F: Fn(f64) + Send + Sync + 'static,
    {
        self.lock().callbacks.on_start = Some(Arc::new(callback));
        self
    }

    pub fn set_end_callback<F>(&self, callback: F) -> &Self
    where
        F: Fn(f64) + Send + Sync + 'static,
    {
        self.lock().callbacks.on_end = Some(Arc::new(callback));
        self
    }

    pub fn set_tick_callback<F>(&self, callback: F) -> &Self
    where
        F: Fn(f64, f64) + Send + Sync + 'static,
    {
        self.lock().callbacks.on_tick = Some(Arc::new(callback));
        self
    }

    pub fn status(&self) -> TimerStatus {
        self.lock().status
    }

    pub fn is_running(&self) -> bool {
        self.status().is_running()
    }

    pub fn duration(&self) -> f64 {
        self.lock().duration
    }

    pub fn remaining(&self) -> f64 {
        self.lock().remaining
    }

    pub fn elapsed(&self) -> f64 {
        let inner = self.lock();
        inner.duration - inner.remaining
    }

    pub fn tick_interval(&self) -> f64 {
        self.lock().tick_interval
    }

    /// Current state as observers see it
    pub fn snapshot(&self) -> RelayState {
        self.lock().snapshot()
    }

    /// Watch the snapshot published after every state change
    pub fn subscribe(&self) -> watch::Receiver<RelayState> {
        self.lock().updates.subscribe()
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        let mut inner = self.lock();
        if let Some(arming) = inner.arming.take() {
            inner.trigger.disarm(arming.handle);
            inner.status = TimerStatus::Stopped;
            inner.publish();
            debug!("Countdown dropped while running, released {}", arming.handle);
        }
    }
}

fn lock_inner(inner: &Mutex<TimerInner>) -> MutexGuard<'_, TimerInner> {
    // Callbacks never run under this lock, so a poisoned guard still holds
    // consistent counters.
    inner.lock().unwrap_or_else(|e| e.into_inner())
}

/// Trigger entry point: one tick of the arming identified by `generation`.
fn fire(inner: &Weak<Mutex<TimerInner>>, generation: u64) {
    let Some(inner) = inner.upgrade() else {
        return;
    };
    tick(&inner, generation);
}

fn tick(inner: &Mutex<TimerInner>, generation: u64) {
    let mut state = lock_inner(inner);

    if state.arming.map(|a| a.generation) != Some(generation) {
        warn!("Discarding tick from a disarmed trigger");
        return;
    }

    state.remaining -= state.tick_interval;

    let finished = state.remaining <= 0.0;
    let on_end = if finished {
        state.remaining = 0.0;
        state.stop()
    } else {
        state.publish();
        None
    };

    let duration = state.duration;
    let remaining = state.remaining;
    let on_tick: Option<TickCallback> = state.callbacks.on_tick.clone();
    drop(state);

    debug!("Countdown tick: remaining={}s of {}s", remaining, duration);

    // Observers of the final tick already see a stopped timer
    if finished {
        info!("Countdown finished: duration={}s", duration);
        if let Some(on_end) = on_end {
            on_end(duration);
        }
    }
    if let Some(on_tick) = on_tick {
        on_tick(duration, remaining);
    }
}
