//! Timer configuration and observer callbacks

use std::{fmt, sync::Arc};
use serde::{Deserialize, Serialize};

use crate::error::{validate_duration, validate_tick_interval, ValidationError};

/// Observer for start and end notifications, called with the duration
pub type StartEndCallback = Arc<dyn Fn(f64) + Send + Sync>;
/// Observer for tick notifications, called with duration and remaining time
pub type TickCallback = Arc<dyn Fn(f64, f64) + Send + Sync>;

/// The three observer slots of a countdown
#[derive(Clone, Default)]
pub struct TimerCallbacks {
    pub on_start: Option<StartEndCallback>,
    pub on_tick: Option<TickCallback>,
    pub on_end: Option<StartEndCallback>,
}

impl TimerCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_start<F>(mut self, callback: F) -> Self
    where
        F: Fn(f64) + Send + Sync + 'static,
    {
        self.on_start = Some(Arc::new(callback));
        self
    }

    pub fn on_tick<F>(mut self, callback: F) -> Self
    where
        F: Fn(f64, f64) + Send + Sync + 'static,
    {
        self.on_tick = Some(Arc::new(callback));
        self
    }

    pub fn on_end<F>(mut self, callback: F) -> Self
    where
        F: Fn(f64) + Send + Sync + 'static,
    {
        self.on_end = Some(Arc::new(callback));
        self
    }
}

impl fmt::Debug for TimerCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerCallbacks")
            .field("on_start", &self.on_start.is_some())
            .field("on_tick", &self.on_tick.is_some())
            .field("on_end", &self.on_end.is_some())
            .finish()
    }
}

/// Everything needed to construct a countdown.
///
/// Numeric fields are in seconds. Callbacks are installed before an
/// auto-start, so `on_start` sees the first start.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    pub duration: f64,
    pub tick_interval: f64,
    pub auto_start: bool,
    #[serde(skip)]
    pub callbacks: TimerCallbacks,
}

impl TimerConfig {
    /// Config for `duration` seconds with a one second tick
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    pub fn tick_interval(mut self, tick_interval: f64) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    pub fn auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }

    pub fn callbacks(mut self, callbacks: TimerCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Check the duration and tick interval invariants
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_duration(self.duration)?;
        validate_tick_interval(self.tick_interval)
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            duration: 0.0,
            tick_interval: 1.0,
            auto_start: false,
            callbacks: TimerCallbacks::default(),
        }
    }
}
