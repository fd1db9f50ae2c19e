//! Relay Timer - a countdown primitive for time-bounded relay activity
//!
//! A [`CountdownTimer`] tracks how long an activity stays on and notifies
//! observers when it starts, on every tick, and when it ends. Ticks come from
//! a host-provided [`PeriodicTrigger`]: [`IntervalTrigger`] on a tokio
//! runtime, or [`ManualTrigger`] for deterministic tests.

pub mod config;
pub mod error;
pub mod state;
pub mod tasks;
pub mod timer;
pub mod trigger;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, TimerError, ValidationError};
pub use state::{RelayInfo, RelayState, TimerStatus};
pub use tasks::{relay_countdown_task, relay_report_task};
pub use timer::{CountdownTimer, TimerCallbacks, TimerConfig};
pub use trigger::{IntervalTrigger, ManualTrigger, PeriodicTrigger, TriggerHandle};
pub use utils::signals::shutdown_signal;
