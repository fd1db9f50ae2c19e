//! Countdown timer module

pub mod config;
pub mod countdown;

pub use config::{StartEndCallback, TickCallback, TimerCallbacks, TimerConfig};
pub use countdown::CountdownTimer;
