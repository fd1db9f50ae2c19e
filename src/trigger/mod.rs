//! Periodic trigger facility
//!
//! A countdown never schedules its own ticks. It arms a [`PeriodicTrigger`]
//! supplied by the host and gets called back at a fixed cadence until it
//! disarms the handle again.

pub mod interval;
pub mod manual;

use std::{fmt, sync::Arc, time::Duration};

pub use interval::IntervalTrigger;
pub use manual::ManualTrigger;

/// Callback a trigger invokes on every fire
pub type FireFn = Arc<dyn Fn() + Send + Sync>;

/// Opaque handle identifying one armed callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriggerHandle(u64);

impl TriggerHandle {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TriggerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trigger#{}", self.0)
    }
}

/// Host capability that repeatedly invokes a callback at a fixed interval.
///
/// Implementations must deliver fires for one handle serially, and must never
/// invoke a handle's callback after `disarm` has returned for it.
pub trait PeriodicTrigger: Send {
    /// Schedule `on_fire` every `interval`, first fire one interval from now.
    fn arm(&mut self, interval: Duration, on_fire: FireFn) -> TriggerHandle;

    /// Cancel a handle. Unknown handles are ignored.
    fn disarm(&mut self, handle: TriggerHandle);
}
