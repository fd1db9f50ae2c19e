//! Tokio-backed periodic trigger

use std::{collections::HashMap, time::Duration};
use tokio::{
    runtime::{Handle, TryCurrentError},
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

use super::{FireFn, PeriodicTrigger, TriggerHandle};

/// Fires callbacks from tasks spawned on a tokio runtime
#[derive(Debug)]
pub struct IntervalTrigger {
    runtime: Handle,
    next_id: u64,
    tasks: HashMap<TriggerHandle, JoinHandle<()>>,
}

impl IntervalTrigger {
    /// Create a trigger that spawns onto the given runtime
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            next_id: 0,
            tasks: HashMap::new(),
        }
    }

    /// Create a trigger bound to the runtime of the calling context
    pub fn from_current() -> Result<Self, TryCurrentError> {
        Handle::try_current().map(Self::new)
    }

    /// Number of handles currently armed
    pub fn armed_count(&self) -> usize {
        self.tasks.len()
    }
}

impl PeriodicTrigger for IntervalTrigger {
    fn arm(&mut self, interval: Duration, on_fire: FireFn) -> TriggerHandle {
        // tokio rejects a zero period
        let interval = interval.max(Duration::from_nanos(1));
        self.next_id += 1;
        let handle = TriggerHandle::new(self.next_id);

        let task = self.runtime.spawn(async move {
            // Like a wall-clock interval timer: nothing fires at arm time
            let mut ticker = interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                on_fire();
            }
        });

        debug!("Armed {} every {:?}", handle, interval);
        self.tasks.insert(handle, task);
        handle
    }

    fn disarm(&mut self, handle: TriggerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
            debug!("Disarmed {}", handle);
        }
    }
}

impl Drop for IntervalTrigger {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
