//! Manually advanced trigger for tests and simulations

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use super::{FireFn, PeriodicTrigger, TriggerHandle};

struct Armed {
    interval: Duration,
    next_fire: Duration,
    on_fire: FireFn,
}

#[derive(Default)]
struct ManualClock {
    now: Duration,
    next_id: u64,
    armed: BTreeMap<TriggerHandle, Armed>,
}

/// Deterministic fake clock.
///
/// Clones share the same clock, so a test can keep one clone and hand the
/// other to a timer. Nothing fires until [`ManualTrigger::advance`] is called.
#[derive(Clone, Default)]
pub struct ManualTrigger {
    clock: Arc<Mutex<ManualClock>>,
}

impl ManualTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ManualClock> {
        self.clock.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Time elapsed on the fake clock
    pub fn now(&self) -> Duration {
        self.lock().now
    }

    /// Number of handles currently armed
    pub fn armed_count(&self) -> usize {
        self.lock().armed.len()
    }

    /// Move the clock forward, firing every callback that falls due.
    ///
    /// Fires run one at a time in deadline order, with the clock set to the
    /// fire's deadline and no internal lock held, so a callback may arm or
    /// disarm handles. Returns the number of fires delivered.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.lock().now + by;
        let mut fired = 0;

        loop {
            let due = {
                let mut clock = self.lock();
                let next = clock
                    .armed
                    .iter()
                    .filter(|(_, armed)| armed.next_fire <= target)
                    .min_by_key(|(handle, armed)| (armed.next_fire, **handle))
                    .map(|(handle, _)| *handle);

                match next {
                    Some(handle) => {
                        let ManualClock { now, armed, .. } = &mut *clock;
                        armed.get_mut(&handle).map(|armed| {
                            *now = armed.next_fire;
                            armed.next_fire += armed.interval;
                            Arc::clone(&armed.on_fire)
                        })
                    }
                    None => {
                        clock.now = target;
                        None
                    }
                }
            };

            match due {
                Some(on_fire) => {
                    on_fire();
                    fired += 1;
                }
                None => break,
            }
        }

        fired
    }
}

impl PeriodicTrigger for ManualTrigger {
    fn arm(&mut self, interval: Duration, on_fire: FireFn) -> TriggerHandle {
        // A zero interval would never let the clock move past a deadline
        let interval = interval.max(Duration::from_nanos(1));
        let mut clock = self.lock();
        clock.next_id += 1;
        let handle = TriggerHandle::new(clock.next_id);
        let next_fire = clock.now + interval;
        clock.armed.insert(
            handle,
            Armed {
                interval,
                next_fire,
                on_fire,
            },
        );
        handle
    }

    fn disarm(&mut self, handle: TriggerHandle) {
        self.lock().armed.remove(&handle);
    }
}
