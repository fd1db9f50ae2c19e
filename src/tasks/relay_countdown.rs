//! Relay countdown background task

use std::future::Future;
use tracing::{debug, info};

use crate::{error::Result, timer::CountdownTimer};

/// How a countdown task came to an end
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CountdownOutcome {
    /// The timer stopped on its own or was ended by an observer
    Completed,
    /// Shutdown fired first; the timer was ended with time left
    Interrupted { remaining: f64 },
}

/// Run a countdown until the timer stops or `shutdown` resolves.
///
/// Starts the timer if it is not already running. On shutdown the timer is
/// ended, so `on_end` observers still get notified.
pub async fn relay_countdown_task<S>(timer: &CountdownTimer, shutdown: S) -> Result<CountdownOutcome>
where
    S: Future<Output = ()>,
{
    let mut updates = timer.subscribe();

    if !timer.is_running() {
        timer.start()?;
    }

    tokio::pin!(shutdown);

    loop {
        let state = updates.borrow_and_update().clone();
        if !state.is_active {
            info!("Countdown task finished");
            return Ok(CountdownOutcome::Completed);
        }
        debug!("Countdown task observed remaining={:?}", state.time_remaining);

        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    // Sender lives inside the timer, which outlives this loop
                    return Ok(CountdownOutcome::Completed);
                }
            }
            _ = &mut shutdown => {
                let remaining = timer.remaining();
                info!("Shutdown requested, ending countdown with {}s left", remaining);
                timer.end();
                return Ok(CountdownOutcome::Interrupted { remaining });
            }
        }
    }
}
