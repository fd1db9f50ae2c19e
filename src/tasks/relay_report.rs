//! JSON line reporting of relay state changes

use std::io::Write;
use tokio::sync::watch;
use tracing::debug;

use crate::state::{RelayInfo, RelayState};

/// Write one JSON line per published snapshot until the timer is dropped.
///
/// The value current at subscription time is not reported, only later
/// changes. Returns the writer so callers can inspect or flush it.
pub async fn relay_report_task<W: Write>(
    relay: RelayInfo,
    mut updates: watch::Receiver<RelayState>,
    mut out: W,
) -> std::io::Result<W> {
    while updates.changed().await.is_ok() {
        let state = updates.borrow_and_update().clone();
        let line = serde_json::to_string(&relay.with_state(state))?;
        writeln!(out, "{}", line)?;
        out.flush()?;
    }

    debug!("Relay {} report finished", relay.id);
    Ok(out)
}
