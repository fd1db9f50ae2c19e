//! Relay Timer - run a countdown for one relay
//!
//! This is the main entry point for the relay-timer application.

use std::sync::Arc;
use tracing::{error, info};

use relay_timer::{
    config::Config,
    tasks::{relay_countdown_task, relay_report_task, CountdownOutcome},
    timer::{CountdownTimer, TimerCallbacks},
    trigger::IntervalTrigger,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("relay_timer={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    let relay = config.relay();
    info!("Starting relay-timer v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: relay={} (pin {}), duration={}s, tick={}s",
        relay.name, relay.pin, config.duration, config.tick
    );

    let name: Arc<str> = Arc::from(relay.name.as_str());
    let callbacks = {
        let (on_start_name, on_tick_name, on_end_name) =
            (Arc::clone(&name), Arc::clone(&name), Arc::clone(&name));

        TimerCallbacks::new()
            .on_start(move |duration| info!("{} activated for {}s", on_start_name, duration))
            .on_tick(move |_, remaining| info!("{}: {}s remaining", on_tick_name, remaining))
            .on_end(move |duration| {
                info!("{} deactivated after {}s countdown", on_end_name, duration)
            })
    };

    let trigger = IntervalTrigger::from_current()?;
    let timer = CountdownTimer::with_config(config.timer_config(callbacks), trigger)?;

    // Subscribe before the countdown starts so the first snapshot is reported
    let report = config
        .json
        .then(|| tokio::spawn(relay_report_task(relay, timer.subscribe(), std::io::stdout())));

    let shutdown = async {
        if let Err(e) = shutdown_signal().await {
            error!("Failed to install signal handler: {}", e);
            futures::future::pending::<()>().await;
        }
    };

    match relay_countdown_task(&timer, shutdown).await? {
        CountdownOutcome::Completed => info!("Countdown complete"),
        CountdownOutcome::Interrupted { remaining } => {
            info!("Countdown interrupted with {}s remaining", remaining)
        }
    }

    // Dropping the timer closes the snapshot channel and ends the report
    drop(timer);
    if let Some(report) = report {
        if let Err(e) = report.await? {
            error!("Failed to write relay report: {}", e);
        }
    }

    info!("Relay timer shutdown complete");
    Ok(())
}
