//! Configuration and CLI argument handling

use clap::Parser;

use crate::{
    state::RelayInfo,
    timer::{TimerCallbacks, TimerConfig},
};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "relay-timer")]
#[command(about = "Run a countdown for a relay and report its progress")]
#[command(version)]
pub struct Config {
    /// Countdown duration in seconds
    #[arg(short, long)]
    pub duration: f64,

    /// Seconds between tick notifications
    #[arg(short, long, default_value = "1")]
    pub tick: f64,

    /// Relay identifier reported in JSON output
    #[arg(long, default_value = "relay-0")]
    pub id: String,

    /// GPIO pin the relay is wired to
    #[arg(long, default_value = "0")]
    pub pin: u8,

    /// Human readable relay name
    #[arg(short, long, default_value = "relay")]
    pub name: String,

    /// Print one JSON line per notification to stdout
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// The relay this run reports on
    pub fn relay(&self) -> RelayInfo {
        RelayInfo::new(self.id.clone(), self.pin, self.name.clone())
    }

    /// Timer configuration for this run, with the given observers
    pub fn timer_config(&self, callbacks: TimerCallbacks) -> TimerConfig {
        TimerConfig::new(self.duration)
            .tick_interval(self.tick)
            .callbacks(callbacks)
    }
}
