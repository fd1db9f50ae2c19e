//! Timer status and observer snapshot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a countdown currently has a trigger armed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Running,
    Stopped,
}

impl TimerStatus {
    pub fn is_running(self) -> bool {
        self == TimerStatus::Running
    }
}

impl Default for TimerStatus {
    fn default() -> Self {
        TimerStatus::Stopped
    }
}

/// Relay state as seen by observers of a countdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayState {
    pub is_active: bool,
    pub duration: Option<f64>,
    pub time_remaining: Option<f64>,
    pub time_elapsed: Option<f64>,
    pub started_at: Option<DateTime<Utc>>,
}

impl RelayState {
    /// Create an inactive relay state
    pub fn inactive() -> Self {
        Self {
            is_active: false,
            duration: None,
            time_remaining: None,
            time_elapsed: None,
            started_at: None,
        }
    }

    /// Create an active relay state from the timer's counters
    pub fn active(duration: f64, remaining: f64, started_at: Option<DateTime<Utc>>) -> Self {
        Self {
            is_active: true,
            duration: Some(duration),
            time_remaining: Some(remaining),
            time_elapsed: Some(duration - remaining),
            started_at,
        }
    }

    /// Remaining seconds if the relay is active
    pub fn remaining_seconds(&self) -> Option<f64> {
        if self.is_active {
            self.time_remaining
        } else {
            None
        }
    }
}

impl Default for RelayState {
    fn default() -> Self {
        Self::inactive()
    }
}
