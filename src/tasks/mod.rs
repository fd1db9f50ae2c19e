//! Background tasks module
//!
//! Async drivers that run a countdown alongside the rest of the host.

pub mod relay_countdown;
pub mod relay_report;

// Re-export main functions
pub use relay_countdown::{relay_countdown_task, CountdownOutcome};
pub use relay_report::relay_report_task;
