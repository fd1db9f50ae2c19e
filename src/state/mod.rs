//! State module
//!
//! Timer status and the snapshots observers receive.

pub mod relay;
pub mod timer_state;

// Re-export main types
pub use relay::RelayInfo;
pub use timer_state::{RelayState, TimerStatus};
