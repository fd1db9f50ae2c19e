//! Utility functions module
//!
//! Host plumbing for the binary: graceful shutdown on process signals.

pub mod signals;

pub use signals::shutdown_signal;
