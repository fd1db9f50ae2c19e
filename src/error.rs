//! Error types for the countdown timer.

use std::time::Duration;
use thiserror::Error;

/// Errors raised by the timer's public operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimerError {
    /// Invalid duration or tick interval
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// `start` called while a trigger is already armed
    #[error("Countdown timer already started")]
    AlreadyStarted,
}

/// Parameter validation failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duration must be non-negative, got {duration}")]
    NegativeDuration { duration: f64 },

    #[error("Tick interval must be greater than 0, got {tick_interval}")]
    NonPositiveTickInterval { tick_interval: f64 },

    #[error("Tick interval of {tick_interval}s cannot be scheduled")]
    UnschedulableTickInterval { tick_interval: f64 },

    #[error("Invalid value for '{field}': {value} is not a finite number")]
    NonFinite { field: &'static str, value: f64 },
}

/// Result type alias for TimerError
pub type Result<T, E = TimerError> = std::result::Result<T, E>;

/// Check a duration, in seconds.
pub fn validate_duration(duration: f64) -> Result<(), ValidationError> {
    if !duration.is_finite() {
        return Err(ValidationError::NonFinite {
            field: "duration",
            value: duration,
        });
    }
    if duration < 0.0 {
        return Err(ValidationError::NegativeDuration { duration });
    }
    Ok(())
}

/// Check a tick interval, in seconds.
pub fn validate_tick_interval(tick_interval: f64) -> Result<(), ValidationError> {
    tick_period(tick_interval).map(|_| ())
}

/// Convert a tick interval in seconds into the period a trigger is armed with.
///
/// The period must be at least one nanosecond and fit in a [`Duration`].
pub fn tick_period(tick_interval: f64) -> Result<Duration, ValidationError> {
    if !tick_interval.is_finite() {
        return Err(ValidationError::NonFinite {
            field: "tick_interval",
            value: tick_interval,
        });
    }
    if tick_interval <= 0.0 {
        return Err(ValidationError::NonPositiveTickInterval { tick_interval });
    }
    match Duration::try_from_secs_f64(tick_interval) {
        Ok(period) if !period.is_zero() => Ok(period),
        _ => Err(ValidationError::UnschedulableTickInterval { tick_interval }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_duration_is_valid() {
        assert!(validate_duration(0.0).is_ok());
    }

    #[test]
    fn negative_duration_is_rejected() {
        assert_eq!(
            validate_duration(-1.0),
            Err(ValidationError::NegativeDuration { duration: -1.0 })
        );
    }

    #[test]
    fn zero_tick_interval_is_rejected() {
        assert_eq!(
            validate_tick_interval(0.0),
            Err(ValidationError::NonPositiveTickInterval { tick_interval: 0.0 })
        );
    }

    #[test]
    fn nan_is_rejected() {
        assert!(matches!(
            validate_duration(f64::NAN),
            Err(ValidationError::NonFinite { field: "duration", .. })
        ));
        assert!(matches!(
            validate_tick_interval(f64::INFINITY),
            Err(ValidationError::NonFinite { field: "tick_interval", .. })
        ));
    }

    #[test]
    fn tick_interval_must_fit_a_duration() {
        assert_eq!(
            validate_tick_interval(1e20),
            Err(ValidationError::UnschedulableTickInterval { tick_interval: 1e20 })
        );
    }

    #[test]
    fn sub_nanosecond_tick_interval_is_rejected() {
        assert_eq!(
            tick_period(1e-10),
            Err(ValidationError::UnschedulableTickInterval { tick_interval: 1e-10 })
        );
        assert_eq!(tick_period(1e-9), Ok(Duration::from_nanos(1)));
        assert_eq!(tick_period(0.25), Ok(Duration::from_millis(250)));
    }

    #[test]
    fn validation_converts_into_timer_error() {
        let err: TimerError = ValidationError::NegativeDuration { duration: -2.0 }.into();
        assert_eq!(
            err.to_string(),
            "Validation error: Duration must be non-negative, got -2"
        );
    }
}
