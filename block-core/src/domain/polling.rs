//! Polling configuration

use std::time::Duration;

/// Default delay between job status reads, in seconds
pub const DEFAULT_POLL_INTERVAL_SECS: f64 = 2.0;

/// Default time budget for a job to reach a terminal status, in seconds
pub const DEFAULT_POLL_TIMEOUT_SECS: f64 = 180.0;

/// Accepted range for a host-supplied poll interval, in seconds
pub const POLL_INTERVAL_RANGE: std::ops::RangeInclusive<f64> = 1.0..=60.0;

/// Accepted range for a host-supplied poll timeout, in seconds
pub const POLL_TIMEOUT_RANGE: std::ops::RangeInclusive<f64> = 10.0..=600.0;

/// How often and for how long a job is polled
///
/// The timeout is expected to exceed the interval so at least one read
/// happens, but this is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Delay between two status reads. Zero means poll back to back.
    pub interval: Duration,
    /// Wall-clock budget measured from the first read
    pub timeout: Duration,
}

impl PollConfig {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    /// Builds a configuration from second counts
    ///
    /// Negative or NaN values become zero and values too large for a
    /// [`Duration`] saturate.
    pub fn from_secs_f64(interval_secs: f64, timeout_secs: f64) -> Self {
        Self {
            interval: secs_to_duration(interval_secs),
            timeout: secs_to_duration(timeout_secs),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::from_secs_f64(DEFAULT_POLL_INTERVAL_SECS, DEFAULT_POLL_TIMEOUT_SECS)
    }
}

/// Converts seconds to a [`Duration`], clamping negative or NaN values to zero
pub fn secs_to_duration(secs: f64) -> Duration {
    if secs.is_nan() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}
