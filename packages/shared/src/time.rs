//! Time-related utilities with clock abstraction for testability.

use chrono::{DateTime, TimeZone, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp (milliseconds)
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        get_unix_timestamp_millis()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Get current Unix timestamp (milliseconds)
pub fn get_unix_timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format a Unix timestamp (milliseconds) as `HH:MM:SS` in the given time zone.
///
/// Out-of-range timestamps are rendered as `--:--:--`.
pub fn format_time_of_day<Tz: TimeZone>(timestamp_millis: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match DateTime::<Utc>::from_timestamp_millis(timestamp_millis) {
        Some(utc) => utc.with_timezone(tz).format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}
