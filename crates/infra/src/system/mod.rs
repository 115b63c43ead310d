use chrono::{DateTime, FixedOffset, Local, Utc};

// Mocking out time so that it is possible to run tests that depend on time.
pub trait ISys: Send + Sync {
    /// The current timestamp in millis
    fn get_timestamp_millis(&self) -> i64;

    /// The current wall-clock datetime carrying the host's UTC offset.
    /// Schedule matching and next-run calculation both read this clock,
    /// so a host time zone change shifts when reminders fire.
    fn get_datetime(&self) -> DateTime<FixedOffset>;
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}

impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn get_datetime(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}
