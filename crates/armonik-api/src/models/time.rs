//! Protobuf-style timestamp and duration encodings.
//!
//! The remote service encodes points in time and time spans as whole seconds
//! plus a nanosecond remainder. These types follow the well-known protobuf
//! normalization rules so that equal instants always compare equal.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// A point in time, as seconds since the Unix epoch plus nanoseconds.
///
/// `nanos` is always in `0..1_000_000_000`; instants before the epoch carry a
/// negative `seconds` and a positive `nanos`.
///
/// # Example
///
/// ```
/// use armonik_api_rs::models::Timestamp;
/// use chrono::{TimeZone, Utc};
///
/// let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let ts = Timestamp::from(date);
/// assert_eq!(ts.seconds, 1_704_067_200);
/// assert_eq!(ts.nanos, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Timestamp {
    /// Whole seconds since 1970-01-01T00:00:00Z.
    pub seconds: i64,
    /// Sub-second remainder in nanoseconds.
    pub nanos: i32,
}

impl Timestamp {
    /// Creates a timestamp, normalizing `nanos` into `0..1e9`.
    pub fn new(seconds: i64, nanos: i64) -> Self {
        let seconds = seconds.saturating_add(nanos.div_euclid(NANOS_PER_SECOND));
        let nanos = nanos.rem_euclid(NANOS_PER_SECOND) as i32;
        Self { seconds, nanos }
    }

    /// Converts back to a `DateTime<Utc>`, if representable.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.seconds, self.nanos as u32).single()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self {
            seconds: value.timestamp(),
            nanos: value.timestamp_subsec_nanos() as i32,
        }
    }
}

/// A signed span of time, as seconds plus nanoseconds.
///
/// `seconds` and `nanos` always share the same sign (or one of them is zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Duration {
    /// Whole seconds of the span.
    pub seconds: i64,
    /// Sub-second remainder in nanoseconds, same sign as `seconds`.
    pub nanos: i32,
}

impl Duration {
    /// Creates a duration, carrying excess nanoseconds into seconds and
    /// aligning the signs of both parts.
    pub fn new(seconds: i64, nanos: i64) -> Self {
        let mut seconds = seconds.saturating_add(nanos / NANOS_PER_SECOND);
        let mut nanos = nanos % NANOS_PER_SECOND;
        if seconds > 0 && nanos < 0 {
            seconds -= 1;
            nanos += NANOS_PER_SECOND;
        } else if seconds < 0 && nanos > 0 {
            seconds += 1;
            nanos -= NANOS_PER_SECOND;
        }
        Self {
            seconds,
            nanos: nanos as i32,
        }
    }

    /// Creates a duration of whole seconds.
    pub fn from_secs(seconds: i64) -> Self {
        Self { seconds, nanos: 0 }
    }

    /// Returns the total span in nanoseconds.
    pub fn as_nanos(&self) -> i128 {
        i128::from(self.seconds) * i128::from(NANOS_PER_SECOND) + i128::from(self.nanos)
    }
}

impl From<TimeDelta> for Duration {
    fn from(value: TimeDelta) -> Self {
        Duration::new(value.num_seconds(), i64::from(value.subsec_nanos()))
    }
}

impl From<std::time::Duration> for Duration {
    fn from(value: std::time::Duration) -> Self {
        Self {
            seconds: i64::try_from(value.as_secs()).unwrap_or(i64::MAX),
            nanos: value.subsec_nanos() as i32,
        }
    }
}
