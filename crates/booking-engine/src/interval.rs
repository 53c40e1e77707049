//! Half-open time intervals and the single authoritative overlap predicate.
//!
//! Every availability decision in this crate goes through
//! [`TimeInterval::overlaps`]. An interval occupies `[start, end)`: it
//! includes its start instant and excludes its end instant, so a meeting
//! ending at 10:00 and one starting at 10:00 share a boundary but never a
//! moment of room time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Result};

/// A half-open `[start, end)` span of room time.
///
/// `start < end` always holds: the only ways to obtain a `TimeInterval` are
/// the fallible constructors and deserialization, all of which reject
/// degenerate or inverted spans with [`BookingError::InvalidInterval`].
/// Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct TimeInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

/// Unvalidated wire shape; promoted to [`TimeInterval`] via `TryFrom`.
#[derive(Deserialize)]
struct RawInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawInterval> for TimeInterval {
    type Error = BookingError;

    fn try_from(raw: RawInterval) -> Result<Self> {
        TimeInterval::new(raw.start, raw.end)
    }
}

impl TimeInterval {
    /// Build an interval, rejecting `start >= end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start >= end {
            return Err(BookingError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Build the interval `[start, start + minutes)`.
    ///
    /// A zero-minute duration yields the degenerate `start == end` span and
    /// is rejected like any other invalid interval, as is a start so close
    /// to the end of representable time that the sum overflows.
    pub fn from_start_and_duration(start: DateTime<Utc>, minutes: u32) -> Result<Self> {
        let end = start
            .checked_add_signed(Duration::minutes(i64::from(minutes)))
            .ok_or(BookingError::InvalidInterval { start, end: start })?;
        Self::new(start, end)
    }

    /// Start of the interval (inclusive).
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// End of the interval (exclusive).
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Length of the interval in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// The one overlap rule: two intervals overlap iff
    /// `self.start < other.end && other.start < self.end`.
    ///
    /// This excludes the adjacent case where one interval ends exactly when
    /// the other starts.
    ///
    /// ```
    /// use booking_engine::TimeInterval;
    /// use chrono::{TimeZone, Utc};
    ///
    /// let nine = Utc.with_ymd_and_hms(2026, 3, 16, 9, 0, 0).unwrap();
    /// let ten = Utc.with_ymd_and_hms(2026, 3, 16, 10, 0, 0).unwrap();
    /// let eleven = Utc.with_ymd_and_hms(2026, 3, 16, 11, 0, 0).unwrap();
    ///
    /// let morning = TimeInterval::new(nine, ten).unwrap();
    /// let adjacent = TimeInterval::new(ten, eleven).unwrap();
    /// let straddling = TimeInterval::new(nine, eleven).unwrap();
    ///
    /// assert!(!morning.overlaps(&adjacent));
    /// assert!(morning.overlaps(&straddling));
    /// ```
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether `instant` falls inside the interval, per the half-open rule:
    /// the start instant is inside, the end instant is not.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}
