//! Candidate start-time generation over the business day.
//!
//! Produces the ordered grid of bookable start times for one calendar date:
//! one candidate per 30-minute boundary between 08:00 and 18:00 by default,
//! or one per whole hour in the coarser view. Generation is deterministic
//! and lazy; the same inputs always yield the same finite sequence, and the
//! iterator can be cloned and replayed.
//!
//! Every produced slot starts out `available = true`. That is a default
//! pending resolution, not an answer: callers must run the output through
//! [`annotate_slots`] before showing it to anyone.
//!
//! [`annotate_slots`]: crate::availability::annotate_slots

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::interval::TimeInterval;

/// Business-day boundaries, anchored in the site's local time zone.
///
/// The zone is explicit configuration, never read from the host machine.
/// `open` is inclusive, `close` exclusive: with the standard 08:00 to 18:00
/// day the last half-hour candidate starts at 17:30.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessHours {
    open: NaiveTime,
    close: NaiveTime,
    timezone: Tz,
}

impl BusinessHours {
    /// Custom business hours. Returns `None` when `open >= close`.
    pub fn new(open: NaiveTime, close: NaiveTime, timezone: Tz) -> Option<Self> {
        if open >= close {
            return None;
        }
        Some(Self {
            open,
            close,
            timezone,
        })
    }

    /// The standard business day: 08:00 to 18:00 in the given zone.
    pub fn standard(timezone: Tz) -> Self {
        Self {
            open: NaiveTime::from_hms_opt(8, 0, 0).expect("08:00 is a valid wall time"),
            close: NaiveTime::from_hms_opt(18, 0, 0).expect("18:00 is a valid wall time"),
            timezone,
        }
    }

    /// Opening wall time (first bookable instant).
    pub fn open(&self) -> NaiveTime {
        self.open
    }

    /// Closing wall time (exclusive).
    pub fn close(&self) -> NaiveTime {
        self.close
    }

    /// The site zone used to anchor wall times to instants.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self::standard(Tz::UTC)
    }
}

/// Spacing of candidate start times within the business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SlotGrid {
    /// One candidate per 30-minute boundary — the booking picker's grid.
    #[default]
    HalfHour,
    /// One candidate per whole hour, each paired with the fixed 60-minute
    /// comparison duration — the coarse availability view.
    Hourly,
}

impl SlotGrid {
    /// Grid spacing in minutes; also the span a candidate is checked
    /// against when annotating availability.
    pub fn interval_minutes(self) -> u32 {
        match self {
            SlotGrid::HalfHour => 30,
            SlotGrid::Hourly => 60,
        }
    }
}

/// A potential start time produced by the generator, spanning one grid
/// interval, with its computed (never persisted) availability flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSlot {
    #[serde(flatten)]
    pub interval: TimeInterval,
    pub available: bool,
}

impl CandidateSlot {
    /// Start of the candidate span (the offered start time).
    pub fn start(&self) -> DateTime<Utc> {
        self.interval.start()
    }

    /// End of the candidate span (`start + grid interval`, exclusive).
    pub fn end(&self) -> DateTime<Utc> {
        self.interval.end()
    }
}

/// Generate the ordered candidate start times for one calendar date.
///
/// For the standard 08:00–18:00 day this yields 20 candidates on the
/// half-hour grid (08:00, 08:30, …, 17:30) and 10 on the hourly grid
/// (08:00, …, 17:00). Candidates come out in chronological order with
/// `available = true`; invalid dates are a caller contract violation, not
/// handled here.
///
/// A wall time swallowed by a spring-forward DST gap has no instant to
/// offer and is skipped; an ambiguous fall-back wall time resolves to its
/// earlier instant.
pub fn generate_slots(date: NaiveDate, hours: &BusinessHours, grid: SlotGrid) -> Slots {
    let span_minutes = (hours.close - hours.open).num_minutes();
    let step_minutes = grid.interval_minutes();
    Slots {
        date,
        hours: *hours,
        step_minutes,
        cursor: 0,
        total: (span_minutes / i64::from(step_minutes)) as u32,
    }
}

/// Lazy, restartable iterator over one day's [`CandidateSlot`]s.
///
/// Cloning restarts the sequence from the beginning; exhaustion is final.
#[derive(Debug, Clone)]
pub struct Slots {
    date: NaiveDate,
    hours: BusinessHours,
    step_minutes: u32,
    cursor: u32,
    total: u32,
}

impl Iterator for Slots {
    type Item = CandidateSlot;

    fn next(&mut self) -> Option<CandidateSlot> {
        while self.cursor < self.total {
            let offset = Duration::minutes(i64::from(self.cursor * self.step_minutes));
            self.cursor += 1;

            let wall_start = self.date.and_time(self.hours.open) + offset;
            let wall_end = wall_start + Duration::minutes(i64::from(self.step_minutes));

            let tz = self.hours.timezone;
            let (start, end) = match (resolve_wall_clock(tz, wall_start), resolve_wall_clock(tz, wall_end)) {
                (Some(start), Some(end)) => (start, end),
                // Gap day: this wall time never happens on the site clock.
                _ => continue,
            };

            match TimeInterval::new(start, end) {
                Ok(interval) => {
                    return Some(CandidateSlot {
                        interval,
                        available: true,
                    })
                }
                // A transition collapsed the span; nothing to offer here.
                Err(_) => continue,
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Gap days may skip candidates, so only the upper bound is exact.
        (0, Some((self.total - self.cursor) as usize))
    }
}

impl std::iter::FusedIterator for Slots {}

/// The local-midnight-anchored day boundaries for `date` in `tz`, as used by
/// store queries ("confirmed bookings intersecting this calendar day").
///
/// When midnight itself falls in a DST gap the boundary shifts forward to
/// the first wall time that exists. Returns `None` for dates at the edge of
/// the representable calendar, and for dates a zone transition skipped
/// entirely (Samoa never had a 2011-12-30).
pub fn day_window(date: NaiveDate, tz: Tz) -> Option<TimeInterval> {
    let start = first_valid_instant(date.and_hms_opt(0, 0, 0)?, tz)?;
    let end = first_valid_instant(date.succ_opt()?.and_hms_opt(0, 0, 0)?, tz)?;
    TimeInterval::new(start, end).ok()
}

/// Resolve a wall-clock time to an instant: `None` inside a DST gap, the
/// earlier instant when the wall time occurs twice.
fn resolve_wall_clock(tz: Tz, wall: NaiveDateTime) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&wall) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earlier, _) => Some(earlier.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

/// First existing instant at or after `wall`, probing past transition gaps
/// in 30-minute steps up to 25 hours (enough for ordinary DST gaps and for
/// zones that skipped a whole calendar day crossing the date line).
fn first_valid_instant(wall: NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    (0..=50).find_map(|i| resolve_wall_clock(tz, wall + Duration::minutes(30 * i)))
}
