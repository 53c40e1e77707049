//! Availability resolution against a room's confirmed bookings.
//!
//! Takes the day's [`CandidateSlot`]s (or one exact proposed interval) plus
//! the confirmed bookings fetched for that room and day, and decides what is
//! actually free. Pure functions over their inputs: the booking set is
//! always an explicit argument, never a cached global, so each resolution
//! pass is independent and repeatable.

use chrono::{DateTime, NaiveDate, Utc};
use log::trace;
use serde::{Deserialize, Serialize};

use crate::booking::ConfirmedBooking;
use crate::interval::TimeInterval;
use crate::slots::{generate_slots, BusinessHours, CandidateSlot, SlotGrid};

/// Re-annotate each candidate slot against the booking set.
///
/// A slot comes out `available = true` iff no booking overlaps its
/// `[start, end)` span under the half-open rule. Output order equals input
/// order, and annotating twice with the same inputs yields identical output.
pub fn annotate_slots<I>(slots: I, bookings: &[ConfirmedBooking]) -> Vec<CandidateSlot>
where
    I: IntoIterator<Item = CandidateSlot>,
{
    let annotated: Vec<CandidateSlot> = slots
        .into_iter()
        .map(|slot| CandidateSlot {
            available: is_interval_free(&slot.interval, bookings),
            ..slot
        })
        .collect();
    trace!(
        "annotated {} slots against {} bookings, {} available",
        annotated.len(),
        bookings.len(),
        annotated.iter().filter(|s| s.available).count()
    );
    annotated
}

/// Whether the exact proposed interval overlaps no confirmed booking.
///
/// This is the check that must be re-run against freshly fetched bookings
/// immediately before persisting: the booking set rendered to the user goes
/// stale the moment a concurrent flow commits.
pub fn is_interval_free(interval: &TimeInterval, bookings: &[ConfirmedBooking]) -> bool {
    bookings.iter().all(|b| !interval.overlaps(&b.interval))
}

/// First bookable start time of the day, if any.
pub fn first_available_start(
    date: NaiveDate,
    hours: &BusinessHours,
    grid: SlotGrid,
    bookings: &[ConfirmedBooking],
) -> Option<DateTime<Utc>> {
    generate_slots(date, hours, grid)
        .find(|slot| is_interval_free(&slot.interval, bookings))
        .map(|slot| slot.start())
}

/// Instantaneous busy/free view of a room, as shown on the room grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomStatus {
    /// No confirmed booking contains this instant (half-open: a meeting
    /// ending right now leaves the room available).
    pub available_now: bool,
    /// Start of the next booking strictly after this instant.
    pub next_booking_start: Option<DateTime<Utc>>,
}

/// Compute the "Available Now / In Use" card for a room at `now`.
pub fn room_status(now: DateTime<Utc>, bookings: &[ConfirmedBooking]) -> RoomStatus {
    RoomStatus {
        available_now: bookings.iter().all(|b| !b.interval.contains(now)),
        next_booking_start: bookings
            .iter()
            .map(|b| b.interval.start())
            .filter(|&start| start > now)
            .min(),
    }
}
