//! The external room-store boundary.
//!
//! The engine performs no I/O of its own: it consumes one read operation
//! ("confirmed bookings for this room and day") and produces one write
//! request, both behind the [`RoomStore`] trait. The trait is synchronous
//! like the rest of the engine; async adapters belong to the surrounding
//! application.

use std::sync::Mutex;

use chrono::NaiveDate;
use chrono_tz::Tz;
use log::debug;

use crate::booking::{BookingRequest, ConfirmedBooking, RoomId};
use crate::error::StoreError;
use crate::slots::day_window;

/// Data access the engine requires from the reservation backend.
pub trait RoomStore {
    /// Confirmed bookings for `room` whose interval intersects the given
    /// calendar day (local midnight to next midnight, per
    /// [`day_window`](crate::slots::day_window)). Cancelled or pending
    /// reservations must not appear.
    fn fetch_confirmed_bookings(
        &self,
        room: &RoomId,
        date: NaiveDate,
    ) -> Result<Vec<ConfirmedBooking>, StoreError>;

    /// Persist a booking whose interval already passed the pre-submission
    /// re-check. The store should enforce its own non-overlap constraint and
    /// answer [`StoreError::Conflict`] when two racing flows both passed the
    /// local check.
    fn persist_booking(&self, request: &BookingRequest)
        -> Result<ConfirmedBooking, StoreError>;
}

/// In-memory [`RoomStore`] for tests, examples, and development.
///
/// Serializes persists behind a mutex and re-checks overlap per room inside
/// the critical section, which is exactly the exclusion guarantee the engine
/// assumes real backends provide transactionally. Retains only the
/// availability projection of each booking; titles and attendees are
/// accepted and dropped.
#[derive(Debug)]
pub struct MemoryRoomStore {
    timezone: Tz,
    bookings: Mutex<Vec<ConfirmedBooking>>,
}

impl MemoryRoomStore {
    /// Empty store whose day boundaries are computed in `timezone`.
    pub fn new(timezone: Tz) -> Self {
        Self {
            timezone,
            bookings: Mutex::new(Vec::new()),
        }
    }

    /// Store pre-seeded with existing confirmed bookings.
    pub fn with_bookings(timezone: Tz, bookings: Vec<ConfirmedBooking>) -> Self {
        Self {
            timezone,
            bookings: Mutex::new(bookings),
        }
    }

    /// Snapshot of every booking currently held, across all rooms.
    pub fn all_bookings(&self) -> Result<Vec<ConfirmedBooking>, StoreError> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<ConfirmedBooking>>, StoreError> {
        self.bookings
            .lock()
            .map_err(|_| StoreError::Unavailable("booking list lock poisoned".to_string()))
    }
}

impl RoomStore for MemoryRoomStore {
    fn fetch_confirmed_bookings(
        &self,
        room: &RoomId,
        date: NaiveDate,
    ) -> Result<Vec<ConfirmedBooking>, StoreError> {
        // Dates outside the representable calendar have no window and
        // therefore no bookings.
        let Some(window) = day_window(date, self.timezone) else {
            return Ok(Vec::new());
        };
        let bookings = self.lock()?;
        Ok(bookings
            .iter()
            .filter(|b| b.room_id == *room && b.interval.overlaps(&window))
            .cloned()
            .collect())
    }

    fn persist_booking(
        &self,
        request: &BookingRequest,
    ) -> Result<ConfirmedBooking, StoreError> {
        let mut bookings = self.lock()?;
        let taken = bookings
            .iter()
            .any(|b| b.room_id == request.room_id && b.interval.overlaps(&request.interval));
        if taken {
            debug!(
                "store rejected {}..{} for room {}: overlap inside critical section",
                request.interval.start(),
                request.interval.end(),
                request.room_id
            );
            return Err(StoreError::Conflict);
        }
        let confirmed = ConfirmedBooking {
            room_id: request.room_id.clone(),
            interval: request.interval,
        };
        bookings.push(confirmed.clone());
        debug!(
            "persisted {}..{} for room {}",
            confirmed.interval.start(),
            confirmed.interval.end(),
            confirmed.room_id
        );
        Ok(confirmed)
    }
}
