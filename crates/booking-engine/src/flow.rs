//! The booking flow: start time, duration, confirmation, submission.
//!
//! [`BookingFlow`] drives one booking attempt for a fixed room, user, and
//! date, all explicit parameters rather than ambient session state. The
//! machine itself is pure (every transition takes its booking set as an
//! argument); only [`submit_booking`] composes it with a [`RoomStore`].
//!
//! Between rendering choices and persisting, a concurrent flow may commit an
//! overlapping booking. [`BookingFlow::confirm`] therefore re-validates the
//! proposed interval against a freshly fetched set, never the one used to
//! render; a conflict there sends the user back to the start of the flow.
//! The window is narrowed, not closed; the store's own non-overlap
//! constraint is the final word.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use log::{debug, info};

use crate::availability::is_interval_free;
use crate::booking::{BookingRequest, ConfirmedBooking, MeetingDetails, RoomId, UserId};
use crate::durations::{available_durations_capped, DurationOption};
use crate::error::{BookingError, Result, StoreError};
use crate::interval::TimeInterval;
use crate::store::RoomStore;

/// Where a [`BookingFlow`] currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    /// Waiting for a start time to be chosen.
    ChoosingStart,
    /// A start time is fixed; its duration menu has been computed.
    ChoosingDuration {
        start: DateTime<Utc>,
        options: Vec<DurationOption>,
    },
    /// An exact interval is proposed, pending the fresh-data re-check.
    ConfirmingInterval { interval: TimeInterval },
    /// The re-check passed; the interval is on its way to the store.
    SubmittingBooking { interval: TimeInterval },
}

impl FlowState {
    fn name(&self) -> &'static str {
        match self {
            FlowState::ChoosingStart => "choosing a start time",
            FlowState::ChoosingDuration { .. } => "choosing a duration",
            FlowState::ConfirmingInterval { .. } => "confirming the interval",
            FlowState::SubmittingBooking { .. } => "submitting the booking",
        }
    }
}

/// One booking attempt for a fixed `(room, user, date)`.
#[derive(Debug, Clone)]
pub struct BookingFlow {
    room_id: RoomId,
    user_id: UserId,
    date: NaiveDate,
    state: FlowState,
}

impl BookingFlow {
    /// Start a flow in [`FlowState::ChoosingStart`].
    pub fn new(room_id: RoomId, user_id: UserId, date: NaiveDate) -> Self {
        Self {
            room_id,
            user_id,
            date,
            state: FlowState::ChoosingStart,
        }
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Current machine state.
    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// Abandon the attempt and return to choosing a start time.
    pub fn reset(&mut self) {
        self.state = FlowState::ChoosingStart;
    }

    /// Fix the start time and compute its duration menu against `bookings`
    /// (the set rendered to the user; staleness is caught later by
    /// [`confirm`](Self::confirm)).
    ///
    /// Legal while choosing a start or re-choosing over an earlier menu.
    pub fn choose_start(
        &mut self,
        start: DateTime<Utc>,
        bookings: &[ConfirmedBooking],
        max_duration_hours: u32,
    ) -> Result<Vec<DurationOption>> {
        match self.state {
            FlowState::ChoosingStart | FlowState::ChoosingDuration { .. } => {}
            _ => return Err(self.invalid("choose a start time")),
        }
        let options = available_durations_capped(start, bookings, max_duration_hours);
        debug!(
            "flow for room {} fixed start {start}, {} duration options",
            self.room_id,
            options.len()
        );
        self.state = FlowState::ChoosingDuration {
            start,
            options: options.clone(),
        };
        Ok(options)
    }

    /// Pick one of the offered durations, producing the exact proposed
    /// interval. A duration the menu marked unavailable, or one not on the
    /// menu at all, is a [`BookingError::Conflict`].
    pub fn choose_duration(&mut self, minutes: u32) -> Result<TimeInterval> {
        let (start, available) = match &self.state {
            FlowState::ChoosingDuration { start, options } => (
                *start,
                options
                    .iter()
                    .any(|o| o.minutes == minutes && o.available),
            ),
            _ => return Err(self.invalid("choose a duration")),
        };
        if !available {
            let end = start
                .checked_add_signed(Duration::minutes(i64::from(minutes)))
                .unwrap_or(start);
            return Err(BookingError::Conflict { start, end });
        }
        let interval = TimeInterval::from_start_and_duration(start, minutes)?;
        self.state = FlowState::ConfirmingInterval { interval };
        Ok(interval)
    }

    /// Re-validate the proposed interval against `fresh_bookings`, a set
    /// fetched after the user finished choosing, never the one the choices
    /// were rendered from.
    ///
    /// On success the machine moves to [`FlowState::SubmittingBooking`]; on
    /// conflict it returns to [`FlowState::ChoosingStart`] and the caller
    /// shows "time no longer available". Also legal while submitting, so a
    /// retry after a transport failure re-runs the re-check.
    pub fn confirm(&mut self, fresh_bookings: &[ConfirmedBooking]) -> Result<TimeInterval> {
        let interval = match &self.state {
            FlowState::ConfirmingInterval { interval }
            | FlowState::SubmittingBooking { interval } => *interval,
            _ => return Err(self.invalid("confirm the interval")),
        };
        if is_interval_free(&interval, fresh_bookings) {
            self.state = FlowState::SubmittingBooking { interval };
            Ok(interval)
        } else {
            info!(
                "room {} lost {}..{} to a concurrent booking, returning to start",
                self.room_id,
                interval.start(),
                interval.end()
            );
            self.state = FlowState::ChoosingStart;
            Err(BookingError::Conflict {
                start: interval.start(),
                end: interval.end(),
            })
        }
    }

    fn invalid(&self, action: &'static str) -> BookingError {
        BookingError::InvalidTransition {
            state: self.state.name(),
            action,
        }
    }
}

/// Run the submission leg of a flow: fetch a fresh booking set, re-check the
/// proposed interval, and persist it with the user's meeting details.
///
/// The one place the flow touches I/O. A conflict from either the re-check
/// or the store's own constraint resets the flow to choosing a start time;
/// a transport failure leaves the state untouched so the caller may retry.
/// After a successful persist the flow is back at the start, ready for
/// another attempt on the same room and date.
pub fn submit_booking<S: RoomStore>(
    store: &S,
    flow: &mut BookingFlow,
    details: &MeetingDetails,
) -> Result<ConfirmedBooking> {
    if !matches!(
        flow.state,
        FlowState::ConfirmingInterval { .. } | FlowState::SubmittingBooking { .. }
    ) {
        return Err(flow.invalid("submit the booking"));
    }
    let fresh = store.fetch_confirmed_bookings(&flow.room_id, flow.date)?;
    let interval = flow.confirm(&fresh)?;
    let request = BookingRequest {
        room_id: flow.room_id.clone(),
        user_id: flow.user_id.clone(),
        interval,
        details: details.clone(),
    };
    match store.persist_booking(&request) {
        Ok(confirmed) => {
            debug!(
                "room {} confirmed {}..{} for user {}",
                confirmed.room_id,
                interval.start(),
                interval.end(),
                flow.user_id
            );
            flow.state = FlowState::ChoosingStart;
            Ok(confirmed)
        }
        Err(err) => {
            if matches!(err, StoreError::Conflict) {
                info!(
                    "store constraint rejected {}..{} for room {}, returning to start",
                    interval.start(),
                    interval.end(),
                    flow.room_id
                );
                flow.state = FlowState::ChoosingStart;
            }
            Err(err.into())
        }
    }
}
