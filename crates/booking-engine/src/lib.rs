//! # booking-engine
//!
//! Room-availability and slot/duration resolution for meeting-room booking.
//!
//! Given a room, a calendar date, and that room's confirmed bookings, the
//! engine computes which start times are bookable, which fixed durations fit
//! from a chosen start, and whether an exact proposed interval is still
//! free. Every one of those decisions runs through the same half-open
//! overlap predicate, [`TimeInterval::overlaps`]. The engine is pure: it
//! performs no I/O and holds no ambient state, consuming bookings through
//! the [`RoomStore`] trait and explicit arguments only.
//!
//! ## Modules
//!
//! - [`interval`] — half-open `TimeInterval` and the one overlap predicate
//! - [`slots`] — candidate start times over the business day
//! - [`availability`] — slot annotation and exact-interval validation
//! - [`durations`] — the fixed duration catalog, enumerated per start time
//! - [`booking`] — identifiers, booking projections, the persist payload
//! - [`flow`] — the booking-flow state machine and submission leg
//! - [`store`] — the `RoomStore` boundary and in-memory reference store
//! - [`error`] — error types

pub mod availability;
pub mod booking;
pub mod durations;
pub mod error;
pub mod flow;
pub mod interval;
pub mod slots;
pub mod store;

pub use availability::{annotate_slots, is_interval_free};
pub use booking::{BookingRequest, ConfirmedBooking, MeetingDetails, RoomId, UserId};
pub use durations::{available_durations, available_durations_capped, DurationOption};
pub use error::{BookingError, Result, StoreError};
pub use flow::{submit_booking, BookingFlow, FlowState};
pub use interval::TimeInterval;
pub use slots::{generate_slots, BusinessHours, CandidateSlot, SlotGrid};
pub use store::{MemoryRoomStore, RoomStore};
