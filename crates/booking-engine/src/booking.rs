//! Store-facing booking types.
//!
//! The engine reads [`ConfirmedBooking`] projections supplied by the
//! external room store and hands back [`BookingRequest`] payloads for it to
//! persist. Identifiers are opaque, but they carry distinct types so a room
//! id cannot be passed where a user id belongs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::interval::TimeInterval;

/// Opaque identifier of a meeting room, assigned by the external store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

/// Opaque identifier of the booking user, assigned by the external store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl RoomId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Read-only projection of a persisted reservation in the "confirmed" state.
///
/// Materialized per (room, calendar day) query and discarded after the
/// resolution pass; the engine never mutates or caches it. Two confirmed
/// bookings for the same room must never overlap in a consistent store;
/// upholding that is the store's transactional job, not the engine's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmedBooking {
    pub room_id: RoomId,
    pub interval: TimeInterval,
}

/// User-entered meeting details, forwarded opaquely to the store on persist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingDetails {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Attendee email addresses; notification delivery is the caller's job.
    #[serde(default)]
    pub attendees: Vec<String>,
}

/// The payload handed to [`RoomStore::persist_booking`].
///
/// Built only after the proposed interval passed the pre-submission
/// re-check; see [`submit_booking`].
///
/// [`RoomStore::persist_booking`]: crate::store::RoomStore::persist_booking
/// [`submit_booking`]: crate::flow::submit_booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub room_id: RoomId,
    pub user_id: UserId,
    pub interval: TimeInterval,
    pub details: MeetingDetails,
}
