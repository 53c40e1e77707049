//! Error types for booking-engine operations.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Failures at the external room-store boundary.
///
/// The engine never retries these; retry policy belongs to the caller.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store's own non-overlap constraint rejected the write. This is
    /// the backstop behind the engine's optimistic re-check: two flows can
    /// both pass the local check and race to persist.
    #[error("store rejected booking: interval overlaps an existing reservation")]
    Conflict,

    /// Opaque transport or backend failure, propagated as-is.
    #[error("room store unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by the engine's contracts and the booking flow.
#[derive(Error, Debug)]
pub enum BookingError {
    /// `start >= end` reached a constructor. Rejected before any overlap
    /// computation runs; a caller bug, never retried.
    #[error("invalid interval: start {start} is not before end {end}")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// The proposed interval overlaps a confirmed booking. At pre-submission
    /// re-check time this means "time no longer available, choose again":
    /// the booking flow returns to choosing a start time.
    #[error("time no longer available: {start}..{end} overlaps a confirmed booking")]
    Conflict {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// A flow method was invoked from the wrong state. A caller bug, kept as
    /// a typed error so library users never see a panic.
    #[error("invalid booking-flow transition: cannot {action} while {state}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },

    /// Propagated opaquely from a fetch/persist round trip.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience alias used throughout booking-engine.
pub type Result<T> = std::result::Result<T, BookingError>;
