//! The fixed duration catalog and per-start duration enumeration.
//!
//! Once a start time is chosen, the booking flow offers a fixed menu of
//! meeting lengths. Every catalog entry at or under the cap is returned on
//! every call, each annotated with whether the interval it would produce is
//! still free; unavailable lengths stay visible (greyed out in the UI)
//! rather than disappearing from the menu.

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::availability::is_interval_free;
use crate::booking::ConfirmedBooking;
use crate::interval::TimeInterval;

/// Offerable meeting lengths in minutes, in the order the menu presents them.
pub const DURATION_CATALOG: [u32; 12] =
    [30, 45, 60, 90, 120, 150, 180, 240, 300, 360, 420, 480];

/// Default cap on offered durations, in hours.
pub const DEFAULT_MAX_DURATION_HOURS: u32 = 8;

/// One entry of the duration menu for a chosen start time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationOption {
    pub minutes: u32,
    /// Display label, e.g. `"45 minutes"`, `"1 hour"`, `"2.5 hours"`.
    pub label: String,
    /// Whether `[start, start + minutes)` overlaps no confirmed booking.
    pub available: bool,
}

/// Display label for a catalog duration. Fractional lengths in the catalog
/// are all half hours.
pub fn duration_label(minutes: u32) -> String {
    if minutes < 60 {
        format!("{minutes} minutes")
    } else if minutes % 60 == 0 {
        let hours = minutes / 60;
        if hours == 1 {
            "1 hour".to_owned()
        } else {
            format!("{hours} hours")
        }
    } else {
        format!("{}.5 hours", minutes / 60)
    }
}

/// Enumerate the duration menu for `start` with the default 8 hour cap.
pub fn available_durations(
    start: DateTime<Utc>,
    bookings: &[ConfirmedBooking],
) -> Vec<DurationOption> {
    available_durations_capped(start, bookings, DEFAULT_MAX_DURATION_HOURS)
}

/// Enumerate the duration menu for `start`, keeping catalog entries up to
/// `max_duration_hours` and annotating each against the booking set.
///
/// Catalog order is preserved; no reordering by availability.
pub fn available_durations_capped(
    start: DateTime<Utc>,
    bookings: &[ConfirmedBooking],
    max_duration_hours: u32,
) -> Vec<DurationOption> {
    let cap_minutes = max_duration_hours.saturating_mul(60);
    let options: Vec<DurationOption> = DURATION_CATALOG
        .iter()
        .copied()
        .filter(|&minutes| minutes <= cap_minutes)
        .map(|minutes| {
            let available = match TimeInterval::from_start_and_duration(start, minutes) {
                Ok(proposed) => is_interval_free(&proposed, bookings),
                // Start so late the end is unrepresentable; nothing to offer.
                Err(_) => false,
            };
            DurationOption {
                minutes,
                label: duration_label(minutes),
                available,
            }
        })
        .collect();
    debug!(
        "{} of {} duration options from {} are available",
        options.iter().filter(|o| o.available).count(),
        options.len(),
        start
    );
    options
}
