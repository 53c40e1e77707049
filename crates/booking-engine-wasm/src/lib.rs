//! WASM bindings for booking-engine.
//!
//! Exposes slot generation, duration enumeration, and interval validation to
//! the JavaScript booking UI via `wasm-bindgen`. All complex types are
//! passed as JSON strings with RFC 3339 datetimes.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p booking-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/booking-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/booking_engine_wasm.wasm
//! # Rename .js -> .cjs for ESM compatibility
//! mv packages/booking-engine-js/wasm/booking_engine_wasm.js \
//!    packages/booking-engine-js/wasm/booking_engine_wasm.cjs
//! ```

use booking_engine::availability::{annotate_slots, is_interval_free, room_status};
use booking_engine::durations::{available_durations_capped, DEFAULT_MAX_DURATION_HOURS};
use booking_engine::slots::{generate_slots, BusinessHours, CandidateSlot, SlotGrid};
use booking_engine::{ConfirmedBooking, DurationOption, RoomId, TimeInterval};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SlotDto {
    start: String,
    end: String,
    available: bool,
}

impl From<&CandidateSlot> for SlotDto {
    fn from(s: &CandidateSlot) -> Self {
        Self {
            start: s.start().to_rfc3339(),
            end: s.end().to_rfc3339(),
            available: s.available,
        }
    }
}

#[derive(Serialize)]
struct DurationOptionDto {
    minutes: u32,
    label: String,
    available: bool,
}

impl From<&DurationOption> for DurationOptionDto {
    fn from(o: &DurationOption) -> Self {
        Self {
            minutes: o.minutes,
            label: o.label.clone(),
            available: o.available,
        }
    }
}

#[derive(Serialize)]
struct RoomStatusDto {
    available_now: bool,
    next_booking_start: Option<String>,
}

/// Input format for confirmed bookings passed from JavaScript. The room id
/// is optional because callers fetch booking lists per room already.
#[derive(Deserialize)]
struct BookingInput {
    start: String,
    end: String,
    #[serde(default)]
    room_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers: parse datetimes, dates, zones, and booking lists
// ---------------------------------------------------------------------------

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts both RFC 3339 (with timezone offset, e.g., "2026-03-16T14:00:00+00:00")
/// and naive local time (e.g., "2026-03-16T14:00:00"), which is interpreted as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, JsValue> {
    // Try RFC 3339 first (has timezone info).
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    // Fall back to naive datetime interpreted as UTC.
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| JsValue::from_str(&format!("Invalid datetime '{}': {}", s, e)))
}

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", s, e)))
}

fn parse_timezone(s: &str) -> Result<Tz, JsValue> {
    s.parse::<Tz>()
        .map_err(|_| JsValue::from_str(&format!("Invalid timezone '{}'", s)))
}

/// Convert a JSON array of `{start, end}` booking objects into
/// `Vec<ConfirmedBooking>`.
fn parse_bookings_json(json: &str) -> Result<Vec<ConfirmedBooking>, JsValue> {
    let inputs: Vec<BookingInput> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid bookings JSON: {}", e)))?;

    inputs
        .into_iter()
        .map(|input| {
            let start = parse_datetime(&input.start)?;
            let end = parse_datetime(&input.end)?;
            let interval = TimeInterval::new(start, end)
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            Ok(ConfirmedBooking {
                room_id: RoomId(input.room_id.unwrap_or_default()),
                interval,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Generate the day's candidate slots, annotated against confirmed bookings.
///
/// Returns a JSON string containing an array of `{start, end, available}`
/// objects with RFC 3339 datetime strings, in chronological order.
///
/// # Arguments
/// - `date` -- Calendar date string (e.g., "2026-03-16")
/// - `bookings_json` -- JSON array of `{start, end}` confirmed bookings
/// - `timezone` -- IANA timezone the business day is anchored in (e.g.,
///   "America/New_York")
/// - `hourly` -- `true` for the coarse hourly grid, `false` for half-hour
#[wasm_bindgen(js_name = "generateAnnotatedSlots")]
pub fn generate_annotated_slots(
    date: &str,
    bookings_json: &str,
    timezone: &str,
    hourly: bool,
) -> Result<String, JsValue> {
    let date = parse_date(date)?;
    let bookings = parse_bookings_json(bookings_json)?;
    let hours = BusinessHours::standard(parse_timezone(timezone)?);
    let grid = if hourly {
        SlotGrid::Hourly
    } else {
        SlotGrid::HalfHour
    };

    let slots = annotate_slots(generate_slots(date, &hours, grid), &bookings);

    let dtos: Vec<SlotDto> = slots.iter().map(SlotDto::from).collect();
    serde_json::to_string(&dtos)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Enumerate the duration menu for a chosen start time.
///
/// Returns a JSON string containing an array of `{minutes, label, available}`
/// objects in catalog order.
///
/// # Arguments
/// - `start` -- Proposed start datetime (RFC 3339 or naive-as-UTC)
/// - `bookings_json` -- JSON array of `{start, end}` confirmed bookings
/// - `max_duration_hours` -- Optional cap; defaults to 8
#[wasm_bindgen(js_name = "availableDurations")]
pub fn available_durations(
    start: &str,
    bookings_json: &str,
    max_duration_hours: Option<u32>,
) -> Result<String, JsValue> {
    let start = parse_datetime(start)?;
    let bookings = parse_bookings_json(bookings_json)?;
    let cap = max_duration_hours.unwrap_or(DEFAULT_MAX_DURATION_HOURS);

    let options = available_durations_capped(start, &bookings, cap);

    let dtos: Vec<DurationOptionDto> = options.iter().map(DurationOptionDto::from).collect();
    serde_json::to_string(&dtos)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Check whether an exact proposed interval overlaps no confirmed booking.
///
/// This is the validation the UI must re-run against freshly fetched
/// bookings immediately before submitting. Returns a plain boolean.
#[wasm_bindgen(js_name = "isIntervalFree")]
pub fn interval_is_free(start: &str, end: &str, bookings_json: &str) -> Result<bool, JsValue> {
    let start = parse_datetime(start)?;
    let end = parse_datetime(end)?;
    let bookings = parse_bookings_json(bookings_json)?;

    let interval = TimeInterval::new(start, end).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(is_interval_free(&interval, &bookings))
}

/// Instantaneous busy/free view of a room for the room grid.
///
/// Returns a JSON string of `{available_now, next_booking_start}` where
/// `next_booking_start` is an RFC 3339 string or `null`.
#[wasm_bindgen(js_name = "roomStatus")]
pub fn room_status_now(now: &str, bookings_json: &str) -> Result<String, JsValue> {
    let now = parse_datetime(now)?;
    let bookings = parse_bookings_json(bookings_json)?;

    let status = room_status(now, &bookings);

    let dto = RoomStatusDto {
        available_now: status.available_now,
        next_booking_start: status.next_booking_start.map(|dt| dt.to_rfc3339()),
    };
    serde_json::to_string(&dto)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
