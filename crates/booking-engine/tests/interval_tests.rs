//! Tests for the half-open interval type and the one overlap predicate.

use booking_engine::slots::CandidateSlot;
use booking_engine::{BookingError, TimeInterval};
use chrono::{DateTime, TimeZone, Utc};

fn at(h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, h, min, 0).unwrap()
}

fn interval(start_h: u32, start_min: u32, end_h: u32, end_min: u32) -> TimeInterval {
    TimeInterval::new(at(start_h, start_min), at(end_h, end_min)).unwrap()
}

#[test]
fn constructor_rejects_inverted_and_empty_spans() {
    assert!(matches!(
        TimeInterval::new(at(10, 0), at(9, 0)),
        Err(BookingError::InvalidInterval { .. })
    ));
    assert!(matches!(
        TimeInterval::new(at(10, 0), at(10, 0)),
        Err(BookingError::InvalidInterval { .. })
    ));
}

#[test]
fn duration_constructor_builds_the_expected_span() {
    let interval = TimeInterval::from_start_and_duration(at(9, 0), 90).unwrap();

    assert_eq!(interval.start(), at(9, 0));
    assert_eq!(interval.end(), at(10, 30));
    assert_eq!(interval.duration_minutes(), 90);

    assert!(TimeInterval::from_start_and_duration(at(9, 0), 0).is_err());
}

#[test]
fn overlap_truth_table() {
    let base = interval(10, 0, 11, 0);

    // Partial overlap from either side.
    assert!(base.overlaps(&interval(9, 30, 10, 30)));
    assert!(base.overlaps(&interval(10, 30, 11, 30)));
    // Containment in both directions, and the identical span.
    assert!(base.overlaps(&interval(10, 15, 10, 45)));
    assert!(base.overlaps(&interval(9, 0, 12, 0)));
    assert!(base.overlaps(&interval(10, 0, 11, 0)));
    // Disjoint.
    assert!(!base.overlaps(&interval(8, 0, 9, 0)));
    assert!(!base.overlaps(&interval(11, 30, 12, 0)));
    // Adjacent at both boundaries: shared endpoint, no shared moment.
    assert!(!base.overlaps(&interval(9, 0, 10, 0)));
    assert!(!base.overlaps(&interval(11, 0, 12, 0)));
}

#[test]
fn overlap_is_symmetric() {
    let a = interval(10, 0, 11, 0);
    let b = interval(10, 30, 11, 30);
    let c = interval(11, 0, 12, 0);

    assert_eq!(a.overlaps(&b), b.overlaps(&a));
    assert_eq!(a.overlaps(&c), c.overlaps(&a));
}

#[test]
fn contains_includes_start_and_excludes_end() {
    let base = interval(10, 0, 11, 0);

    assert!(base.contains(at(10, 0)));
    assert!(base.contains(at(10, 59)));
    assert!(!base.contains(at(11, 0)));
    assert!(!base.contains(at(9, 59)));
}

#[test]
fn deserialization_enforces_the_invariant() {
    let ok: TimeInterval = serde_json::from_str(
        r#"{"start":"2026-03-16T09:00:00Z","end":"2026-03-16T10:00:00Z"}"#,
    )
    .unwrap();
    assert_eq!(ok, interval(9, 0, 10, 0));

    let inverted = serde_json::from_str::<TimeInterval>(
        r#"{"start":"2026-03-16T10:00:00Z","end":"2026-03-16T09:00:00Z"}"#,
    );
    assert!(inverted.is_err());
}

#[test]
fn candidate_slot_serializes_flat() {
    let slot = CandidateSlot {
        interval: interval(9, 0, 9, 30),
        available: true,
    };

    let value = serde_json::to_value(slot).unwrap();

    // The interval flattens into the slot object; no nested "interval" key.
    assert!(value.get("start").is_some());
    assert!(value.get("end").is_some());
    assert!(value.get("interval").is_none());
    assert_eq!(value["available"], serde_json::Value::Bool(true));

    let back: CandidateSlot = serde_json::from_value(value).unwrap();
    assert_eq!(back, slot);
}
