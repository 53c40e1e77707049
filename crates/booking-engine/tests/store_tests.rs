//! Tests for the in-memory reference store's fetch and persist contract.

use booking_engine::store::{MemoryRoomStore, RoomStore};
use booking_engine::{
    BookingRequest, ConfirmedBooking, MeetingDetails, RoomId, StoreError, TimeInterval, UserId,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn booking(room: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> ConfirmedBooking {
    ConfirmedBooking {
        room_id: RoomId::from(room),
        interval: TimeInterval::new(start, end).unwrap(),
    }
}

fn request(room: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> BookingRequest {
    BookingRequest {
        room_id: RoomId::from(room),
        user_id: UserId::from("u-42"),
        interval: TimeInterval::new(start, end).unwrap(),
        details: MeetingDetails::default(),
    }
}

#[test]
fn fetch_filters_by_room() {
    let store = MemoryRoomStore::with_bookings(
        Tz::UTC,
        vec![
            booking("conf-a", utc(2026, 3, 16, 9, 0), utc(2026, 3, 16, 10, 0)),
            booking("conf-b", utc(2026, 3, 16, 9, 0), utc(2026, 3, 16, 10, 0)),
        ],
    );

    let fetched = store
        .fetch_confirmed_bookings(&RoomId::from("conf-a"), date(2026, 3, 16))
        .unwrap();

    assert_eq!(fetched.len(), 1);
    assert_eq!(fetched[0].room_id, RoomId::from("conf-a"));
}

#[test]
fn fetch_is_scoped_to_the_day() {
    let store = MemoryRoomStore::with_bookings(
        Tz::UTC,
        vec![
            booking("conf-a", utc(2026, 3, 15, 9, 0), utc(2026, 3, 15, 10, 0)),
            booking("conf-a", utc(2026, 3, 16, 9, 0), utc(2026, 3, 16, 10, 0)),
            booking("conf-a", utc(2026, 3, 17, 9, 0), utc(2026, 3, 17, 10, 0)),
        ],
    );

    let fetched = store
        .fetch_confirmed_bookings(&RoomId::from("conf-a"), date(2026, 3, 16))
        .unwrap();

    assert_eq!(fetched.len(), 1);
    assert_eq!(fetched[0].interval.start(), utc(2026, 3, 16, 9, 0));
}

#[test]
fn booking_straddling_midnight_appears_on_both_days() {
    let overnight = booking("conf-a", utc(2026, 3, 16, 23, 0), utc(2026, 3, 17, 1, 0));
    let store = MemoryRoomStore::with_bookings(Tz::UTC, vec![overnight]);
    let room = RoomId::from("conf-a");

    assert_eq!(
        store
            .fetch_confirmed_bookings(&room, date(2026, 3, 16))
            .unwrap()
            .len(),
        1
    );
    assert_eq!(
        store
            .fetch_confirmed_bookings(&room, date(2026, 3, 17))
            .unwrap()
            .len(),
        1
    );
    assert!(store
        .fetch_confirmed_bookings(&room, date(2026, 3, 18))
        .unwrap()
        .is_empty());
}

#[test]
fn day_boundaries_follow_the_store_zone() {
    // 23:00-24:00 New York wall time on March 16th is 03:00-04:00 UTC on the
    // 17th; a New York store files it under the 16th only.
    let late_evening = booking("conf-a", utc(2026, 3, 17, 3, 0), utc(2026, 3, 17, 4, 0));
    let store = MemoryRoomStore::with_bookings(Tz::America__New_York, vec![late_evening]);
    let room = RoomId::from("conf-a");

    assert_eq!(
        store
            .fetch_confirmed_bookings(&room, date(2026, 3, 16))
            .unwrap()
            .len(),
        1
    );
    assert!(store
        .fetch_confirmed_bookings(&room, date(2026, 3, 17))
        .unwrap()
        .is_empty());
}

#[test]
fn persisted_booking_is_immediately_fetchable() {
    let store = MemoryRoomStore::new(Tz::UTC);

    let confirmed = store
        .persist_booking(&request(
            "conf-a",
            utc(2026, 3, 16, 9, 0),
            utc(2026, 3, 16, 10, 0),
        ))
        .unwrap();

    let fetched = store
        .fetch_confirmed_bookings(&RoomId::from("conf-a"), date(2026, 3, 16))
        .unwrap();
    assert_eq!(fetched, vec![confirmed]);
}

#[test]
fn persist_rejects_overlap_in_the_same_room() {
    let store = MemoryRoomStore::new(Tz::UTC);
    store
        .persist_booking(&request(
            "conf-a",
            utc(2026, 3, 16, 9, 0),
            utc(2026, 3, 16, 10, 0),
        ))
        .unwrap();

    let err = store
        .persist_booking(&request(
            "conf-a",
            utc(2026, 3, 16, 9, 30),
            utc(2026, 3, 16, 10, 30),
        ))
        .unwrap_err();

    assert!(matches!(err, StoreError::Conflict));
    assert_eq!(store.all_bookings().unwrap().len(), 1);
}

#[test]
fn persist_allows_adjacent_and_other_room_intervals() {
    let store = MemoryRoomStore::new(Tz::UTC);
    let nine = utc(2026, 3, 16, 9, 0);
    let ten = utc(2026, 3, 16, 10, 0);
    let eleven = utc(2026, 3, 16, 11, 0);

    store.persist_booking(&request("conf-a", nine, ten)).unwrap();
    // Back to back in the same room, same hour in a different room.
    store.persist_booking(&request("conf-a", ten, eleven)).unwrap();
    store.persist_booking(&request("conf-b", nine, ten)).unwrap();

    assert_eq!(store.all_bookings().unwrap().len(), 3);
}
