//! Shared test utilities for database unit tests.
//!
//! Each helper fails fast with a panic, which is what the callers want.

use chrono::NaiveDate;
use tempfile::{tempdir, TempDir};

use crate::codec::DATE_FORMAT;
use crate::context::RequestContext;
use crate::database::{Database, DatabaseConfig};
use crate::model::{
    CreateReservationParams, CreateRoomParams, CreateRoomRestrictionParams, RestrictionKind, Room,
};

/// Opens a fresh store in a temporary directory.
///
/// Keep the returned directory alive for as long as the store is used.
#[must_use]
pub fn test_database() -> (Database, TempDir) {
    let dir = tempdir().unwrap();
    let db = Database::open(DatabaseConfig::new(dir.path().join("test.db"))).unwrap();
    (db, dir)
}

/// Parses a `YYYY-MM-DD` literal.
#[must_use]
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
}

pub fn create_room(db: &Database, name: &str) -> Room {
    db.create_room(
        &RequestContext::default(),
        &CreateRoomParams {
            name: name.to_owned(),
            description: format!("{name} test room"),
            image_filename: None,
        },
    )
    .unwrap()
}

/// Places an owner block on `room_id` for `[start, end)`.
pub fn block_room(db: &Database, room_id: i64, start: &str, end: &str) {
    db.create_room_restriction(
        &RequestContext::default(),
        &CreateRoomRestrictionParams {
            start_date: date(start),
            end_date: date(end),
            room_id,
            reservation_id: None,
            restriction_id: RestrictionKind::OwnerBlock.id(),
        },
    )
    .unwrap();
}

#[must_use]
pub fn count_rows(db: &Database, table: &str) -> i64 {
    db.with_connection(&RequestContext::default(), |conn| {
        Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
            row.get(0)
        })?)
    })
    .unwrap()
}

/// Booking parameters for a guest named Ada Lovelace.
#[must_use]
pub fn reservation_params(room_id: i64, start: &str, end: &str, code: &str) -> CreateReservationParams {
    CreateReservationParams {
        code: code.to_owned(),
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: "ada@example.com".into(),
        phone: None,
        start_date: date(start),
        end_date: date(end),
        room_id,
        notes: Some("late arrival".into()),
    }
}
