//! Row mapping between `SQLite` and domain records.
//!
//! Column order follows the `*_COLUMNS` constants in the schema module.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::Row;

use crate::codec::{non_blank, parse_date, parse_timestamp};
use crate::model::{Reservation, Restriction, Room, RoomRestriction, User};

fn date_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let value: String = row.get(idx)?;
    parse_date("date", &value)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn optional_text_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<String>> {
    let value: Option<String> = row.get(idx)?;
    Ok(non_blank(value.as_deref()).map(str::to_owned))
}

fn timestamp_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let value: String = row.get(idx)?;
    parse_timestamp("timestamp", &value)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Expects [`super::schema::ROOM_COLUMNS`].
pub(super) fn row_to_room(row: &Row<'_>) -> rusqlite::Result<Room> {
    Ok(Room {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        image_filename: optional_text_at(row, 3)?,
        created_at: timestamp_at(row, 4)?,
        updated_at: timestamp_at(row, 5)?,
    })
}

pub(super) fn row_to_restriction(row: &Row<'_>) -> rusqlite::Result<Restriction> {
    Ok(Restriction {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: timestamp_at(row, 2)?,
        updated_at: timestamp_at(row, 3)?,
    })
}

/// Expects [`super::schema::RESERVATION_COLUMNS`].
pub(super) fn row_to_reservation(row: &Row<'_>) -> rusqlite::Result<Reservation> {
    Ok(Reservation {
        id: row.get(0)?,
        code: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        email: row.get(4)?,
        phone: optional_text_at(row, 5)?,
        start_date: date_at(row, 6)?,
        end_date: date_at(row, 7)?,
        room_id: row.get(8)?,
        notes: optional_text_at(row, 9)?,
        created_at: timestamp_at(row, 10)?,
        updated_at: timestamp_at(row, 11)?,
    })
}

/// Expects [`super::schema::ROOM_RESTRICTION_COLUMNS`].
pub(super) fn row_to_room_restriction(row: &Row<'_>) -> rusqlite::Result<RoomRestriction> {
    Ok(RoomRestriction {
        id: row.get(0)?,
        start_date: date_at(row, 1)?,
        end_date: date_at(row, 2)?,
        room_id: row.get(3)?,
        reservation_id: row.get(4)?,
        restriction_id: row.get(5)?,
        created_at: timestamp_at(row, 6)?,
        updated_at: timestamp_at(row, 7)?,
    })
}

/// Expects [`super::schema::USER_COLUMNS`].
pub(super) fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
        password_hash: row.get(4)?,
        access_level: row.get(5)?,
        created_at: timestamp_at(row, 6)?,
        updated_at: timestamp_at(row, 7)?,
    })
}
