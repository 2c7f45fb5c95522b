//! Availability queries against the restriction calendar.
//!
//! A room is free for `[start, end)` when none of its blocks `[a, b)`
//! satisfies `a < end AND start < b`. These queries only read.

use rusqlite::{params, Connection};

use crate::codec::format_date;
use crate::context::RequestContext;
use crate::error::Result;
use crate::model::{CheckRoomAvailabilityParams, ListAvailableRoomsParams, Room};

use super::connection::Database;
use super::rows::row_to_room;
use super::schema::{COUNT_OVERLAPPING_RESTRICTIONS, SELECT_AVAILABLE_ROOMS};

impl Database {
    /// Returns true iff no block on the room overlaps the requested range.
    ///
    /// The range is assumed to be a forward interval; callers validate it
    /// first.
    ///
    /// # Errors
    ///
    /// Returns a connectivity error on timeout or cancellation, or a
    /// database error if the query fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bookings::database::{Database, DatabaseConfig};
    /// use bookings::{CheckRoomAvailabilityParams, RequestContext};
    /// use chrono::NaiveDate;
    ///
    /// let db = Database::open(DatabaseConfig::new("/tmp/bookings.db")).unwrap();
    /// let params = CheckRoomAvailabilityParams {
    ///     room_id: 1,
    ///     start_date: NaiveDate::from_ymd_opt(2024, 5, 8).unwrap(),
    ///     end_date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
    /// };
    /// let free = db.check_room_availability(&RequestContext::default(), &params).unwrap();
    /// ```
    pub fn check_room_availability(
        &self,
        ctx: &RequestContext,
        params: &CheckRoomAvailabilityParams,
    ) -> Result<bool> {
        self.with_connection(ctx, |conn| Self::check_room_availability_simple(conn, params))
    }

    /// Availability check on an existing connection or transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn check_room_availability_simple(
        conn: &Connection,
        params: &CheckRoomAvailabilityParams,
    ) -> Result<bool> {
        let overlapping: i64 = conn.query_row(
            COUNT_OVERLAPPING_RESTRICTIONS,
            params![
                params.room_id,
                format_date(params.start_date),
                format_date(params.end_date)
            ],
            |row| row.get(0),
        )?;
        Ok(overlapping == 0)
    }

    /// Lists rooms with no block overlapping the requested range.
    ///
    /// Rooms are ordered by name and paged by `limit`/`offset`.
    ///
    /// # Errors
    ///
    /// Returns a connectivity error on timeout or cancellation, or a
    /// database error if the query fails.
    pub fn list_available_rooms(
        &self,
        ctx: &RequestContext,
        params: &ListAvailableRoomsParams,
    ) -> Result<Vec<Room>> {
        self.with_connection(ctx, |conn| {
            let mut stmt = conn.prepare(SELECT_AVAILABLE_ROOMS)?;
            let rooms = stmt
                .query_map(
                    params![
                        format_date(params.start_date),
                        format_date(params.end_date),
                        params.limit,
                        params.offset
                    ],
                    row_to_room,
                )?
                .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
            Ok(rooms)
        })
    }
}
