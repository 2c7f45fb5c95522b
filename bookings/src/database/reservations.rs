//! Reservation lookups and guest-detail corrections.

use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use crate::codec::{format_timestamp, non_blank};
use crate::context::RequestContext;
use crate::error::{Error, Result};
use crate::model::{ListReservationsParams, Reservation, UpdateReservationParams};

use super::connection::Database;
use super::rows::row_to_reservation;
use super::schema::RESERVATION_COLUMNS;

impl Database {
    /// Gets a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_reservation(&self, ctx: &RequestContext, id: i64) -> Result<Option<Reservation>> {
        self.with_connection(ctx, |conn| {
            let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?1");
            Ok(conn.query_row(&sql, [id], row_to_reservation).optional()?)
        })
    }

    /// Gets a reservation by its code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_reservation_by_code(
        &self,
        ctx: &RequestContext,
        code: &str,
    ) -> Result<Option<Reservation>> {
        self.with_connection(ctx, |conn| {
            let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE code = ?1");
            Ok(conn
                .query_row(&sql, [code.trim().to_ascii_uppercase()], row_to_reservation)
                .optional()?)
        })
    }

    /// Gets a reservation by code, only if the guest's last name matches.
    ///
    /// The name comparison ignores ASCII case.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_reservation_by_last_name(
        &self,
        ctx: &RequestContext,
        code: &str,
        last_name: &str,
    ) -> Result<Option<Reservation>> {
        self.with_connection(ctx, |conn| {
            let sql = format!(
                "SELECT {RESERVATION_COLUMNS} FROM reservations
                 WHERE code = ?1 AND last_name = ?2 COLLATE NOCASE"
            );
            Ok(conn
                .query_row(
                    &sql,
                    params![code.trim().to_ascii_uppercase(), last_name.trim()],
                    row_to_reservation,
                )
                .optional()?)
        })
    }

    /// Lists reservations by arrival date, paged by `limit`/`offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations(
        &self,
        ctx: &RequestContext,
        params: &ListReservationsParams,
    ) -> Result<Vec<Reservation>> {
        self.with_connection(ctx, |conn| {
            let sql = format!(
                "SELECT {RESERVATION_COLUMNS} FROM reservations
                 ORDER BY start_date, id LIMIT ?1 OFFSET ?2"
            );
            let mut stmt = conn.prepare(&sql)?;
            let reservations = stmt
                .query_map(params![params.limit, params.offset], row_to_reservation)?
                .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
            Ok(reservations)
        })
    }

    /// Lists the reservations of one room by arrival date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations_by_room(
        &self,
        ctx: &RequestContext,
        room_id: i64,
        params: &ListReservationsParams,
    ) -> Result<Vec<Reservation>> {
        self.with_connection(ctx, |conn| {
            let sql = format!(
                "SELECT {RESERVATION_COLUMNS} FROM reservations
                 WHERE room_id = ?1 ORDER BY start_date, id LIMIT ?2 OFFSET ?3"
            );
            let mut stmt = conn.prepare(&sql)?;
            let reservations = stmt
                .query_map(
                    params![room_id, params.limit, params.offset],
                    row_to_reservation,
                )?
                .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
            Ok(reservations)
        })
    }

    /// Corrects guest details and notes.
    ///
    /// The code, room and dates cannot be changed through this path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the reservation does not exist, or
    /// [`Error::ConstraintViolation`] if a required field is empty.
    pub fn update_reservation(
        &self,
        ctx: &RequestContext,
        params: &UpdateReservationParams,
    ) -> Result<Reservation> {
        let now = Utc::now();
        self.with_connection(ctx, |conn| {
            let changed = conn.execute(
                "UPDATE reservations
                 SET first_name = ?2, last_name = ?3, email = ?4, phone = ?5, notes = ?6,
                     updated_at = ?7
                 WHERE id = ?1",
                params![
                    params.id,
                    params.first_name,
                    params.last_name,
                    params.email,
                    non_blank(params.phone.as_deref()),
                    non_blank(params.notes.as_deref()),
                    format_timestamp(&now)
                ],
            )?;
            if changed == 0 {
                return Err(Error::NotFound {
                    resource: format!("reservation {}", params.id),
                });
            }
            let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?1");
            Ok(conn.query_row(&sql, [params.id], row_to_reservation)?)
        })
    }
}
