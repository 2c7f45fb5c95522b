//! Atomic booking: a reservation and its calendar block commit together.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ErrorCode};

use crate::codec::{format_date, format_timestamp, non_blank};
use crate::context::RequestContext;
use crate::error::{Error, Result};
use crate::model::{
    CreateReservationParams, CreateRoomRestrictionParams, Reservation, RestrictionKind,
};

use super::connection::Database;
use super::schema::{INSERT_RESERVATION, INSERT_ROOM_RESTRICTION, OVERLAP_MESSAGE};

fn constraint_message(err: &rusqlite::Error) -> Option<&str> {
    match err {
        rusqlite::Error::SqliteFailure(failure, Some(message))
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            Some(message.as_str())
        }
        _ => None,
    }
}

/// Check whether `err` was raised by the block overlap triggers.
fn is_overlap_violation(err: &rusqlite::Error) -> bool {
    constraint_message(err).is_some_and(|m| m.contains(OVERLAP_MESSAGE))
}

fn is_code_collision(err: &rusqlite::Error) -> bool {
    constraint_message(err).is_some_and(|m| m.contains("reservations.code"))
}

impl Database {
    /// Creates a reservation and its calendar block in one transaction.
    ///
    /// The reservation row is inserted first; its new id is then referenced
    /// by a block of kind `kind` covering the same room and dates. Both rows
    /// commit together or neither does. The returned reservation carries the
    /// store-assigned id and timestamps.
    ///
    /// The overlap triggers on the block table make this the authoritative
    /// double-booking guard: a concurrent booking that already claimed the
    /// dates makes this call fail with [`Error::AvailabilityConflict`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the dates overlap an existing block ([`Error::AvailabilityConflict`])
    /// - the code is already used ([`Error::DuplicateCode`])
    /// - a required field is empty or the room does not exist
    ///   ([`Error::ConstraintViolation`])
    /// - the context expires or is cancelled
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bookings::database::{Database, DatabaseConfig};
    /// use bookings::{CreateReservationParams, RequestContext, RestrictionKind};
    /// use chrono::NaiveDate;
    ///
    /// let db = Database::open(DatabaseConfig::new("/tmp/bookings.db")).unwrap();
    /// let params = CreateReservationParams {
    ///     code: "1A2B3C4D5E".into(),
    ///     first_name: "Ada".into(),
    ///     last_name: "Lovelace".into(),
    ///     email: "ada@example.com".into(),
    ///     start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
    ///     end_date: NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
    ///     room_id: 1,
    ///     ..CreateReservationParams::default()
    /// };
    /// let reservation = db
    ///     .create_reservation_tx(&RequestContext::default(), &params, RestrictionKind::Reservation)
    ///     .unwrap();
    /// ```
    pub fn create_reservation_tx(
        &self,
        ctx: &RequestContext,
        params: &CreateReservationParams,
        kind: RestrictionKind,
    ) -> Result<Reservation> {
        let now = Utc::now();
        let reservation = self.with_transaction(ctx, |tx| {
            let id = Self::insert_reservation_simple(tx, params, &now)?;
            Self::insert_room_restriction_simple(
                tx,
                &CreateRoomRestrictionParams {
                    start_date: params.start_date,
                    end_date: params.end_date,
                    room_id: params.room_id,
                    reservation_id: Some(id),
                    restriction_id: kind.id(),
                },
                &now,
            )?;
            Ok(Reservation {
                id,
                code: params.code.clone(),
                first_name: params.first_name.clone(),
                last_name: params.last_name.clone(),
                email: params.email.clone(),
                phone: non_blank(params.phone.as_deref()).map(str::to_owned),
                start_date: params.start_date,
                end_date: params.end_date,
                room_id: params.room_id,
                notes: non_blank(params.notes.as_deref()).map(str::to_owned),
                created_at: now,
                updated_at: now,
            })
        })?;

        log::info!(
            "booked room {} from {} to {} as {}",
            reservation.room_id,
            format_date(reservation.start_date),
            format_date(reservation.end_date),
            reservation.code
        );
        Ok(reservation)
    }

    /// Inserts a reservation row and returns its id.
    ///
    /// Must run inside a transaction that also inserts the matching block.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateCode`] on a code collision, or the
    /// underlying database error.
    pub fn insert_reservation_simple(
        conn: &Connection,
        params: &CreateReservationParams,
        now: &DateTime<Utc>,
    ) -> Result<i64> {
        conn.execute(
            INSERT_RESERVATION,
            params![
                params.code,
                params.first_name,
                params.last_name,
                params.email,
                non_blank(params.phone.as_deref()),
                format_date(params.start_date),
                format_date(params.end_date),
                params.room_id,
                non_blank(params.notes.as_deref()),
                format_timestamp(now),
            ],
        )
        .map_err(|e| {
            if is_code_collision(&e) {
                Error::DuplicateCode {
                    code: params.code.clone(),
                }
            } else {
                Error::from(e)
            }
        })?;
        Ok(conn.last_insert_rowid())
    }

    /// Inserts a calendar block and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AvailabilityConflict`] if the block overlaps another
    /// block on the same room, or the underlying database error.
    pub fn insert_room_restriction_simple(
        conn: &Connection,
        params: &CreateRoomRestrictionParams,
        now: &DateTime<Utc>,
    ) -> Result<i64> {
        conn.execute(
            INSERT_ROOM_RESTRICTION,
            params![
                format_date(params.start_date),
                format_date(params.end_date),
                params.room_id,
                params.reservation_id,
                params.restriction_id,
                format_timestamp(now),
            ],
        )
        .map_err(|e| {
            if is_overlap_violation(&e) {
                Error::AvailabilityConflict {
                    room_id: params.room_id,
                    start: params.start_date,
                    end: params.end_date,
                }
            } else {
                Error::from(e)
            }
        })?;
        Ok(conn.last_insert_rowid())
    }

    /// Deletes a reservation together with its calendar block.
    ///
    /// Returns `false` if no reservation had the given id.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails.
    pub fn delete_reservation(&self, ctx: &RequestContext, id: i64) -> Result<bool> {
        let deleted = self.with_transaction(ctx, |tx| {
            tx.execute(
                "DELETE FROM room_restrictions WHERE reservation_id = ?1",
                [id],
            )?;
            Ok(tx.execute("DELETE FROM reservations WHERE id = ?1", [id])? > 0)
        })?;
        if deleted {
            log::info!("cancelled reservation {id}");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{
        block_room, count_rows, create_room, date, reservation_params, test_database,
    };
    use crate::CheckRoomAvailabilityParams;

    #[test]
    fn test_create_reservation_tx_writes_both_rows() {
        let (db, _dir) = test_database();
        let room = create_room(&db, "R1");
        let ctx = RequestContext::default();

        let params = reservation_params(room.id, "2024-06-01", "2024-06-05", "1A2B3C4D5E");
        let reservation = db
            .create_reservation_tx(&ctx, &params, RestrictionKind::Reservation)
            .unwrap();

        assert!(reservation.id > 0);
        assert_eq!(reservation.code, "1A2B3C4D5E");
        assert_eq!(count_rows(&db, "reservations"), 1);
        assert_eq!(count_rows(&db, "room_restrictions"), 1);

        let blocks = db.list_room_restrictions(&ctx, room.id).unwrap();
        assert_eq!(blocks[0].reservation_id, Some(reservation.id));
        assert_eq!(blocks[0].restriction_id, RestrictionKind::Reservation.id());
        assert_eq!(blocks[0].start_date, date("2024-06-01"));
        assert_eq!(blocks[0].end_date, date("2024-06-05"));

        let stored = db.get_reservation(&ctx, reservation.id).unwrap().unwrap();
        assert_eq!(stored, reservation);
    }

    #[test]
    fn test_missing_required_field_leaves_nothing() {
        let (db, _dir) = test_database();
        let room = create_room(&db, "R1");
        let mut params = reservation_params(room.id, "2024-06-01", "2024-06-05", "1A2B3C4D5E");
        params.first_name.clear();

        let err = db
            .create_reservation_tx(&RequestContext::default(), &params, RestrictionKind::Reservation)
            .unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation { .. }));
        assert_eq!(count_rows(&db, "reservations"), 0);
        assert_eq!(count_rows(&db, "room_restrictions"), 0);
    }

    #[test]
    fn test_failed_block_insert_rolls_back_reservation() {
        let (db, _dir) = test_database();
        let room = create_room(&db, "R1");
        block_room(&db, room.id, "2024-06-03", "2024-06-10");

        let params = reservation_params(room.id, "2024-06-01", "2024-06-05", "1A2B3C4D5E");
        let err = db
            .create_reservation_tx(&RequestContext::default(), &params, RestrictionKind::Reservation)
            .unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(count_rows(&db, "reservations"), 0);
        assert_eq!(count_rows(&db, "room_restrictions"), 1);
    }

    #[test]
    fn test_unknown_room_leaves_nothing() {
        let (db, _dir) = test_database();
        let params = reservation_params(99, "2024-06-01", "2024-06-05", "1A2B3C4D5E");
        let err = db
            .create_reservation_tx(&RequestContext::default(), &params, RestrictionKind::Reservation)
            .unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation { .. }));
        assert_eq!(count_rows(&db, "reservations"), 0);
    }

    #[test]
    fn test_duplicate_code_is_reported() {
        let (db, _dir) = test_database();
        let r1 = create_room(&db, "R1");
        let r2 = create_room(&db, "R2");
        let ctx = RequestContext::default();

        db.create_reservation_tx(
            &ctx,
            &reservation_params(r1.id, "2024-06-01", "2024-06-05", "1A2B3C4D5E"),
            RestrictionKind::Reservation,
        )
        .unwrap();
        let err = db
            .create_reservation_tx(
                &ctx,
                &reservation_params(r2.id, "2024-06-01", "2024-06-05", "1A2B3C4D5E"),
                RestrictionKind::Reservation,
            )
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateCode { ref code } if code == "1A2B3C4D5E"));
        assert_eq!(count_rows(&db, "reservations"), 1);
    }

    #[test]
    fn test_cancelled_context_commits_nothing() {
        let (db, _dir) = test_database();
        let room = create_room(&db, "R1");
        let ctx = RequestContext::default();
        ctx.token().cancel();

        let params = reservation_params(room.id, "2024-06-01", "2024-06-05", "1A2B3C4D5E");
        let err = db
            .create_reservation_tx(&ctx, &params, RestrictionKind::Reservation)
            .unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(count_rows(&db, "reservations"), 0);
    }

    #[test]
    fn test_delete_reservation_frees_the_room() {
        let (db, _dir) = test_database();
        let room = create_room(&db, "R1");
        let ctx = RequestContext::default();
        let reservation = db
            .create_reservation_tx(
                &ctx,
                &reservation_params(room.id, "2024-06-01", "2024-06-05", "1A2B3C4D5E"),
                RestrictionKind::Reservation,
            )
            .unwrap();

        assert!(db.delete_reservation(&ctx, reservation.id).unwrap());
        assert!(!db.delete_reservation(&ctx, reservation.id).unwrap());
        assert_eq!(count_rows(&db, "room_restrictions"), 0);

        let check = CheckRoomAvailabilityParams {
            room_id: room.id,
            start_date: date("2024-06-02"),
            end_date: date("2024-06-03"),
        };
        assert!(db.check_room_availability(&ctx, &check).unwrap());
    }
}
