//! Room, restriction catalog and calendar block administration.

use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use crate::codec::{format_timestamp, non_blank};
use crate::context::RequestContext;
use crate::error::{Error, Result};
use crate::model::{
    CreateRoomParams, CreateRoomRestrictionParams, ListRoomsParams, Restriction, Room,
    RoomRestriction, UpdateRoomParams,
};

use super::connection::Database;
use super::rows::{row_to_restriction, row_to_room, row_to_room_restriction};
use super::schema::{ROOM_COLUMNS, ROOM_RESTRICTION_COLUMNS};

impl Database {
    /// Creates a room.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstraintViolation`] if the name is empty or taken.
    pub fn create_room(&self, ctx: &RequestContext, params: &CreateRoomParams) -> Result<Room> {
        let now = Utc::now();
        let id = self.with_connection(ctx, |conn| {
            conn.execute(
                "INSERT INTO rooms (name, description, image_filename, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4)",
                params![
                    params.name,
                    params.description,
                    non_blank(params.image_filename.as_deref()),
                    format_timestamp(&now)
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })?;
        log::debug!("created room {id} ({})", params.name);
        Ok(Room {
            id,
            name: params.name.clone(),
            description: params.description.clone(),
            image_filename: non_blank(params.image_filename.as_deref()).map(str::to_owned),
            created_at: now,
            updated_at: now,
        })
    }

    /// Gets a room by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_room(&self, ctx: &RequestContext, id: i64) -> Result<Option<Room>> {
        self.with_connection(ctx, |conn| {
            let sql = format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE id = ?1");
            Ok(conn.query_row(&sql, [id], row_to_room).optional()?)
        })
    }

    /// Lists rooms ordered by name, paged by `limit`/`offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_rooms(&self, ctx: &RequestContext, params: &ListRoomsParams) -> Result<Vec<Room>> {
        self.with_connection(ctx, |conn| {
            let sql = format!("SELECT {ROOM_COLUMNS} FROM rooms ORDER BY name LIMIT ?1 OFFSET ?2");
            let mut stmt = conn.prepare(&sql)?;
            let rooms = stmt
                .query_map(params![params.limit, params.offset], row_to_room)?
                .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
            Ok(rooms)
        })
    }

    /// Updates a room's name, description and image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the room does not exist.
    pub fn update_room(&self, ctx: &RequestContext, params: &UpdateRoomParams) -> Result<Room> {
        let now = Utc::now();
        self.with_connection(ctx, |conn| {
            let changed = conn.execute(
                "UPDATE rooms SET name = ?2, description = ?3, image_filename = ?4, updated_at = ?5
                 WHERE id = ?1",
                params![
                    params.id,
                    params.name,
                    params.description,
                    non_blank(params.image_filename.as_deref()),
                    format_timestamp(&now)
                ],
            )?;
            if changed == 0 {
                return Err(Error::NotFound {
                    resource: format!("room {}", params.id),
                });
            }
            let sql = format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE id = ?1");
            Ok(conn.query_row(&sql, [params.id], row_to_room)?)
        })
    }

    /// Deletes a room and its owner blocks.
    ///
    /// Returns `false` if the room did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstraintViolation`] if the room still has
    /// reservations.
    pub fn delete_room(&self, ctx: &RequestContext, id: i64) -> Result<bool> {
        self.with_connection(ctx, |conn| {
            Ok(conn.execute("DELETE FROM rooms WHERE id = ?1", [id])? > 0)
        })
    }

    /// Adds a restriction kind to the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstraintViolation`] if the name is taken.
    pub fn create_restriction(&self, ctx: &RequestContext, name: &str) -> Result<Restriction> {
        let now = Utc::now();
        let id = self.with_connection(ctx, |conn| {
            conn.execute(
                "INSERT INTO restrictions (name, created_at, updated_at) VALUES (?1, ?2, ?2)",
                params![name, format_timestamp(&now)],
            )?;
            Ok(conn.last_insert_rowid())
        })?;
        Ok(Restriction {
            id,
            name: name.to_owned(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Gets a restriction kind by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_restriction(&self, ctx: &RequestContext, id: i64) -> Result<Option<Restriction>> {
        self.with_connection(ctx, |conn| {
            Ok(conn
                .query_row(
                    "SELECT id, name, created_at, updated_at FROM restrictions WHERE id = ?1",
                    [id],
                    row_to_restriction,
                )
                .optional()?)
        })
    }

    /// Gets a restriction kind by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_restriction_by_name(
        &self,
        ctx: &RequestContext,
        name: &str,
    ) -> Result<Option<Restriction>> {
        self.with_connection(ctx, |conn| {
            Ok(conn
                .query_row(
                    "SELECT id, name, created_at, updated_at FROM restrictions WHERE name = ?1",
                    [name],
                    row_to_restriction,
                )
                .optional()?)
        })
    }

    /// Lists the restriction catalog by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_restrictions(&self, ctx: &RequestContext) -> Result<Vec<Restriction>> {
        self.with_connection(ctx, |conn| {
            let mut stmt =
                conn.prepare("SELECT id, name, created_at, updated_at FROM restrictions ORDER BY id")?;
            let restrictions = stmt
                .query_map([], row_to_restriction)?
                .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
            Ok(restrictions)
        })
    }

    /// Places a calendar block on a room.
    ///
    /// Owner blocks are created here; reservation blocks are created by
    /// [`Database::create_reservation_tx`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDateRange`] for a backwards range and
    /// [`Error::AvailabilityConflict`] if the block overlaps another block on
    /// the same room.
    pub fn create_room_restriction(
        &self,
        ctx: &RequestContext,
        params: &CreateRoomRestrictionParams,
    ) -> Result<RoomRestriction> {
        params.range()?;
        let now = Utc::now();
        let id = self.with_transaction(ctx, |tx| {
            Self::insert_room_restriction_simple(tx, params, &now)
        })?;
        log::info!(
            "blocked room {} from {} to {}",
            params.room_id,
            params.start_date,
            params.end_date
        );
        Ok(RoomRestriction {
            id,
            start_date: params.start_date,
            end_date: params.end_date,
            room_id: params.room_id,
            reservation_id: params.reservation_id,
            restriction_id: params.restriction_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Gets a calendar block by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_room_restriction(
        &self,
        ctx: &RequestContext,
        id: i64,
    ) -> Result<Option<RoomRestriction>> {
        self.with_connection(ctx, |conn| {
            let sql = format!("SELECT {ROOM_RESTRICTION_COLUMNS} FROM room_restrictions WHERE id = ?1");
            Ok(conn.query_row(&sql, [id], row_to_room_restriction).optional()?)
        })
    }

    /// Lists the blocks on one room, earliest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_room_restrictions(
        &self,
        ctx: &RequestContext,
        room_id: i64,
    ) -> Result<Vec<RoomRestriction>> {
        self.with_connection(ctx, |conn| {
            let sql = format!(
                "SELECT {ROOM_RESTRICTION_COLUMNS} FROM room_restrictions
                 WHERE room_id = ?1 ORDER BY start_date, id"
            );
            let mut stmt = conn.prepare(&sql)?;
            let blocks = stmt
                .query_map([room_id], row_to_room_restriction)?
                .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
            Ok(blocks)
        })
    }

    /// Removes a block that does not belong to a reservation.
    ///
    /// Returns `false` if no such block exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a reservation's block; cancel the
    /// reservation instead.
    pub fn delete_room_restriction(&self, ctx: &RequestContext, id: i64) -> Result<bool> {
        self.with_transaction(ctx, |tx| {
            let owner: Option<Option<i64>> = tx
                .query_row(
                    "SELECT reservation_id FROM room_restrictions WHERE id = ?1",
                    [id],
                    |row| row.get(0),
                )
                .optional()?;
            match owner {
                None => Ok(false),
                Some(Some(reservation_id)) => Err(Error::validation(
                    "room_restriction",
                    format!("block {id} belongs to reservation {reservation_id}"),
                )),
                Some(None) => {
                    tx.execute("DELETE FROM room_restrictions WHERE id = ?1", [id])?;
                    Ok(true)
                }
            }
        })
    }
}
