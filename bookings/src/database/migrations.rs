//! Database schema management and migrations.
//!
//! This module handles database schema initialization and version checking.

use chrono::Utc;
use rusqlite::Connection;

use crate::codec::format_timestamp;
use crate::error::{Error, Result};

use super::schema::{
    CREATE_METADATA_TABLE, CREATE_OVERLAP_INSERT_TRIGGER, CREATE_OVERLAP_UPDATE_TRIGGER,
    CREATE_RESERVATIONS_LAST_NAME_INDEX, CREATE_RESERVATIONS_TABLE, CREATE_RESTRICTIONS_TABLE,
    CREATE_ROOMS_TABLE, CREATE_ROOM_RESTRICTIONS_INDEX, CREATE_ROOM_RESTRICTIONS_TABLE,
    CREATE_USERS_TABLE, CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION, SEED_RESTRICTIONS,
    SELECT_SCHEMA_VERSION,
};

/// Initializes the database schema.
///
/// Creates all tables, triggers and indices, seeds the restriction catalog
/// and records the schema version, all in one transaction.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
///
/// # Examples
///
/// ```no_run
/// use rusqlite::Connection;
/// use bookings::database::migrations::initialize_schema;
///
/// let mut conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&mut conn).unwrap();
/// ```
pub fn initialize_schema(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;

    for statement in [
        CREATE_METADATA_TABLE,
        CREATE_ROOMS_TABLE,
        CREATE_RESTRICTIONS_TABLE,
        CREATE_RESERVATIONS_TABLE,
        CREATE_ROOM_RESTRICTIONS_TABLE,
        CREATE_USERS_TABLE,
        CREATE_OVERLAP_INSERT_TRIGGER,
        CREATE_OVERLAP_UPDATE_TRIGGER,
        CREATE_ROOM_RESTRICTIONS_INDEX,
        CREATE_RESERVATIONS_LAST_NAME_INDEX,
    ] {
        tx.execute(statement, [])?;
    }

    tx.execute(SEED_RESTRICTIONS, [format_timestamp(&Utc::now())])?;
    tx.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;
    tx.commit()?;

    log::debug!("initialized schema version {CURRENT_SCHEMA_VERSION}");
    Ok(())
}

/// Gets the current schema version from the database.
///
/// # Errors
///
/// Returns an error if the query fails for reasons other than
/// "no rows returned" (which indicates version 0).
///
/// # Returns
///
/// - `Ok(0)` if the metadata table doesn't exist or has no version
/// - `Ok(version)` if a version is found
/// - `Err(_)` if a database error occurs
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| {
        let value: String = row.get(0)?;
        value
            .parse::<i32>()
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => {
            // "no such table" surfaces as the generic SQLITE_ERROR code
            if let rusqlite::Error::SqliteFailure(ref sqlite_err, _) = e {
                if sqlite_err.code == rusqlite::ErrorCode::Unknown {
                    return Ok(0);
                }
            }
            Err(e.into())
        }
    }
}

/// Checks schema compatibility and initializes if needed.
///
/// A fresh database is initialized. A database written by a newer release
/// is rejected. Older versions do not exist yet.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] if the version on disk does
/// not match, or a database error if initialization fails.
pub fn check_schema_compatibility(conn: &mut Connection) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        initialize_schema(conn)?;
    } else if version != CURRENT_SCHEMA_VERSION {
        return Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION.unsigned_abs(),
            found: version.unsigned_abs(),
        });
    }

    Ok(())
}
