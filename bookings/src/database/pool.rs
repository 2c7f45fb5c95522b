//! Bounded pool of `SQLite` connections.
//!
//! Connections are produced by [`SqliteConnectionManager`] and handed out by
//! an `r2d2` pool sized from [`PoolConfig`]. Every new connection gets the
//! same PRAGMA setup before it is pooled.

use std::path::PathBuf;
use std::time::Duration;

use rusqlite::{Connection, OpenFlags};

use super::config::{DatabaseConfig, PoolConfig};
use crate::error::Result;

/// Pool of store connections.
pub type ConnectionPool = r2d2::Pool<SqliteConnectionManager>;

/// A connection checked out of the pool.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Opens and validates `SQLite` connections for the pool.
#[derive(Debug, Clone)]
pub struct SqliteConnectionManager {
    path: PathBuf,
    flags: OpenFlags,
    busy_timeout: Duration,
    read_only: bool,
}

impl SqliteConnectionManager {
    /// Build a manager for the database described by `config`.
    #[must_use]
    pub fn new(config: &DatabaseConfig) -> Self {
        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };
        Self {
            path: config.path.clone(),
            flags,
            busy_timeout: config.busy_timeout,
            read_only: config.read_only,
        }
    }
}

impl r2d2::ManageConnection for SqliteConnectionManager {
    type Connection = Connection;
    type Error = rusqlite::Error;

    fn connect(&self) -> std::result::Result<Connection, rusqlite::Error> {
        let conn = Connection::open_with_flags(&self.path, self.flags)?;

        // PRAGMA journal_mode returns a row, so it goes through query_row
        if !self.read_only {
            let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        }
        conn.execute_batch("PRAGMA synchronous = NORMAL; PRAGMA foreign_keys = ON;")?;
        conn.busy_timeout(self.busy_timeout)?;
        Ok(conn)
    }

    fn is_valid(&self, conn: &mut Connection) -> std::result::Result<(), rusqlite::Error> {
        conn.execute_batch("SELECT 1")
    }

    fn has_broken(&self, _conn: &mut Connection) -> bool {
        false
    }
}

/// Build the pool.
///
/// No connection is opened eagerly; the caller is expected to have opened
/// and migrated one through the manager already.
///
/// # Errors
///
/// Returns [`crate::Error::Validation`] for zero limits and
/// [`crate::Error::Pool`] if `r2d2` rejects the configuration.
pub fn build_pool(manager: SqliteConnectionManager, config: &PoolConfig) -> Result<ConnectionPool> {
    config.validate()?;
    let pool = r2d2::Pool::builder()
        .max_size(config.max_size)
        .min_idle(Some(0))
        .idle_timeout(Some(config.idle_timeout))
        .max_lifetime(Some(config.max_lifetime))
        .connection_timeout(config.connection_timeout)
        .build(manager)?;
    Ok(pool)
}
