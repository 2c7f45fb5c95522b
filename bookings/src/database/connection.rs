//! Database handle and per-request connection access.
//!
//! [`Database`] owns the connection pool. Store operations borrow a pooled
//! connection through [`Database::with_connection`] or
//! [`Database::with_transaction`], which bind the connection to the request
//! context for the duration of the call and translate storage failures into
//! crate errors.

use std::time::Duration;

use rusqlite::{Connection, ErrorCode, Transaction, TransactionBehavior};

use crate::context::RequestContext;
use crate::error::{Error, Result};

use super::config::DatabaseConfig;
use super::migrations::check_schema_compatibility;
use super::pool::{build_pool, ConnectionPool, SqliteConnectionManager};

/// VM instructions between deadline checks while a statement runs.
const PROGRESS_INTERVAL: i32 = 1000;

/// Shared handle to the bookings store.
///
/// Cloning is cheap; clones share one connection pool and may be used from
/// different threads.
///
/// # Examples
///
/// ```no_run
/// use bookings::database::{Database, DatabaseConfig};
///
/// let config = DatabaseConfig::new("/tmp/bookings.db");
/// let db = Database::open(config).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    pool: ConnectionPool,
    config: DatabaseConfig,
}

impl Database {
    /// Opens the store with the given configuration.
    ///
    /// This function will:
    /// - Create the parent directory if `auto_create` is enabled
    /// - Open one connection and initialize or verify the schema
    /// - Build the bounded connection pool
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The database file cannot be opened or its directory created
    /// - The schema version is not supported
    /// - The pool limits are invalid
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if config.auto_create && !config.path.exists() {
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let manager = SqliteConnectionManager::new(&config);
        {
            let mut conn = r2d2::ManageConnection::connect(&manager)?;
            if config.read_only {
                super::migrations::get_schema_version(&conn)?;
            } else {
                check_schema_compatibility(&mut conn)?;
            }
        }
        let pool = build_pool(manager, &config.pool)?;

        log::debug!(
            "opened database {} (pool max {})",
            config.path.display(),
            config.pool.max_size
        );
        Ok(Self { pool, config })
    }

    /// The configuration this store was opened with.
    #[must_use]
    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Run `f` on a pooled connection bound to `ctx`.
    ///
    /// The context is checked before checkout, the checkout waits at most
    /// until the deadline, and the running statement is interrupted once the
    /// context expires or is cancelled.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `f`, translated by the storage error
    /// classification, or a connectivity error for checkout failures.
    pub fn with_connection<T>(
        &self,
        ctx: &RequestContext,
        f: impl FnOnce(&mut Connection) -> Result<T>,
    ) -> Result<T> {
        ctx.check()?;

        let wait = ctx.remaining().min(self.config.pool.connection_timeout);
        let mut conn = self.pool.get_timeout(wait).map_err(|e| {
            if ctx.is_done() {
                ctx.interruption_error()
            } else {
                Error::from(e)
            }
        })?;

        bind_context(&conn, ctx, self.config.busy_timeout)?;
        let result = f(&mut conn);
        release_context(&conn, self.config.busy_timeout);
        result.map_err(|e| self.classify(e, ctx))
    }

    /// Run `f` inside an immediate transaction on a pooled connection.
    ///
    /// The transaction commits only if `f` succeeds. Any error, including an
    /// interruption by the context, rolls it back.
    ///
    /// # Errors
    ///
    /// See [`Database::with_connection`].
    pub fn with_transaction<T>(
        &self,
        ctx: &RequestContext,
        f: impl FnOnce(&Transaction<'_>) -> Result<T>,
    ) -> Result<T> {
        self.with_connection(ctx, |conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let value = f(&tx)?;
            tx.commit()?;
            Ok(value)
        })
    }

    /// Translate low-level storage failures into crate errors.
    fn classify(&self, err: Error, ctx: &RequestContext) -> Error {
        let Error::Database(db_err) = err else {
            return err;
        };
        match db_err.sqlite_error_code() {
            Some(ErrorCode::OperationInterrupted) => ctx.interruption_error(),
            Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) => Error::LockTimeout {
                millis: u64::try_from(self.config.busy_timeout.as_millis()).unwrap_or(u64::MAX),
            },
            Some(ErrorCode::ConstraintViolation) => Error::ConstraintViolation {
                details: db_err.to_string(),
            },
            Some(ErrorCode::DatabaseCorrupt | ErrorCode::NotADatabase) => {
                Error::DatabaseCorruption {
                    details: db_err.to_string(),
                }
            }
            _ => Error::Database(db_err),
        }
    }

    /// Runs `PRAGMA integrity_check`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatabaseCorruption`] if the check reports problems.
    pub fn verify_integrity(&self, ctx: &RequestContext) -> Result<()> {
        self.with_connection(ctx, |conn| {
            let result: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
            if result == "ok" {
                Ok(())
            } else {
                Err(Error::DatabaseCorruption { details: result })
            }
        })
    }
}

// Every checkout rebinds, so a handler left behind by a panic is replaced
// on the connection's next use.
fn bind_context(conn: &Connection, ctx: &RequestContext, busy_timeout: Duration) -> Result<()> {
    let watched = ctx.clone();
    conn.progress_handler(PROGRESS_INTERVAL, Some(move || watched.is_done()));
    conn.busy_timeout(busy_timeout.min(ctx.remaining()))?;
    Ok(())
}

fn release_context(conn: &Connection, busy_timeout: Duration) {
    conn.progress_handler(PROGRESS_INTERVAL, None::<fn() -> bool>);
    if let Err(e) = conn.busy_timeout(busy_timeout) {
        log::warn!("failed to restore busy timeout: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_database_open_creates_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("subdir").join("bookings.db");
        let _db = Database::open(DatabaseConfig::new(&path)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_database_open_missing_without_auto_create() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.db");
        let result = Database::open(DatabaseConfig::new(&path).without_auto_create());
        assert!(matches!(result, Err(Error::Database(_))));
    }

    #[test]
    fn test_expired_context_is_rejected_before_checkout() {
        let dir = tempdir().unwrap();
        let db = Database::open(DatabaseConfig::new(dir.path().join("b.db"))).unwrap();
        let ctx = RequestContext::with_timeout(Duration::ZERO);
        let result = db.with_connection(&ctx, |_| Ok(()));
        assert!(matches!(result, Err(Error::Timeout { .. })));
    }

    #[test]
    fn test_cancelled_query_is_interrupted() {
        let dir = tempdir().unwrap();
        let db = Database::open(DatabaseConfig::new(dir.path().join("b.db"))).unwrap();
        let ctx = RequestContext::with_timeout(Duration::from_secs(30));
        let token = ctx.token().clone();

        let result = db.with_connection(&ctx, |conn| {
            token.cancel();
            // Long enough to cross many progress checks.
            let n: i64 = conn.query_row(
                "WITH RECURSIVE c(x) AS (SELECT 1 UNION ALL SELECT x + 1 FROM c WHERE x < 10000000)
                 SELECT COUNT(*) FROM c",
                [],
                |row| row.get(0),
            )?;
            Ok(n)
        });
        assert!(matches!(result, Err(Error::Cancelled)));
    }

    #[test]
    fn test_failed_transaction_rolls_back() {
        let dir = tempdir().unwrap();
        let db = Database::open(DatabaseConfig::new(dir.path().join("b.db"))).unwrap();
        let ctx = RequestContext::default();

        let result: Result<()> = db.with_transaction(&ctx, |tx| {
            tx.execute(
                "INSERT INTO rooms (name, created_at, updated_at) VALUES ('R1', 'x', 'x')",
                [],
            )?;
            Err(Error::validation("room", "forced failure"))
        });
        assert!(result.is_err());

        let count: i64 = db
            .with_connection(&ctx, |conn| {
                Ok(conn.query_row("SELECT COUNT(*) FROM rooms", [], |row| row.get(0))?)
            })
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_constraint_violation_is_classified() {
        let dir = tempdir().unwrap();
        let db = Database::open(DatabaseConfig::new(dir.path().join("b.db"))).unwrap();
        let ctx = RequestContext::default();

        let result = db.with_connection(&ctx, |conn| {
            conn.execute(
                "INSERT INTO rooms (name, created_at, updated_at) VALUES ('', 'x', 'x')",
                [],
            )?;
            Ok(())
        });
        assert!(matches!(result, Err(Error::ConstraintViolation { .. })));
    }

    #[test]
    fn test_verify_integrity() {
        let dir = tempdir().unwrap();
        let db = Database::open(DatabaseConfig::new(dir.path().join("b.db"))).unwrap();
        db.verify_integrity(&RequestContext::default()).unwrap();
    }
}
