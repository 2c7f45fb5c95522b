//! Database layer for persistent storage of rooms, blocks and reservations.
//!
//! This module provides a SQLite-based storage gateway: a bounded
//! connection pool, schema versioning, the availability queries, the
//! atomic booking transaction and the administrative CRUD operations.
//! Every call takes a [`RequestContext`](crate::RequestContext) that bounds
//! how long it may run.
//!
//! # Examples
//!
//! ```no_run
//! use bookings::database::{Database, DatabaseConfig};
//! use bookings::{CreateRoomParams, ListRoomsParams, RequestContext};
//!
//! let db = Database::open(DatabaseConfig::new("/tmp/bookings.db")).unwrap();
//! let ctx = RequestContext::default();
//!
//! db.create_room(&ctx, &CreateRoomParams {
//!     name: "Garden Suite".into(),
//!     ..CreateRoomParams::default()
//! }).unwrap();
//!
//! for room in db.list_rooms(&ctx, &ListRoomsParams { limit: 10, offset: 0 }).unwrap() {
//!     println!("{}", room.name);
//! }
//! ```

mod availability;
mod config;
mod connection;
pub mod migrations;
mod pool;
mod reservations;
mod rooms;
mod rows;
mod schema;
#[cfg(test)]
pub(crate) mod test_util;
mod transaction;
mod users;

// Re-export public API
pub use config::{
    default_data_dir, resolve_database_path, DatabaseConfig, PoolConfig, DATABASE_FILE,
};
pub use connection::Database;

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
