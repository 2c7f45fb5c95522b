#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # bookings
//!
//! A library for hotel room reservations.
//!
//! Guests search rooms free over a date range, pick one, and submit their
//! details; the library checks availability, issues a reservation code and
//! records the stay together with the block it places on the room calendar,
//! all in one transaction. Operators manage rooms and owner blocks.
//!
//! ## Core Types
//!
//! - [`DateRange`]: Validated half-open stay intervals
//! - [`codec`]: Field map encoding of records and request parameters
//! - [`CodeGenerator`]: Reservation code generation
//! - [`AvailabilityOracle`] and [`BookingService`]: Availability and booking
//! - [`Database`] and [`BookingStore`]: SQLite storage gateway
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//! - [`Session`]: Typed per-user session values
//!
//! ## Examples
//!
//! ```
//! use bookings::{CodeGenerator, DateRange};
//! use chrono::{NaiveDate, TimeZone, Utc};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 5, 8).unwrap();
//! let end = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
//! let stay = DateRange::new(start, end).unwrap();
//! assert_eq!(stay.nights(), 2);
//!
//! let codes = CodeGenerator::default();
//! let at = Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap();
//! let code = codes.generate("Lovelace", start, end, at).unwrap();
//! assert_eq!(code.len(), 10);
//! ```

pub mod app;
pub mod calendar;
pub mod code;
pub mod codec;
pub mod config;
pub mod context;
pub mod database;
pub mod error;
pub mod logging;
pub mod model;
pub mod operations;
pub mod password;
pub mod session;
pub mod store;

// Re-export key types at crate root for convenience
pub use app::AppContext;
pub use calendar::DateRange;
pub use code::CodeGenerator;
pub use codec::{FieldMap, Marshal, Unmarshal};
pub use config::{Config, ConfigBuilder, Settings};
pub use context::{CancellationToken, RequestContext};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, ErrorKind, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use model::{
    AccessLevel, AuthenticateUserParams, CheckRoomAvailabilityParams, CreateReservationParams,
    CreateRoomParams, CreateRoomRestrictionParams, CreateUserParams, ListAvailableRoomsParams,
    ListReservationsParams, ListRoomsParams, Reservation, Restriction, RestrictionKind, Room,
    RoomRestriction, UpdateReservationParams, UpdateRoomParams, User,
};
pub use operations::{AvailabilityOracle, Booking, BookingService};
pub use session::{Session, SessionKey, SessionValue};
pub use store::BookingStore;
