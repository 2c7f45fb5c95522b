//! Booking operations on top of the store.
//!
//! [`AvailabilityOracle`] answers read-only availability questions.
//! [`BookingService`] turns loosely typed request fields into validated
//! ranges, checks availability, and commits reservations with a unique code.
//! [`init_database`] prepares a data directory.
//!
//! # Examples
//!
//! ```no_run
//! use bookings::codec::FieldMap;
//! use bookings::operations::BookingService;
//! use bookings::{CodeGenerator, Database, DatabaseConfig, RequestContext};
//!
//! let db = Database::open(DatabaseConfig::new("/tmp/bookings.db")).unwrap();
//! let service = BookingService::new(&db, CodeGenerator::default());
//!
//! let mut fields = FieldMap::new();
//! fields.insert("room_id".into(), "1".into());
//! fields.insert("start_date".into(), "2024-05-08".into());
//! fields.insert("end_date".into(), "2024-05-10".into());
//! fields.insert("first_name".into(), "Ada".into());
//! fields.insert("last_name".into(), "Lovelace".into());
//! fields.insert("email".into(), "ada@example.com".into());
//!
//! let booking = service.book(&RequestContext::default(), &fields).unwrap();
//! println!("Reservation code: {}", booking.reservation.code);
//! ```

pub mod availability;
pub mod booking;
pub mod init;

pub use availability::{is_available, AvailabilityOracle};
pub use booking::{Booking, BookingService, MAX_CODE_ATTEMPTS};
pub use init::{init_database, InitOptions, InitResult};
