//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixture builders for testing
//! the bookings library.

use bookings::codec::FieldMap;
use bookings::database::{Database, DatabaseConfig};
use bookings::{CreateRoomParams, RequestContext, Room};
use chrono::NaiveDate;
use tempfile::TempDir;

/// Creates a test database in a temporary directory.
///
/// Keep the returned `TempDir` alive for as long as the database is used.
#[allow(dead_code)]
pub fn create_test_database() -> (Database, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open(DatabaseConfig::new(dir.path().join("bookings.db"))).unwrap();
    (db, dir)
}

/// Parses a `YYYY-MM-DD` literal.
#[allow(dead_code)]
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Adds a room with the given name.
#[allow(dead_code)]
pub fn add_room(db: &Database, name: &str) -> Room {
    db.create_room(
        &RequestContext::default(),
        &CreateRoomParams {
            name: name.to_string(),
            description: format!("{name} description"),
            image_filename: None,
        },
    )
    .unwrap()
}

/// Builds a field map from literal pairs.
#[allow(dead_code)]
pub fn form(pairs: &[(&str, &str)]) -> FieldMap {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Booking form fields for a guest.
///
/// # Examples
///
/// ```no_run
/// # use common::BookingForm;
/// let fields = BookingForm::new(1, "2024-05-08", "2024-05-10")
///     .with_guest("Grace", "Hopper")
///     .build();
/// ```
#[allow(dead_code)]
pub struct BookingForm {
    room_id: i64,
    start: String,
    end: String,
    first_name: String,
    last_name: String,
    email: String,
}

#[allow(dead_code)]
impl BookingForm {
    /// Creates a form for Ada Lovelace.
    pub fn new(room_id: i64, start: &str, end: &str) -> Self {
        Self {
            room_id,
            start: start.to_string(),
            end: end.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    /// Changes the guest name; the email follows the first name.
    pub fn with_guest(mut self, first_name: &str, last_name: &str) -> Self {
        self.first_name = first_name.to_string();
        self.last_name = last_name.to_string();
        self.email = format!("{}@example.com", first_name.to_lowercase());
        self
    }

    /// Builds the field map.
    pub fn build(self) -> FieldMap {
        form(&[
            ("room_id", &self.room_id.to_string()),
            ("start_date", &self.start),
            ("end_date", &self.end),
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("email", &self.email),
        ])
    }
}
