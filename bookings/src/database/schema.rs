//! Database schema definitions and SQL constants.
//!
//! Dates are stored as `YYYY-MM-DD` text, so string comparison orders them
//! chronologically. Timestamps are RFC 3339 text in UTC.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Message raised by the overlap triggers.
pub const OVERLAP_MESSAGE: &str = "room_restriction_overlap";

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the rooms table.
pub const CREATE_ROOMS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS rooms (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE CHECK (name <> ''),
        description TEXT NOT NULL DEFAULT '',
        image_filename TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )";

/// SQL statement to create the restriction catalog.
pub const CREATE_RESTRICTIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS restrictions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )";

/// SQL statement to create the reservations table.
///
/// Guest name, email and code must be non-empty; the code is unique.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        code TEXT NOT NULL UNIQUE CHECK (code <> ''),
        first_name TEXT NOT NULL CHECK (first_name <> ''),
        last_name TEXT NOT NULL CHECK (last_name <> ''),
        email TEXT NOT NULL CHECK (email <> ''),
        phone TEXT,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        room_id INTEGER NOT NULL REFERENCES rooms(id),
        notes TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        CHECK (end_date > start_date)
    )";

/// SQL statement to create the calendar block table.
///
/// Deleting a reservation deletes its block.
pub const CREATE_ROOM_RESTRICTIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS room_restrictions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        room_id INTEGER NOT NULL REFERENCES rooms(id) ON DELETE CASCADE,
        reservation_id INTEGER REFERENCES reservations(id) ON DELETE CASCADE,
        restriction_id INTEGER NOT NULL REFERENCES restrictions(id),
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        CHECK (end_date > start_date)
    )";

/// SQL statement to create the users table.
pub const CREATE_USERS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE CHECK (email <> ''),
        password_hash TEXT NOT NULL,
        access_level INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )";

/// Rejects a new block that overlaps another block on the same room.
///
/// This is the authoritative double-booking guard. Two intervals
/// `[a, b)` and `[c, d)` overlap iff `a < d AND c < b`.
pub const CREATE_OVERLAP_INSERT_TRIGGER: &str = r"
    CREATE TRIGGER IF NOT EXISTS room_restrictions_no_overlap_insert
    BEFORE INSERT ON room_restrictions
    WHEN EXISTS (
        SELECT 1 FROM room_restrictions
        WHERE room_id = NEW.room_id
          AND start_date < NEW.end_date
          AND NEW.start_date < end_date
    )
    BEGIN
        SELECT RAISE(ABORT, 'room_restriction_overlap');
    END";

/// Same guard for blocks that are moved.
pub const CREATE_OVERLAP_UPDATE_TRIGGER: &str = r"
    CREATE TRIGGER IF NOT EXISTS room_restrictions_no_overlap_update
    BEFORE UPDATE OF start_date, end_date, room_id ON room_restrictions
    WHEN EXISTS (
        SELECT 1 FROM room_restrictions
        WHERE room_id = NEW.room_id
          AND id <> NEW.id
          AND start_date < NEW.end_date
          AND NEW.start_date < end_date
    )
    BEGIN
        SELECT RAISE(ABORT, 'room_restriction_overlap');
    END";

/// Speeds up overlap lookups per room.
pub const CREATE_ROOM_RESTRICTIONS_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_room_restrictions_room_dates
    ON room_restrictions(room_id, start_date, end_date)";

/// Speeds up lookups by guest last name.
pub const CREATE_RESERVATIONS_LAST_NAME_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_last_name ON reservations(last_name)";

/// Seeds the restriction catalog. `?1` is the creation timestamp.
pub const SEED_RESTRICTIONS: &str = r"
    INSERT OR IGNORE INTO restrictions (id, name, created_at, updated_at)
    VALUES (1, 'reservation', ?1, ?1), (2, 'owner block', ?1, ?1)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Columns selected for a [`crate::Room`].
pub const ROOM_COLUMNS: &str = "id, name, description, image_filename, created_at, updated_at";

/// Columns selected for a [`crate::Reservation`].
pub const RESERVATION_COLUMNS: &str = "id, code, first_name, last_name, email, phone, \
     start_date, end_date, room_id, notes, created_at, updated_at";

/// Columns selected for a [`crate::RoomRestriction`].
pub const ROOM_RESTRICTION_COLUMNS: &str =
    "id, start_date, end_date, room_id, reservation_id, restriction_id, created_at, updated_at";

/// Columns selected for a [`crate::User`].
pub const USER_COLUMNS: &str =
    "id, first_name, last_name, email, password_hash, access_level, created_at, updated_at";

/// Counts blocks on room `?1` overlapping `[?2, ?3)`.
pub const COUNT_OVERLAPPING_RESTRICTIONS: &str = r"
    SELECT COUNT(*) FROM room_restrictions
    WHERE room_id = ?1 AND start_date < ?3 AND ?2 < end_date";

/// Rooms with no block overlapping `[?1, ?2)`, by name, paged by `?3`/`?4`.
pub const SELECT_AVAILABLE_ROOMS: &str = r"
    SELECT r.id, r.name, r.description, r.image_filename, r.created_at, r.updated_at
    FROM rooms r
    WHERE NOT EXISTS (
        SELECT 1 FROM room_restrictions rr
        WHERE rr.room_id = r.id AND rr.start_date < ?2 AND ?1 < rr.end_date
    )
    ORDER BY r.name
    LIMIT ?3 OFFSET ?4";

/// SQL statement to insert a reservation.
pub const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (code, first_name, last_name, email, phone, start_date, end_date, room_id, notes,
     created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)";

/// SQL statement to insert a calendar block.
pub const INSERT_ROOM_RESTRICTION: &str = r"
    INSERT INTO room_restrictions
    (start_date, end_date, room_id, reservation_id, restriction_id, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)";
