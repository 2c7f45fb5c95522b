//! Input parameters of store operations.
//!
//! Each struct is decoded from a field map supplied by the caller and can be
//! marshalled back, so a half-finished request can travel through a session.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::DateRange;
use crate::codec::{FieldMap, FieldReader, FieldWriter, Marshal, Unmarshal};
use crate::error::Result;
use crate::model::AccessLevel;

/// Is one room free over a date range?
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRoomAvailabilityParams {
    /// The room to check.
    pub room_id: i64,
    /// First requested night.
    pub start_date: NaiveDate,
    /// Requested departure date.
    pub end_date: NaiveDate,
}

impl CheckRoomAvailabilityParams {
    /// The requested range, validated.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidDateRange`] if `end_date <= start_date`.
    pub fn range(&self) -> Result<DateRange> {
        DateRange::new(self.start_date, self.end_date)
    }
}

impl Marshal for CheckRoomAvailabilityParams {
    fn marshal(&self) -> FieldMap {
        FieldWriter::new()
            .int("room_id", self.room_id)
            .date("start_date", self.start_date)
            .date("end_date", self.end_date)
            .finish()
    }
}

impl Unmarshal for CheckRoomAvailabilityParams {
    fn unmarshal(&mut self, fields: &FieldMap) -> Result<()> {
        let r = FieldReader::new(fields);
        r.int("room_id", &mut self.room_id)?;
        r.date("start_date", &mut self.start_date)?;
        r.date("end_date", &mut self.end_date)?;
        Ok(())
    }
}

/// Which rooms are free over a date range? Paged, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAvailableRoomsParams {
    /// First requested night.
    pub start_date: NaiveDate,
    /// Requested departure date.
    pub end_date: NaiveDate,
    /// Page size.
    pub limit: u32,
    /// Rows to skip.
    pub offset: u32,
}

impl ListAvailableRoomsParams {
    /// The requested range, validated.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidDateRange`] if `end_date <= start_date`.
    pub fn range(&self) -> Result<DateRange> {
        DateRange::new(self.start_date, self.end_date)
    }
}

impl Marshal for ListAvailableRoomsParams {
    fn marshal(&self) -> FieldMap {
        FieldWriter::new()
            .date("start_date", self.start_date)
            .date("end_date", self.end_date)
            .count("limit", self.limit)
            .count("offset", self.offset)
            .finish()
    }
}

impl Unmarshal for ListAvailableRoomsParams {
    fn unmarshal(&mut self, fields: &FieldMap) -> Result<()> {
        let r = FieldReader::new(fields);
        r.date("start_date", &mut self.start_date)?;
        r.date("end_date", &mut self.end_date)?;
        r.count("limit", &mut self.limit)?;
        r.count("offset", &mut self.offset)?;
        Ok(())
    }
}

/// A page of rooms ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRoomsParams {
    /// Page size.
    pub limit: u32,
    /// Rows to skip.
    pub offset: u32,
}

impl Marshal for ListRoomsParams {
    fn marshal(&self) -> FieldMap {
        FieldWriter::new()
            .count("limit", self.limit)
            .count("offset", self.offset)
            .finish()
    }
}

impl Unmarshal for ListRoomsParams {
    fn unmarshal(&mut self, fields: &FieldMap) -> Result<()> {
        let r = FieldReader::new(fields);
        r.count("limit", &mut self.limit)?;
        r.count("offset", &mut self.offset)?;
        Ok(())
    }
}

/// A page of reservations ordered by arrival date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListReservationsParams {
    /// Page size.
    pub limit: u32,
    /// Rows to skip.
    pub offset: u32,
}

impl Marshal for ListReservationsParams {
    fn marshal(&self) -> FieldMap {
        FieldWriter::new()
            .count("limit", self.limit)
            .count("offset", self.offset)
            .finish()
    }
}

impl Unmarshal for ListReservationsParams {
    fn unmarshal(&mut self, fields: &FieldMap) -> Result<()> {
        let r = FieldReader::new(fields);
        r.count("limit", &mut self.limit)?;
        r.count("offset", &mut self.offset)?;
        Ok(())
    }
}

/// A new reservation. The code must be filled in before it is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReservationParams {
    /// Generated booking reference.
    pub code: String,
    /// Guest first name.
    pub first_name: String,
    /// Guest last name.
    pub last_name: String,
    /// Guest email address.
    pub email: String,
    /// Guest phone number.
    pub phone: Option<String>,
    /// Arrival date.
    pub start_date: NaiveDate,
    /// Departure date.
    pub end_date: NaiveDate,
    /// The room to book.
    pub room_id: i64,
    /// Free-text notes.
    pub notes: Option<String>,
}

impl CreateReservationParams {
    /// The requested stay, validated.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidDateRange`] if `end_date <= start_date`.
    pub fn range(&self) -> Result<DateRange> {
        DateRange::new(self.start_date, self.end_date)
    }
}

impl Marshal for CreateReservationParams {
    fn marshal(&self) -> FieldMap {
        FieldWriter::new()
            .text("code", &self.code)
            .text("first_name", &self.first_name)
            .text("last_name", &self.last_name)
            .text("email", &self.email)
            .optional_text("phone", self.phone.as_deref())
            .date("start_date", self.start_date)
            .date("end_date", self.end_date)
            .int("room_id", self.room_id)
            .optional_text("notes", self.notes.as_deref())
            .finish()
    }
}

impl Unmarshal for CreateReservationParams {
    fn unmarshal(&mut self, fields: &FieldMap) -> Result<()> {
        let r = FieldReader::new(fields);
        r.text("code", &mut self.code);
        r.text("first_name", &mut self.first_name);
        r.text("last_name", &mut self.last_name);
        r.text("email", &mut self.email);
        r.optional_text("phone", &mut self.phone);
        r.date("start_date", &mut self.start_date)?;
        r.date("end_date", &mut self.end_date)?;
        r.int("room_id", &mut self.room_id)?;
        r.optional_text("notes", &mut self.notes);
        Ok(())
    }
}

/// Guest-detail corrections to an existing reservation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateReservationParams {
    /// The reservation to update.
    pub id: i64,
    /// Guest first name.
    pub first_name: String,
    /// Guest last name.
    pub last_name: String,
    /// Guest email address.
    pub email: String,
    /// Guest phone number.
    pub phone: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

impl Marshal for UpdateReservationParams {
    fn marshal(&self) -> FieldMap {
        FieldWriter::new()
            .int("id", self.id)
            .text("first_name", &self.first_name)
            .text("last_name", &self.last_name)
            .text("email", &self.email)
            .optional_text("phone", self.phone.as_deref())
            .optional_text("notes", self.notes.as_deref())
            .finish()
    }
}

impl Unmarshal for UpdateReservationParams {
    fn unmarshal(&mut self, fields: &FieldMap) -> Result<()> {
        let r = FieldReader::new(fields);
        r.int("id", &mut self.id)?;
        r.text("first_name", &mut self.first_name);
        r.text("last_name", &mut self.last_name);
        r.text("email", &mut self.email);
        r.optional_text("phone", &mut self.phone);
        r.optional_text("notes", &mut self.notes);
        Ok(())
    }
}

/// A new room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRoomParams {
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Optional image reference.
    pub image_filename: Option<String>,
}

impl Marshal for CreateRoomParams {
    fn marshal(&self) -> FieldMap {
        FieldWriter::new()
            .text("name", &self.name)
            .text("description", &self.description)
            .optional_text("image_filename", self.image_filename.as_deref())
            .finish()
    }
}

impl Unmarshal for CreateRoomParams {
    fn unmarshal(&mut self, fields: &FieldMap) -> Result<()> {
        let r = FieldReader::new(fields);
        r.text("name", &mut self.name);
        r.text("description", &mut self.description);
        r.optional_text("image_filename", &mut self.image_filename);
        Ok(())
    }
}

/// Changes to an existing room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRoomParams {
    /// The room to update.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Optional image reference.
    pub image_filename: Option<String>,
}

impl Marshal for UpdateRoomParams {
    fn marshal(&self) -> FieldMap {
        FieldWriter::new()
            .int("id", self.id)
            .text("name", &self.name)
            .text("description", &self.description)
            .optional_text("image_filename", self.image_filename.as_deref())
            .finish()
    }
}

impl Unmarshal for UpdateRoomParams {
    fn unmarshal(&mut self, fields: &FieldMap) -> Result<()> {
        let r = FieldReader::new(fields);
        r.int("id", &mut self.id)?;
        r.text("name", &mut self.name);
        r.text("description", &mut self.description);
        r.optional_text("image_filename", &mut self.image_filename);
        Ok(())
    }
}

/// A new calendar block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRoomRestrictionParams {
    /// First blocked night.
    pub start_date: NaiveDate,
    /// Day the block ends.
    pub end_date: NaiveDate,
    /// The room to block.
    pub room_id: i64,
    /// Owning reservation, for reservation blocks.
    pub reservation_id: Option<i64>,
    /// Catalog identifier of the block reason.
    pub restriction_id: i64,
}

impl CreateRoomRestrictionParams {
    /// The blocked range, validated.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidDateRange`] if `end_date <= start_date`.
    pub fn range(&self) -> Result<DateRange> {
        DateRange::new(self.start_date, self.end_date)
    }
}

impl Marshal for CreateRoomRestrictionParams {
    fn marshal(&self) -> FieldMap {
        FieldWriter::new()
            .date("start_date", self.start_date)
            .date("end_date", self.end_date)
            .int("room_id", self.room_id)
            .optional_int("reservation_id", self.reservation_id)
            .int("restriction_id", self.restriction_id)
            .finish()
    }
}

impl Unmarshal for CreateRoomRestrictionParams {
    fn unmarshal(&mut self, fields: &FieldMap) -> Result<()> {
        let r = FieldReader::new(fields);
        r.date("start_date", &mut self.start_date)?;
        r.date("end_date", &mut self.end_date)?;
        r.int("room_id", &mut self.room_id)?;
        r.optional_int("reservation_id", &mut self.reservation_id)?;
        r.int("restriction_id", &mut self.restriction_id)?;
        Ok(())
    }
}

/// A new operator account with a plaintext password to hash.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateUserParams {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Login email.
    pub email: String,
    /// Plaintext password; hashed before storage.
    pub password: String,
    /// Access level.
    pub access_level: AccessLevel,
}

impl std::fmt::Debug for CreateUserParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserParams")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("access_level", &self.access_level)
            .finish_non_exhaustive()
    }
}

impl Marshal for CreateUserParams {
    fn marshal(&self) -> FieldMap {
        FieldWriter::new()
            .text("first_name", &self.first_name)
            .text("last_name", &self.last_name)
            .text("email", &self.email)
            .text("password", &self.password)
            .int("access_level", self.access_level)
            .finish()
    }
}

impl Unmarshal for CreateUserParams {
    fn unmarshal(&mut self, fields: &FieldMap) -> Result<()> {
        let r = FieldReader::new(fields);
        r.text("first_name", &mut self.first_name);
        r.text("last_name", &mut self.last_name);
        r.text("email", &mut self.email);
        r.text("password", &mut self.password);
        r.int("access_level", &mut self.access_level)?;
        Ok(())
    }
}

/// Login credentials.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthenticateUserParams {
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

impl std::fmt::Debug for AuthenticateUserParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticateUserParams")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl Marshal for AuthenticateUserParams {
    fn marshal(&self) -> FieldMap {
        FieldWriter::new()
            .text("email", &self.email)
            .text("password", &self.password)
            .finish()
    }
}

impl Unmarshal for AuthenticateUserParams {
    fn unmarshal(&mut self, fields: &FieldMap) -> Result<()> {
        let r = FieldReader::new(fields);
        r.text("email", &mut self.email);
        r.text("password", &mut self.password);
        Ok(())
    }
}
