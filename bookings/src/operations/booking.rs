//! The booking workflow, from raw form fields to a committed reservation.
//!
//! Each entry point decodes its parameters with the record codec, validates
//! the date range, and then talks to the store. Booking additionally runs the
//! availability fast path, stamps a fresh reservation code and commits the
//! reservation together with its calendar block.

use crate::calendar::DateRange;
use crate::code::CodeGenerator;
use crate::codec::{decode, FieldMap, Marshal};
use crate::config::schema::DEFAULT_PAGE_SIZE;
use crate::context::RequestContext;
use crate::error::{Error, Result};
use crate::model::{
    CheckRoomAvailabilityParams, CreateReservationParams, ListAvailableRoomsParams, Reservation,
    RestrictionKind, Room,
};
use crate::store::BookingStore;

use super::availability::AvailabilityOracle;

/// Attempts made when a generated code collides with an existing one.
pub const MAX_CODE_ATTEMPTS: u32 = 3;

/// A committed booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    /// The stored reservation, with its id and timestamps.
    pub reservation: Reservation,
    /// The same reservation as a field map, for the presentation layer.
    pub fields: FieldMap,
}

impl From<Reservation> for Booking {
    fn from(reservation: Reservation) -> Self {
        let fields = reservation.marshal();
        Self {
            reservation,
            fields,
        }
    }
}

/// Search, check and book against a [`BookingStore`].
///
/// # Examples
///
/// ```no_run
/// use bookings::codec::FieldMap;
/// use bookings::database::{Database, DatabaseConfig};
/// use bookings::operations::BookingService;
/// use bookings::{CodeGenerator, RequestContext};
///
/// let db = Database::open(DatabaseConfig::new("/tmp/bookings.db")).unwrap();
/// let service = BookingService::new(&db, CodeGenerator::default());
///
/// let mut form = FieldMap::new();
/// for (key, value) in [
///     ("room_id", "1"),
///     ("start_date", "2024-06-01"),
///     ("end_date", "2024-06-05"),
///     ("first_name", "Ada"),
///     ("last_name", "Lovelace"),
///     ("email", "ada@example.com"),
/// ] {
///     form.insert(key.into(), value.into());
/// }
///
/// let booking = service.book(&RequestContext::default(), &form).unwrap();
/// println!("confirmation code {}", booking.reservation.code);
/// ```
#[derive(Debug, Clone)]
pub struct BookingService<S> {
    store: S,
    codes: CodeGenerator,
    page_size: u32,
}

impl<S: BookingStore> BookingService<S> {
    /// Creates a service over `store` issuing codes from `codes`.
    #[must_use]
    pub fn new(store: S, codes: CodeGenerator) -> Self {
        Self {
            store,
            codes,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Sets the page size used when a search omits `limit`.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    fn oracle(&self) -> AvailabilityOracle<&S> {
        AvailabilityOracle::new(&self.store)
    }

    /// Rooms free over the requested dates.
    ///
    /// Reads `start_date`, `end_date` and optionally `limit` and `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] or [`Error::InvalidDateRange`] for bad
    /// input, or a store error.
    pub fn search(&self, ctx: &RequestContext, fields: &FieldMap) -> Result<Vec<Room>> {
        let mut params: ListAvailableRoomsParams = decode(fields)?;
        if !fields.contains_key("limit") {
            params.limit = self.page_size;
        }
        let range = params.range()?;
        self.oracle().list(ctx, range, params.limit, params.offset)
    }

    /// Whether one room is free over the requested dates.
    ///
    /// Reads `room_id`, `start_date` and `end_date`. A taken room is a
    /// normal `false`, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] or [`Error::InvalidDateRange`] for bad
    /// input, or a store error.
    pub fn check(&self, ctx: &RequestContext, fields: &FieldMap) -> Result<bool> {
        let params: CheckRoomAvailabilityParams = decode(fields)?;
        let range = params.range()?;
        self.oracle().check(ctx, params.room_id, range)
    }

    /// Books a room for a guest.
    ///
    /// Any `code` supplied in `fields` is ignored; a fresh one is generated.
    /// A code collision is retried with a new code up to
    /// [`MAX_CODE_ATTEMPTS`] times.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the input cannot be decoded or the range is invalid
    /// - the room is taken, before or during the transaction
    ///   ([`Error::AvailabilityConflict`])
    /// - a required guest field is missing ([`Error::ConstraintViolation`])
    /// - every generated code collided ([`Error::DuplicateCode`])
    /// - the context expires or is cancelled
    pub fn book(&self, ctx: &RequestContext, fields: &FieldMap) -> Result<Booking> {
        let mut params: CreateReservationParams = decode(fields)?;
        let range = params.range()?;
        self.oracle().require_available(ctx, params.room_id, range)?;
        self.commit(ctx, &mut params, range)
    }

    fn commit(
        &self,
        ctx: &RequestContext,
        params: &mut CreateReservationParams,
        range: DateRange,
    ) -> Result<Booking> {
        let mut attempt = 1;
        loop {
            params.code = self
                .codes
                .generate_now(&params.last_name, range.start(), range.end())?;
            match self
                .store
                .create_reservation_tx(ctx, params, RestrictionKind::Reservation)
            {
                Ok(reservation) => return Ok(Booking::from(reservation)),
                Err(Error::DuplicateCode { code }) if attempt < MAX_CODE_ATTEMPTS => {
                    log::warn!("reservation code {code} collided, retrying (attempt {attempt})");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
