//! The storage calls the booking core depends on.
//!
//! [`BookingStore`] is the narrow seam between the availability and booking
//! workflow and the persistence layer. [`Database`] is the production
//! implementation; tests substitute a mock.

use crate::context::RequestContext;
use crate::database::Database;
use crate::error::Result;
use crate::model::{
    CheckRoomAvailabilityParams, CreateReservationParams, ListAvailableRoomsParams,
    ListRoomsParams, Reservation, RestrictionKind, Room,
};

/// Storage operations consumed by the availability and booking workflow.
///
/// Every call is bounded by the given request context.
#[cfg_attr(test, mockall::automock)]
pub trait BookingStore {
    /// Returns true iff no block on the room overlaps the requested range.
    ///
    /// # Errors
    ///
    /// Returns a connectivity or database error.
    fn check_room_availability(
        &self,
        ctx: &RequestContext,
        params: &CheckRoomAvailabilityParams,
    ) -> Result<bool>;

    /// Lists rooms with no block overlapping the requested range.
    ///
    /// # Errors
    ///
    /// Returns a connectivity or database error.
    fn list_available_rooms(
        &self,
        ctx: &RequestContext,
        params: &ListAvailableRoomsParams,
    ) -> Result<Vec<Room>>;

    /// Lists all rooms by name.
    ///
    /// # Errors
    ///
    /// Returns a connectivity or database error.
    fn list_rooms(&self, ctx: &RequestContext, params: &ListRoomsParams) -> Result<Vec<Room>>;

    /// Creates a reservation and its calendar block atomically.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::AvailabilityConflict`] or
    /// [`crate::Error::DuplicateCode`] on conflicts, or a transaction error;
    /// nothing is committed on failure.
    fn create_reservation_tx(
        &self,
        ctx: &RequestContext,
        params: &CreateReservationParams,
        kind: RestrictionKind,
    ) -> Result<Reservation>;
}

impl BookingStore for Database {
    fn check_room_availability(
        &self,
        ctx: &RequestContext,
        params: &CheckRoomAvailabilityParams,
    ) -> Result<bool> {
        Database::check_room_availability(self, ctx, params)
    }

    fn list_available_rooms(
        &self,
        ctx: &RequestContext,
        params: &ListAvailableRoomsParams,
    ) -> Result<Vec<Room>> {
        Database::list_available_rooms(self, ctx, params)
    }

    fn list_rooms(&self, ctx: &RequestContext, params: &ListRoomsParams) -> Result<Vec<Room>> {
        Database::list_rooms(self, ctx, params)
    }

    fn create_reservation_tx(
        &self,
        ctx: &RequestContext,
        params: &CreateReservationParams,
        kind: RestrictionKind,
    ) -> Result<Reservation> {
        Database::create_reservation_tx(self, ctx, params, kind)
    }
}

impl<S: BookingStore + ?Sized> BookingStore for &S {
    fn check_room_availability(
        &self,
        ctx: &RequestContext,
        params: &CheckRoomAvailabilityParams,
    ) -> Result<bool> {
        (**self).check_room_availability(ctx, params)
    }

    fn list_available_rooms(
        &self,
        ctx: &RequestContext,
        params: &ListAvailableRoomsParams,
    ) -> Result<Vec<Room>> {
        (**self).list_available_rooms(ctx, params)
    }

    fn list_rooms(&self, ctx: &RequestContext, params: &ListRoomsParams) -> Result<Vec<Room>> {
        (**self).list_rooms(ctx, params)
    }

    fn create_reservation_tx(
        &self,
        ctx: &RequestContext,
        params: &CreateReservationParams,
        kind: RestrictionKind,
    ) -> Result<Reservation> {
        (**self).create_reservation_tx(ctx, params, kind)
    }
}
