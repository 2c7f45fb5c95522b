//! Domain records and query parameters.
//!
//! Entities mirror the rows held by the store. Parameter structs carry the
//! input of each store operation and are normally produced by decoding a
//! field map (see [`crate::codec`]).

mod params;
mod reservation;
mod restriction;
mod room;
mod room_restriction;
mod user;

#[cfg(test)]
mod proptests;

pub use params::{
    AuthenticateUserParams, CheckRoomAvailabilityParams, CreateReservationParams,
    CreateRoomParams, CreateRoomRestrictionParams, CreateUserParams, ListAvailableRoomsParams,
    ListReservationsParams, ListRoomsParams, UpdateReservationParams, UpdateRoomParams,
};
pub use reservation::Reservation;
pub use restriction::{Restriction, RestrictionKind};
pub use room::Room;
pub use room_restriction::RoomRestriction;
pub use user::{AccessLevel, User};
