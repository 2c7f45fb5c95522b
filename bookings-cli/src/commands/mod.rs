//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `init`: Create the data directory, database and default config
//! - `room`: Add, list, show, update and delete rooms
//! - `restriction`: Inspect the restriction catalog
//! - `block`: Owner blocks on a room
//! - `search`: Rooms free over a date range
//! - `check`: Whether one room is free over a date range
//! - `book`: Book a room and print the reservation code
//! - `summary`: Show the last booking held in the session
//! - `reservation`: Look up, list, update and cancel reservations
//! - `user`: Operator accounts and login
//! - `completions`: Shell completion scripts

pub mod block;
pub mod book;
pub mod check;
pub mod completions;
pub mod init;
pub mod reservation;
pub mod restriction;
pub mod room;
pub mod search;
pub mod summary;
pub mod user;

pub use block::BlockCommand;
pub use book::BookCommand;
pub use check::CheckCommand;
pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use reservation::ReservationCommand;
pub use restriction::RestrictionCommand;
pub use room::RoomCommand;
pub use search::SearchCommand;
pub use summary::SummaryCommand;
pub use user::UserCommand;
