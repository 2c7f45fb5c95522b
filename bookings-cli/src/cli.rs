//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    BlockCommand, BookCommand, CheckCommand, CompletionsCommand, InitCommand, ReservationCommand,
    RestrictionCommand, RoomCommand, SearchCommand, SummaryCommand, UserCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for searching rooms and booking reservations.
#[derive(Parser)]
#[command(name = "bookings")]
#[command(version, about = "Search rooms and book reservations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "BOOKINGS_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the per-call storage deadline (in milliseconds)
    #[arg(long, value_name = "MILLIS", global = true)]
    pub timeout_ms: Option<u64>,

    /// Disable automatic database initialization
    #[arg(long, global = true)]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Manage rooms
    Room(RoomCommand),

    /// Inspect the restriction catalog
    Restriction(RestrictionCommand),

    /// Manage owner blocks on rooms
    Block(BlockCommand),

    /// Search rooms available over a date range
    Search(SearchCommand),

    /// Check whether a room is available
    Check(CheckCommand),

    /// Book a room for a guest
    Book(BookCommand),

    /// Show and clear the last booking
    Summary(SummaryCommand),

    /// Look up and maintain reservations
    Reservation(ReservationCommand),

    /// Manage operator accounts
    User(UserCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
