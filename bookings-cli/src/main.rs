//! Main entry point for the bookings CLI.
//!
//! This is the command-line interface for the bookings reservation system.
//! It stands in for the web front end:
//! - `search`: List rooms free over a date range
//! - `check`: Check one room
//! - `book`: Book a room and print the reservation code
//! - `room`, `block`, `reservation`, `user`: Administration

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    let _level = bookings::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        timeout_ms: cli.timeout_ms,
        disable_autoinit: cli.disable_autoinit,
    };

    let result = match cli.command {
        cli::Command::Init(cmd) => cmd.execute(&global),
        cli::Command::Room(cmd) => cmd.execute(&global),
        cli::Command::Restriction(cmd) => cmd.execute(&global),
        cli::Command::Block(cmd) => cmd.execute(&global),
        cli::Command::Search(cmd) => cmd.execute(&global),
        cli::Command::Check(cmd) => cmd.execute(&global),
        cli::Command::Book(cmd) => cmd.execute(&global),
        cli::Command::Summary(cmd) => cmd.execute(&global),
        cli::Command::Reservation(cmd) => cmd.execute(&global),
        cli::Command::User(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
