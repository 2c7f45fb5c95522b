//! Build script for bookings-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Build scripts cannot depend on the crate being built, so the command tree
//! is restated here.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep in sync with src/cli.rs.
fn build_cli() -> Command {
    Command::new("bookings")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Search rooms and book reservations")
        .long_about("Command-line tool for searching room availability and booking hotel reservations")
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("BOOKINGS_DATA_DIR"),
        )
        .arg(
            Arg::new("timeout-ms")
                .long("timeout-ms")
                .help("Override the per-call storage deadline (in milliseconds)")
                .value_name("MILLIS")
                .global(true),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .subcommands(vec![
            Command::new("init")
                .about("Initialize the data directory and database")
                .long_about("Create the data directory, the database and optionally a default config"),
            Command::new("room")
                .about("Manage rooms")
                .long_about("Add, list, show, update and delete rooms"),
            Command::new("restriction")
                .about("Inspect the restriction catalog")
                .long_about("List and add restriction kinds"),
            Command::new("block")
                .about("Manage owner blocks on rooms")
                .long_about("Take a room off the market for a date range"),
            Command::new("search")
                .about("Search rooms available over a date range")
                .long_about("List rooms with no restriction overlapping the requested stay"),
            Command::new("check")
                .about("Check whether a room is available")
                .long_about("Exit 0 when the room is free for the stay and 1 when it is taken"),
            Command::new("book")
                .about("Book a room for a guest")
                .long_about("Book a room and print the generated reservation code"),
            Command::new("summary")
                .about("Show and clear the last booking")
                .long_about("Print the reservation saved by the last successful book command"),
            Command::new("reservation")
                .about("Look up and maintain reservations")
                .long_about("Show, list, update and cancel reservations"),
            Command::new("user")
                .about("Manage operator accounts")
                .long_about("Create operator accounts and log in"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(
        std::env::var_os("OUT_DIR").ok_or_else(|| std::io::Error::other("OUT_DIR not set"))?,
    );
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;
    fs::write(man_dir.join("bookings.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
