//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns
//! - Fixtures for rooms and bookings

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the bookings data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory path is not created; the CLI creates it.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("bookings-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// A command with only the binary, no flags.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("bookings").expect("Failed to find bookings binary");
        for var in [
            "BOOKINGS_DATA_DIR",
            "BOOKINGS_LOG_MODE",
            "BOOKINGS_PAGE_SIZE",
            "BOOKINGS_OUTPUT_FORMAT",
            "BOOKINGS_DISABLE_AUTOINIT",
            "BOOKINGS_REQUEST_TIMEOUT_MS",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }

    /// A command with `--data-dir` set to this environment's data directory.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Run a command and return its trimmed stdout, panicking on failure.
    pub fn run(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run bookings");

        assert!(
            output.status.success(),
            "{args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout)
            .expect("Invalid UTF-8 in output")
            .trim()
            .to_owned()
    }

    /// Add a room and return its id.
    pub fn add_room(&self, name: &str) -> i64 {
        self.run(&["room", "add", "--name", name])
            .parse()
            .expect("Output is not a room id")
    }

    /// Book `room_id` for Ada Lovelace and return the reservation code.
    pub fn book(&self, room_id: i64, start: &str, end: &str) -> String {
        self.run(&[
            "book",
            "--room-id",
            &room_id.to_string(),
            "--start",
            start,
            "--end",
            end,
            "--first-name",
            "Ada",
            "--last-name",
            "Lovelace",
            "--email",
            "ada@example.com",
        ])
    }

    /// JSON output of a listing command.
    pub fn json(&self, args: &[&str]) -> serde_json::Value {
        let mut full = args.to_vec();
        full.extend(["--format", "json"]);
        serde_json::from_str(&self.run(&full)).expect("Output is not JSON")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
