//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including data directory resolution, configuration loading, opening the
//! application context, building field maps and output formatting.

use crate::error::CliError;
use bookings::codec::{format_date, format_timestamp, FieldMap};
use bookings::config::{OutputFormat, Settings};
use bookings::database::default_data_dir;
use bookings::{AppContext, Config, ConfigBuilder, Reservation, Restriction, Room, RoomRestriction};
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
#[allow(dead_code)] // verbose is consumed by the logger before dispatch
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the per-call storage deadline (in milliseconds).
    pub timeout_ms: Option<u64>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Output format flag accepted by listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum FormatArg {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

/// Resolve the data directory.
///
/// Priority: `--data-dir` / `BOOKINGS_DATA_DIR` > `~/.bookings`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref dir) => Ok(dir.clone()),
        None => default_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. `<data_dir>/config.yaml`
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Settings, CliError> {
    let data_dir = resolve_data_dir(global)?;

    let overrides = Config {
        request_timeout_ms: global.timeout_ms,
        disable_autoinit: global.disable_autoinit.then_some(true),
        ..Config::default()
    };

    let config = ConfigBuilder::new()
        .with_data_dir(&data_dir)
        .with_config(overrides)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Settings::from_config(&config).map_err(|e| CliError::Config(e.to_string()))
}

/// Load configuration and open the application context.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the data directory doesn't exist and
/// auto-init is disabled.
pub fn open_app(global: &GlobalOptions) -> Result<AppContext, CliError> {
    let settings = load_configuration(global)?;
    let data_dir = resolve_data_dir(global)?;
    AppContext::open(data_dir, settings).map_err(CliError::from)
}

/// Builds a field map from optional form values, skipping absent ones.
pub fn form<'a, I>(pairs: I) -> FieldMap
where
    I: IntoIterator<Item = (&'a str, Option<String>)>,
{
    pairs
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key.to_owned(), v)))
        .collect()
}

/// A record that can be printed as a table or CSV row.
pub trait Tabular: Serialize {
    /// Column headers, in row order.
    const HEADERS: &'static [&'static str];

    /// The record's cells.
    fn row(&self) -> Vec<String>;
}

impl Tabular for Room {
    const HEADERS: &'static [&'static str] = &["id", "name", "description", "image", "updated_at"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.description.clone(),
            self.image_filename.clone().unwrap_or_default(),
            format_timestamp(&self.updated_at),
        ]
    }
}

impl Tabular for Reservation {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "code",
        "room_id",
        "start_date",
        "end_date",
        "first_name",
        "last_name",
        "email",
        "phone",
    ];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.code.clone(),
            self.room_id.to_string(),
            format_date(self.start_date),
            format_date(self.end_date),
            self.first_name.clone(),
            self.last_name.clone(),
            self.email.clone(),
            self.phone.clone().unwrap_or_default(),
        ]
    }
}

impl Tabular for RoomRestriction {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "room_id",
        "start_date",
        "end_date",
        "restriction_id",
        "reservation_id",
    ];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.room_id.to_string(),
            format_date(self.start_date),
            format_date(self.end_date),
            self.restriction_id.to_string(),
            self.reservation_id.map(|id| id.to_string()).unwrap_or_default(),
        ]
    }
}

impl Tabular for Restriction {
    const HEADERS: &'static [&'static str] = &["id", "name"];

    fn row(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone()]
    }
}

/// Print records to stdout in the requested format.
pub fn print_records<T: Tabular>(format: OutputFormat, records: &[T]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write_records(&mut handle, format, records)
}

/// Write records in the requested format.
pub fn write_records<T: Tabular, W: Write>(
    out: &mut W,
    format: OutputFormat,
    records: &[T],
) -> Result<(), CliError> {
    match format {
        OutputFormat::Table => {
            let header_line = T::HEADERS
                .iter()
                .map(|s| s.to_uppercase())
                .collect::<Vec<_>>()
                .join("\t");
            writeln!(out, "{header_line}")?;
            for record in records {
                let cells = record
                    .row()
                    .into_iter()
                    .map(|cell| if cell.is_empty() { "-".to_owned() } else { cell })
                    .collect::<Vec<_>>();
                writeln!(out, "{}", cells.join("\t"))?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, records)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            writer.write_record(T::HEADERS)?;
            for record in records {
                writer.write_record(record.row())?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

/// Print a single record, or fail with a semantic error naming `what`.
pub fn print_one<T: Tabular>(
    format: OutputFormat,
    record: Option<T>,
    what: &str,
) -> Result<(), CliError> {
    match record {
        Some(record) => print_records(format, std::slice::from_ref(&record)),
        None => Err(CliError::SemanticFailure(format!("{what} not found"))),
    }
}

/// The format to use: the flag if given, otherwise the configured default.
pub fn output_format(flag: Option<FormatArg>, settings: &Settings) -> OutputFormat {
    flag.map_or(settings.output_format, OutputFormat::from)
}
