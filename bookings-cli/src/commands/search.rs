//! Search command implementation.
//!
//! Lists rooms free over a date range and remembers the range in the
//! session for a following `book`.

use crate::error::CliError;
use crate::utils::{form, open_app, output_format, print_records, FormatArg, GlobalOptions};
use bookings::codec::parse_date;
use bookings::DateRange;
use clap::Args;

/// Search rooms available over a date range.
#[derive(Args)]
pub struct SearchCommand {
    /// Arrival date (YYYY-MM-DD)
    #[arg(long)]
    pub start: String,

    /// Departure date (YYYY-MM-DD)
    #[arg(long)]
    pub end: String,

    /// Maximum rooms to show (default: configured page size)
    #[arg(long)]
    pub limit: Option<u32>,

    /// Rooms to skip
    #[arg(long)]
    pub offset: Option<u32>,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,
}

impl SearchCommand {
    /// Execute the search command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let app = open_app(global)?;
        let ctx = app.request_context();

        let fields = form([
            ("start_date", Some(self.start)),
            ("end_date", Some(self.end)),
            ("limit", self.limit.map(|v| v.to_string())),
            ("offset", self.offset.map(|v| v.to_string())),
        ]);
        let rooms = app.booking_service()?.search(&ctx, &fields)?;

        let range = DateRange::new(
            parse_date("start_date", &fields["start_date"])?,
            parse_date("end_date", &fields["end_date"])?,
        )?;
        let mut session = app.load_session()?;
        session.put_search_range(range);
        if rooms.is_empty() {
            session.put_warning(format!("No rooms available for {range}"));
        }
        app.save_session(&session)?;

        if rooms.is_empty() && !global.quiet {
            eprintln!("No rooms available for {range}");
        }
        print_records(output_format(self.format, app.settings()), &rooms)
    }
}
