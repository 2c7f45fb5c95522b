//! Check command implementation.

use crate::error::CliError;
use crate::utils::{form, open_app, GlobalOptions};
use clap::Args;

/// Check whether one room is free over a date range.
///
/// Exits 0 when the room is available and 1 when it is taken.
#[derive(Args)]
pub struct CheckCommand {
    /// Room to check
    #[arg(long)]
    pub room_id: i64,

    /// Arrival date (YYYY-MM-DD)
    #[arg(long)]
    pub start: String,

    /// Departure date (YYYY-MM-DD)
    #[arg(long)]
    pub end: String,
}

impl CheckCommand {
    /// Execute the check command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let app = open_app(global)?;
        let ctx = app.request_context();

        let fields = form([
            ("room_id", Some(self.room_id.to_string())),
            ("start_date", Some(self.start.clone())),
            ("end_date", Some(self.end.clone())),
        ]);

        if app.booking_service()?.check(&ctx, &fields)? {
            if !global.quiet {
                println!("available");
            }
            Ok(())
        } else {
            Err(CliError::SemanticFailure(format!(
                "Room {} is not available from {} to {}",
                self.room_id, self.start, self.end
            )))
        }
    }
}
