//! Book command implementation.
//!
//! Books a room and prints the reservation code. The reservation is kept in
//! the session so `summary` can show it afterwards.

use crate::error::CliError;
use crate::utils::{form, open_app, GlobalOptions};
use clap::Args;

/// Book a room for a guest.
#[derive(Args)]
pub struct BookCommand {
    /// Room to book
    #[arg(long)]
    pub room_id: i64,

    /// Arrival date (YYYY-MM-DD)
    #[arg(long)]
    pub start: String,

    /// Departure date (YYYY-MM-DD)
    #[arg(long)]
    pub end: String,

    /// Guest first name
    #[arg(long)]
    pub first_name: String,

    /// Guest last name
    #[arg(long)]
    pub last_name: String,

    /// Guest email
    #[arg(long)]
    pub email: String,

    /// Guest phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Free-text notes
    #[arg(long)]
    pub notes: Option<String>,
}

impl BookCommand {
    /// Execute the book command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let app = open_app(global)?;
        let ctx = app.request_context();

        let fields = form([
            ("room_id", Some(self.room_id.to_string())),
            ("start_date", Some(self.start)),
            ("end_date", Some(self.end)),
            ("first_name", Some(self.first_name)),
            ("last_name", Some(self.last_name)),
            ("email", Some(self.email)),
            ("phone", self.phone),
            ("notes", self.notes),
        ]);

        let mut session = app.load_session()?;
        let booking = match app.booking_service()?.book(&ctx, &fields) {
            Ok(booking) => booking,
            Err(e) => {
                if e.is_conflict() {
                    session.put_error("Room is no longer available for those dates");
                    app.save_session(&session)?;
                }
                return Err(e.into());
            }
        };

        log::info!(
            "booked room {} as {}",
            booking.reservation.room_id,
            booking.reservation.code
        );
        println!("{}", booking.reservation.code);

        session.put_reservation(booking.reservation);
        session.put_flash("Reservation saved");
        app.save_session(&session)?;
        Ok(())
    }
}
