//! Reservation lookup and maintenance commands.

use crate::error::CliError;
use crate::utils::{form, open_app, output_format, print_one, print_records, FormatArg, GlobalOptions};
use bookings::codec::decode;
use bookings::{ListReservationsParams, UpdateReservationParams};
use clap::{Args, Subcommand};

/// Look up and maintain reservations.
#[derive(Args)]
pub struct ReservationCommand {
    #[command(subcommand)]
    pub action: ReservationAction,
}

/// Reservation subcommands.
#[derive(Subcommand)]
pub enum ReservationAction {
    /// Show a reservation by its code
    Show {
        /// Reservation code
        #[arg(long)]
        code: String,

        /// Guest last name; when given, it must match the reservation
        #[arg(long)]
        last_name: Option<String>,

        /// Output format
        #[arg(long, value_enum, ignore_case = true)]
        format: Option<FormatArg>,
    },

    /// List reservations ordered by arrival date
    List {
        /// Only reservations for this room
        #[arg(long)]
        room_id: Option<i64>,

        /// Maximum reservations to show (default: configured page size)
        #[arg(long)]
        limit: Option<u32>,

        /// Reservations to skip
        #[arg(long, default_value_t = 0)]
        offset: u32,

        /// Output format
        #[arg(long, value_enum, ignore_case = true)]
        format: Option<FormatArg>,
    },

    /// Change guest details or notes
    Update {
        /// Reservation id
        id: i64,

        /// Guest first name
        #[arg(long)]
        first_name: Option<String>,

        /// Guest last name
        #[arg(long)]
        last_name: Option<String>,

        /// Guest email
        #[arg(long)]
        email: Option<String>,

        /// Guest phone number
        #[arg(long)]
        phone: Option<String>,

        /// Free-text notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Cancel a reservation and free its dates
    Cancel {
        /// Reservation id
        id: i64,
    },
}

impl ReservationCommand {
    /// Execute the reservation command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let app = open_app(global)?;
        let ctx = app.request_context();
        let db = app.database();

        match self.action {
            ReservationAction::Show {
                code,
                last_name,
                format,
            } => {
                let reservation = match last_name {
                    Some(ref last_name) => db.get_reservation_by_last_name(&ctx, &code, last_name)?,
                    None => db.get_reservation_by_code(&ctx, &code)?,
                };
                print_one(
                    output_format(format, app.settings()),
                    reservation,
                    &format!("Reservation {code}"),
                )?;
            }
            ReservationAction::List {
                room_id,
                limit,
                offset,
                format,
            } => {
                let params = ListReservationsParams {
                    limit: limit.unwrap_or(app.settings().page_size),
                    offset,
                };
                let reservations = match room_id {
                    Some(room_id) => db.list_reservations_by_room(&ctx, room_id, &params)?,
                    None => db.list_reservations(&ctx, &params)?,
                };
                print_records(output_format(format, app.settings()), &reservations)?;
            }
            ReservationAction::Update {
                id,
                first_name,
                last_name,
                email,
                phone,
                notes,
            } => {
                let Some(current) = db.get_reservation(&ctx, id)? else {
                    return Err(CliError::SemanticFailure(format!(
                        "Reservation {id} not found"
                    )));
                };
                let params: UpdateReservationParams = decode(&form([
                    ("id", Some(id.to_string())),
                    ("first_name", first_name.or(Some(current.first_name))),
                    ("last_name", last_name.or(Some(current.last_name))),
                    ("email", email.or(Some(current.email))),
                    ("phone", phone.or(current.phone)),
                    ("notes", notes.or(current.notes)),
                ]))?;
                let updated = db.update_reservation(&ctx, &params)?;
                if !global.quiet {
                    println!("Updated reservation {}", updated.code);
                }
            }
            ReservationAction::Cancel { id } => {
                if !db.delete_reservation(&ctx, id)? {
                    return Err(CliError::SemanticFailure(format!(
                        "Reservation {id} not found"
                    )));
                }
                if !global.quiet {
                    println!("Cancelled reservation {id}");
                }
            }
        }
        Ok(())
    }
}
