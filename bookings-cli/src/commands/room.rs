//! Room management commands.

use crate::error::CliError;
use crate::utils::{form, open_app, output_format, print_one, print_records, FormatArg, GlobalOptions};
use bookings::codec::decode;
use bookings::{CreateRoomParams, ListRoomsParams, UpdateRoomParams};
use clap::{Args, Subcommand};

/// Manage rooms.
#[derive(Args)]
pub struct RoomCommand {
    #[command(subcommand)]
    pub action: RoomAction,
}

/// Room subcommands.
#[derive(Subcommand)]
pub enum RoomAction {
    /// Add a room
    Add {
        /// Display name (unique)
        #[arg(long)]
        name: String,

        /// Free-text description
        #[arg(long, default_value = "")]
        description: String,

        /// Image file shown with the room
        #[arg(long, value_name = "FILE")]
        image: Option<String>,
    },

    /// List rooms ordered by name
    List {
        /// Maximum rooms to show (default: configured page size)
        #[arg(long)]
        limit: Option<u32>,

        /// Rooms to skip
        #[arg(long, default_value_t = 0)]
        offset: u32,

        /// Output format
        #[arg(long, value_enum, ignore_case = true)]
        format: Option<FormatArg>,
    },

    /// Show one room
    Show {
        /// Room id
        id: i64,

        /// Output format
        #[arg(long, value_enum, ignore_case = true)]
        format: Option<FormatArg>,
    },

    /// Replace a room's details
    Update {
        /// Room id
        id: i64,

        /// New display name
        #[arg(long)]
        name: String,

        /// New description
        #[arg(long, default_value = "")]
        description: String,

        /// New image file
        #[arg(long, value_name = "FILE")]
        image: Option<String>,
    },

    /// Delete a room
    Delete {
        /// Room id
        id: i64,
    },
}

impl RoomCommand {
    /// Execute the room command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let app = open_app(global)?;
        let ctx = app.request_context();
        let db = app.database();

        match self.action {
            RoomAction::Add {
                name,
                description,
                image,
            } => {
                let params: CreateRoomParams = decode(&form([
                    ("name", Some(name)),
                    ("description", Some(description)),
                    ("image_filename", image),
                ]))?;
                let room = db.create_room(&ctx, &params)?;
                println!("{}", room.id);
            }
            RoomAction::List {
                limit,
                offset,
                format,
            } => {
                let params = ListRoomsParams {
                    limit: limit.unwrap_or(app.settings().page_size),
                    offset,
                };
                let rooms = db.list_rooms(&ctx, &params)?;
                print_records(output_format(format, app.settings()), &rooms)?;
            }
            RoomAction::Show { id, format } => {
                let room = db.get_room(&ctx, id)?;
                print_one(output_format(format, app.settings()), room, &format!("Room {id}"))?;
            }
            RoomAction::Update {
                id,
                name,
                description,
                image,
            } => {
                let params: UpdateRoomParams = decode(&form([
                    ("id", Some(id.to_string())),
                    ("name", Some(name)),
                    ("description", Some(description)),
                    ("image_filename", image),
                ]))?;
                let room = db.update_room(&ctx, &params)?;
                if !global.quiet {
                    println!("Updated room {} ({})", room.id, room.name);
                }
            }
            RoomAction::Delete { id } => {
                if !db.delete_room(&ctx, id)? {
                    return Err(CliError::SemanticFailure(format!("Room {id} not found")));
                }
                if !global.quiet {
                    println!("Deleted room {id}");
                }
            }
        }
        Ok(())
    }
}
