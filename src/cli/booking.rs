//! Booking CLI commands

use std::path::PathBuf;

use clap::Subcommand;
use serde_json::{Map, Value};

use crate::config::Settings;
use crate::display::{format_booking_details, format_booking_list, format_changes, format_history};
use crate::error::{TourdeskError, TourdeskResult};
use crate::hooks::BookingAuditHook;
use crate::models::Booking;
use crate::services::BookingService;
use crate::storage::{read_json_required, Storage};

/// Booking subcommands
#[derive(Subcommand)]
pub enum BookingCommands {
    /// Create a booking
    Create {
        /// Booking reference, e.g. GET-1001
        reference: String,
        #[arg(long)]
        client: String,
        /// Product id
        #[arg(long)]
        product: String,
        /// Tour date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Number of travellers
        #[arg(long, default_value = "1")]
        count: u32,
    },
    /// Apply a partial update and record what changed
    Update {
        /// Booking reference or ID
        booking: String,
        /// Field assignment; the value is parsed as JSON, falling back to a string
        #[arg(short, long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
        /// JSON object file merged before any --set assignments
        #[arg(short, long)]
        payload: Option<PathBuf>,
        #[arg(short, long, env = "TOURDESK_USER", default_value = "system")]
        user: String,
    },
    /// List bookings
    List,
    /// Show a booking
    Show {
        /// Booking reference or ID
        booking: String,
    },
    /// Show the update history of a booking
    History {
        /// Booking reference or ID
        booking: String,
    },
}

/// Handle a booking command
pub fn handle_booking_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BookingCommands,
) -> TourdeskResult<()> {
    let service = BookingService::new(storage)
        .with_hook(BookingAuditHook::from_settings(&settings.audit));

    match cmd {
        BookingCommands::Create {
            reference,
            client,
            product,
            date,
            count,
        } => {
            let mut booking = Booking::new(reference, client, product, date);
            booking.count = count;
            let booking = service.create(booking)?;
            println!("Created booking: {}", booking.reference);
            println!("  ID: {}", booking.id);
        }

        BookingCommands::Update {
            booking,
            set,
            payload,
            user,
        } => {
            let booking = service.require(&booking)?;

            let mut update = match payload {
                Some(path) => match read_json_required::<Value, _>(&path)? {
                    Value::Object(map) => map,
                    _ => {
                        return Err(TourdeskError::Validation(format!(
                            "{} must contain a JSON object",
                            path.display()
                        )))
                    }
                },
                None => Map::new(),
            };
            for assignment in &set {
                let (key, value) = parse_assignment(assignment)?;
                update.insert(key, value);
            }
            if update.is_empty() {
                return Err(TourdeskError::Validation(
                    "Nothing to update; pass --set KEY=VALUE or --payload FILE".into(),
                ));
            }

            let updated = service.update(booking.id, update, &user)?;
            println!("Updated booking: {}", updated.reference);
            if let Some(stamp) = updated.last_update() {
                print!("{}", format_changes(&stamp.changes));
            }
        }

        BookingCommands::List => {
            print!("{}", format_booking_list(&service.list()?));
        }

        BookingCommands::Show { booking } => {
            print!("{}", format_booking_details(&service.require(&booking)?));
        }

        BookingCommands::History { booking } => {
            let booking = service.require(&booking)?;
            println!("History of {}", booking.reference);
            print!("{}", format_history(&service.history(booking.id)?));
        }
    }

    Ok(())
}

/// Split `key=value`; the value is JSON if it parses, a plain string otherwise
fn parse_assignment(input: &str) -> TourdeskResult<(String, Value)> {
    let (key, raw) = input.split_once('=').ok_or_else(|| {
        TourdeskError::Validation(format!("Expected KEY=VALUE, got '{}'", input))
    })?;

    let key = key.trim();
    if key.is_empty() {
        return Err(TourdeskError::Validation(format!(
            "Missing field name in '{}'",
            input
        )));
    }

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("count=3").unwrap(),
            ("count".to_string(), json!(3))
        );
        assert_eq!(
            parse_assignment("pickup_time=08:30").unwrap(),
            ("pickup_time".to_string(), json!("08:30"))
        );
        assert_eq!(
            parse_assignment("tickets={\"adult\":2}").unwrap(),
            ("tickets".to_string(), json!({"adult": 2}))
        );
        assert_eq!(
            parse_assignment("notes=a=b").unwrap(),
            ("notes".to_string(), json!("a=b"))
        );
    }

    #[test]
    fn test_parse_assignment_errors() {
        assert!(parse_assignment("count").unwrap_err().is_validation());
        assert!(parse_assignment("=3").unwrap_err().is_validation());
    }
}
