//! Booking display formatting

use crate::audit::FlatChange;
use crate::models::{Booking, UpdateStamp};

/// Format bookings as a compact table
pub fn format_booking_list(bookings: &[Booking]) -> String {
    if bookings.is_empty() {
        return "No bookings found.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<14}  {:<10}  {:<24}  {:>5}  {}\n",
        "ID", "Ref", "Date", "Client", "Pax", "Status"
    ));
    output.push_str(&"-".repeat(80));
    output.push('\n');

    for booking in bookings {
        let status = if booking.cancelled {
            "cancelled".to_string()
        } else {
            booking.client_response_status.to_lowercase()
        };
        output.push_str(&format!(
            "{:<12}  {:<14}  {:<10}  {:<24}  {:>5}  {}\n",
            booking.id.to_string(),
            booking.reference,
            booking.date.as_deref().unwrap_or("-"),
            booking.client_name.as_deref().unwrap_or("-"),
            booking.count,
            status
        ));
    }

    output
}

/// Format a single booking's details
pub fn format_booking_details(booking: &Booking) -> String {
    let mut output = String::new();

    output.push_str(&format!("Booking: {}\n", booking.reference));
    output.push_str(&format!("  ID:       {}\n", booking.id));
    output.push_str(&format!(
        "  Client:   {}\n",
        booking.client_name.as_deref().unwrap_or("-")
    ));
    output.push_str(&format!("  Product:  {}\n", booking.product_id));
    output.push_str(&format!(
        "  Date:     {}\n",
        booking.date.as_deref().unwrap_or("-")
    ));
    output.push_str(&format!("  Pax:      {}\n", booking.count));
    if let Some(pickup) = &booking.pickup_location {
        output.push_str(&format!(
            "  Pickup:   {} {}\n",
            pickup.name, booking.pickup_time
        ));
    }
    if booking.cancelled {
        output.push_str("  Status:   cancelled\n");
    }
    output.push_str(&format!("  Updates:  {}\n", booking.updated_at.len()));

    output
}

/// Format a booking's update history, oldest first
pub fn format_history(stamps: &[UpdateStamp]) -> String {
    if stamps.is_empty() {
        return "No updates recorded.".to_string();
    }

    let mut output = String::new();
    for (i, stamp) in stamps.iter().enumerate() {
        let when = stamp
            .date
            .map(|d| d.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "-".to_string());
        let who = if stamp.user.is_empty() { "unknown" } else { stamp.user.as_str() };

        output.push_str(&format!("#{} {} by {}\n", i + 1, when, who));
        output.push_str(&format_changes(&stamp.changes));
    }

    output
}

/// Format flattened changes, one per line
pub fn format_changes(changes: &[FlatChange]) -> String {
    if changes.is_empty() {
        return "  (no changes)\n".to_string();
    }

    changes
        .iter()
        .map(|change| format!("  {}\n", change.describe()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_history() {
        let mut stamp = UpdateStamp::now("eleni");
        stamp.changes = vec![FlatChange::new("pickup_time", json!("08:00"), json!("08:30"))];

        let output = format_history(&[UpdateStamp::default(), stamp]);
        assert!(output.contains("#1 - by unknown"));
        assert!(output.contains("  (no changes)"));
        assert!(output.contains("by eleni"));
        assert!(output.contains("pickup_time: \"08:00\" -> \"08:30\""));
    }

    #[test]
    fn test_list() {
        let mut booking = Booking::new("GET-1001", "Jane Doe", "delphi", "2024-06-01");
        booking.cancelled = true;

        let output = format_booking_list(&[booking]);
        assert!(output.contains("GET-1001"));
        assert!(output.contains("cancelled"));
        assert_eq!(format_booking_list(&[]), "No bookings found.");
    }
}
