//! Booking model
//!
//! A customer booking on a tour product. Every update appends an
//! [`UpdateStamp`] to `updated_at`, carrying the flattened list of fields the
//! update changed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ids::BookingId;
use crate::audit::FlatChange;

/// Default response status for a client that has not answered yet
pub const PENDING_RESPONSE: &str = "PENDING";

/// A pickup or meeting point
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeetingPoint {
    pub name: String,
    pub address: String,
    pub latitude: String,
    pub longitude: String,
    pub google_maps_url: String,
    pub instructions: String,
    pub img_url: String,
}

/// One entry of a booking's update history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateStamp {
    /// Who made the update
    #[serde(default)]
    pub user: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,

    /// Fields changed by the update, filled in by the booking audit hook
    #[serde(default)]
    pub changes: Vec<FlatChange>,

    /// Anything else a client attached to the stamp
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UpdateStamp {
    pub fn now(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            date: Some(Utc::now()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Booking {
    pub id: BookingId,
    #[serde(rename = "ref")]
    pub reference: String,
    pub order_number: String,
    pub product_id: String,
    pub option_id: String,
    pub channel_id: String,
    pub start_time_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_time_slot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_date: Option<String>,
    /// Tour date, `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub name: String,
    /// Number of travellers
    pub count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    pub client_email: String,
    pub client_phone: String,
    /// Ticket type to quantity, e.g. `{"adult": 2, "child": 1}`
    pub tickets: Map<String, Value>,
    pub billing_codes: Vec<Value>,
    pub client_location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_location: Option<MeetingPoint>,
    pub pickup_time: String,
    pub client_messaged: bool,
    pub client_response_status: String,
    pub notes: String,
    pub notes_list: Vec<Value>,
    pub group: u32,
    pub cancelled: bool,
    pub planned: bool,
    pub billed: bool,
    pub total_paid: f64,
    pub updated_at: Vec<UpdateStamp>,
    pub email_history: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tour_group_id: Option<String>,
}

impl Default for Booking {
    fn default() -> Self {
        Self {
            id: BookingId::new(),
            reference: String::new(),
            order_number: String::new(),
            product_id: String::new(),
            option_id: String::new(),
            channel_id: String::new(),
            start_time_id: String::new(),
            product_time_slot: None,
            booking_date: None,
            date: None,
            name: String::new(),
            count: 1,
            client_name: None,
            client_email: String::new(),
            client_phone: String::new(),
            tickets: Map::new(),
            billing_codes: Vec::new(),
            client_location: String::new(),
            pickup_location: None,
            pickup_time: String::new(),
            client_messaged: false,
            client_response_status: PENDING_RESPONSE.to_string(),
            notes: String::new(),
            notes_list: Vec::new(),
            group: 1,
            cancelled: false,
            planned: false,
            billed: false,
            total_paid: 0.0,
            updated_at: Vec::new(),
            email_history: Vec::new(),
            task_id: None,
            tour_group_id: None,
        }
    }
}

impl Booking {
    /// Create a booking for a client on a product and tour date
    pub fn new(
        reference: impl Into<String>,
        client_name: impl Into<String>,
        product_id: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            reference: reference.into(),
            client_name: Some(client_name.into()),
            product_id: product_id.into(),
            date: Some(date.into()),
            ..Self::default()
        }
    }

    /// The most recent update stamp, if any
    pub fn last_update(&self) -> Option<&UpdateStamp> {
        self.updated_at.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let booking = Booking::new("GET-1001", "Jane Doe", "acropolis-walk", "2024-06-01");
        assert_eq!(booking.count, 1);
        assert_eq!(booking.group, 1);
        assert_eq!(booking.client_response_status, "PENDING");
        assert!(booking.updated_at.is_empty());
        assert!(booking.last_update().is_none());
    }

    #[test]
    fn test_sparse_document_fills_defaults() {
        let booking: Booking = serde_json::from_value(json!({
            "ref": "GET-2002",
            "client_name": "Kostas",
            "pickup_location": {"name": "Syntagma", "_id": "abc"}
        }))
        .unwrap();

        assert_eq!(booking.reference, "GET-2002");
        assert_eq!(booking.count, 1);
        let pickup = booking.pickup_location.unwrap();
        assert_eq!(pickup.name, "Syntagma");
        assert_eq!(pickup.address, "");
    }

    #[test]
    fn test_update_stamp_keeps_unknown_fields() {
        let stamp: UpdateStamp = serde_json::from_value(json!({
            "user": "eleni",
            "device": "tablet"
        }))
        .unwrap();
        assert_eq!(stamp.user, "eleni");
        assert_eq!(stamp.extra.get("device"), Some(&json!("tablet")));

        let back = serde_json::to_value(&stamp).unwrap();
        assert_eq!(back["device"], json!("tablet"));
        assert_eq!(back["changes"], json!([]));
    }
}
