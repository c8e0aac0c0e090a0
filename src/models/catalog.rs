//! Tour catalog records: products, tour groups and ticket availability
//!
//! These records carry small normalizations that run right before they are
//! stored; see [`crate::hooks::PreSave`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ids::{ProductId, TourGroupId};

/// A bookable tour product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Generated when a new product is saved without one
    #[serde(default)]
    pub id: ProductId,

    #[serde(default)]
    pub title: Option<String>,

    /// Name of the product on the booking platform; drives `slug`
    #[serde(default)]
    pub platform_product_name: Option<String>,

    #[serde(default)]
    pub bokun_product_code: Option<String>,

    /// URL-safe name derived from `platform_product_name`
    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default)]
    pub meeting_point_id: Option<String>,

    #[serde(default)]
    pub time_slots: Vec<String>,

    #[serde(default, rename = "isPrivate")]
    pub is_private: Option<bool>,

    #[serde(default, rename = "isPublished")]
    pub is_published: Option<bool>,

    /// Descriptive fields (highlights, inclusions, pictures, ...) kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: ProductId::new(),
            title: Some(title.into()),
            platform_product_name: None,
            bokun_product_code: None,
            slug: None,
            meeting_point_id: None,
            time_slots: Vec::new(),
            is_private: None,
            is_published: None,
            extra: Map::new(),
        }
    }

    pub fn with_platform_name(mut self, name: impl Into<String>) -> Self {
        self.platform_product_name = Some(name.into());
        self
    }
}

/// A departure of a product on one date, grouping its bookings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourGroup {
    #[serde(default)]
    pub id: TourGroupId,
    #[serde(default)]
    pub product_id: String,
    /// Legacy product reference; older clients read this instead of `product_id`
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub option_id: String,
    #[serde(default)]
    pub start_time_id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    /// Booking ids in this group
    #[serde(default)]
    pub bookings: Vec<String>,
    #[serde(default)]
    pub guide_id: Option<String>,
    #[serde(default)]
    pub vehicle_id: Option<String>,
    #[serde(default = "default_true")]
    pub visible_in_planner: bool,
    #[serde(default = "default_index")]
    pub index: u32,
    #[serde(default)]
    pub notes: String,
}

fn default_true() -> bool {
    true
}

fn default_index() -> u32 {
    1
}

impl TourGroup {
    pub fn new(product_id: impl Into<String>, date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            id: TourGroupId::new(),
            product_id: product_id.into(),
            product: String::new(),
            option_id: String::new(),
            start_time_id: String::new(),
            date: date.into(),
            time: time.into(),
            bookings: Vec::new(),
            guide_id: None,
            vehicle_id: None,
            visible_in_planner: true,
            index: 1,
            notes: String::new(),
        }
    }
}

/// One zone's availability inside a [`TicketsAvailability`] record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketSlot {
    pub zone: String,
    pub id: String,
    pub avail: String,
}

/// Ticket availability of a site on a date
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketsAvailability {
    pub place: String,
    pub placedate: String,
    /// Natural key, `place` followed by `placedate`
    pub id: String,
    pub slots: Vec<TicketSlot>,
}

impl TicketsAvailability {
    pub fn new(place: impl Into<String>, placedate: impl Into<String>) -> Self {
        Self {
            place: place.into(),
            placedate: placedate.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_keeps_unknown_fields() {
        let product: Product = serde_json::from_value(json!({
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "title": "Delphi day trip",
            "isPrivate": true,
            "highlights": ["Oracle", "Museum"]
        }))
        .unwrap();

        assert_eq!(product.is_private, Some(true));
        assert_eq!(product.extra["highlights"], json!(["Oracle", "Museum"]));
        assert!(product.slug.is_none());
    }

    #[test]
    fn test_tour_group_defaults() {
        let group: TourGroup = serde_json::from_value(json!({
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "product_id": "p1"
        }))
        .unwrap();
        assert!(group.visible_in_planner);
        assert_eq!(group.index, 1);
        assert_eq!(group.product, "");
    }
}
