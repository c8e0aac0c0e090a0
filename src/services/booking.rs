//! Booking service
//!
//! Bookings are updated with partial JSON payloads. Every update appends an
//! [`UpdateStamp`] to the booking's history and records which fields changed.

use serde_json::{Map, Value};
use tracing::info;

use crate::audit::EntityType;
use crate::error::{TourdeskError, TourdeskResult};
use crate::hooks::BookingAuditHook;
use crate::models::{Booking, BookingId, UpdateStamp};
use crate::storage::Storage;

/// Payload keys that never overwrite a stored booking
const PROTECTED_KEYS: &[&str] = &["id", "_id", "__v"];

/// Service for booking management
pub struct BookingService<'a> {
    storage: &'a Storage,
    hook: BookingAuditHook,
}

impl<'a> BookingService<'a> {
    /// Create a booking service using the default audit filter
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            hook: BookingAuditHook::from_settings(&Default::default()),
        }
    }

    pub fn with_hook(mut self, hook: BookingAuditHook) -> Self {
        self.hook = hook;
        self
    }

    /// Store a new booking
    pub fn create(&self, booking: Booking) -> TourdeskResult<Booking> {
        let reference = booking.reference.trim();
        if reference.is_empty() {
            return Err(TourdeskError::Validation(
                "Booking reference cannot be empty".into(),
            ));
        }
        if self.get_by_reference(reference)?.is_some() {
            return Err(TourdeskError::Duplicate {
                entity_type: "Booking",
                identifier: reference.to_string(),
            });
        }

        self.storage.bookings.upsert(booking.clone())?;
        self.storage.bookings.save()?;

        self.storage.log_create(
            EntityType::Booking,
            booking.id.to_string(),
            Some(booking.reference.clone()),
            &booking,
        );

        Ok(booking)
    }

    pub fn get(&self, id: BookingId) -> TourdeskResult<Option<Booking>> {
        self.storage.bookings.get(&id)
    }

    pub fn get_by_reference(&self, reference: &str) -> TourdeskResult<Option<Booking>> {
        let reference = reference.trim();
        self.storage
            .bookings
            .find(|b| b.reference.eq_ignore_ascii_case(reference))
    }

    /// Find a booking by reference, full id or short id
    pub fn find(&self, identifier: &str) -> TourdeskResult<Option<Booking>> {
        if let Some(booking) = self.get_by_reference(identifier)? {
            return Ok(Some(booking));
        }

        if let Ok(id) = identifier.parse::<BookingId>() {
            return self.get(id);
        }

        let mut matches = self
            .storage
            .bookings
            .filter(|b| b.id.matches_short(identifier))?;
        if matches.len() == 1 {
            return Ok(matches.pop());
        }

        Ok(None)
    }

    pub fn require(&self, identifier: &str) -> TourdeskResult<Booking> {
        self.find(identifier)?
            .ok_or_else(|| TourdeskError::booking_not_found(identifier))
    }

    /// All bookings, ordered by tour date then reference
    pub fn list(&self) -> TourdeskResult<Vec<Booking>> {
        let mut bookings = self.storage.bookings.get_all()?;
        bookings.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.reference.cmp(&b.reference)));
        Ok(bookings)
    }

    /// Apply a partial update to a booking
    ///
    /// When the payload has no `updated_at`, a stamp for `user` is appended to
    /// the booking's existing history. The audit hook then records the
    /// changed fields on the newest stamp before the payload is merged.
    pub fn update(
        &self,
        id: BookingId,
        mut payload: Map<String, Value>,
        user: &str,
    ) -> TourdeskResult<Booking> {
        let booking = self.storage.bookings.require(&id)?;

        if !payload.contains_key("updated_at") {
            let mut stamps = booking.updated_at.clone();
            stamps.push(UpdateStamp::now(user));
            payload.insert("updated_at".into(), serde_json::to_value(stamps)?);
        }

        let changes = self.hook.before_update(&booking, &mut payload)?;

        let mut merged = match serde_json::to_value(&booking)? {
            Value::Object(map) => map,
            _ => return Err(TourdeskError::Json("Booking did not serialize to an object".into())),
        };
        for (key, value) in payload {
            if !PROTECTED_KEYS.contains(&key.as_str()) {
                merged.insert(key, value);
            }
        }

        let updated: Booking = serde_json::from_value(Value::Object(merged))
            .map_err(|e| TourdeskError::Validation(format!("Invalid booking update: {}", e)))?;

        self.storage.bookings.upsert(updated.clone())?;
        self.storage.bookings.save()?;

        info!(booking = %updated.id, changes = changes.len(), "updated booking");

        self.storage.log_update(
            EntityType::Booking,
            updated.id.to_string(),
            Some(updated.reference.clone()),
            &booking,
            &updated,
            changes,
        );

        Ok(updated)
    }

    /// The update history of a booking, oldest first
    pub fn history(&self, id: BookingId) -> TourdeskResult<Vec<UpdateStamp>> {
        Ok(self.storage.bookings.require(&id)?.updated_at)
    }
}
