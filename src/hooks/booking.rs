//! Audit trail for booking updates
//!
//! Before an update payload is applied to a booking, the hook works out which
//! of the payload's fields actually change, flattens them into dotted paths
//! and attaches the list to the newest `updated_at` stamp in the payload.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::audit::{compute_changes, flatten, try_flatten, AuditFilter, ChangeRecord, FlatChange};
use crate::config::AuditSettings;
use crate::error::{TourdeskError, TourdeskResult};

/// Keys that describe storage bookkeeping rather than booking content
pub const BOOKKEEPING_FIELDS: &[&str] = &["_id", "__v", "id", "updated_at", "email_history"];

/// Computes the change list stored with each booking update
#[derive(Debug, Clone)]
pub struct BookingAuditHook {
    filter: AuditFilter,
    strict: bool,
}

impl Default for BookingAuditHook {
    fn default() -> Self {
        Self::new(AuditFilter::default())
    }
}

impl BookingAuditHook {
    /// A strict hook with the given path filter
    pub fn new(filter: AuditFilter) -> Self {
        Self {
            filter,
            strict: true,
        }
    }

    pub fn from_settings(settings: &AuditSettings) -> Self {
        Self {
            filter: settings.filter(),
            strict: settings.strict_kinds,
        }
    }

    /// Silently skip change kinds the flattener does not handle
    pub fn lenient(mut self) -> Self {
        self.strict = false;
        self
    }

    /// Compute the audit trail of applying `update` to `prior`
    ///
    /// Only keys present in `update` are compared; bookkeeping keys are
    /// ignored on both sides. Paths matched by the filter are dropped. When
    /// the payload carries an `updated_at` array whose last element is an
    /// object, that element's `changes` is set to the trail.
    pub fn before_update<T: Serialize>(
        &self,
        prior: &T,
        update: &mut Map<String, Value>,
    ) -> TourdeskResult<Vec<FlatChange>> {
        let prior = match serde_json::to_value(prior)? {
            Value::Object(map) => map,
            _ => {
                return Err(TourdeskError::Validation(
                    "Audited records must serialize to a JSON object".into(),
                ))
            }
        };

        let mut current = Map::new();
        let mut proposed = Map::new();
        for (key, value) in update.iter() {
            if is_bookkeeping(key) {
                continue;
            }
            let before = prior.get(key).cloned().unwrap_or(Value::Null);
            current.insert(key.clone(), without_nested_ids(before));
            proposed.insert(key.clone(), without_nested_ids(value.clone()));
        }

        let records = compute_changes(&Value::Object(current), &Value::Object(proposed));
        let trail = self.trail(&records)?;

        if let Some(Value::Array(stamps)) = update.get_mut("updated_at") {
            if let Some(Value::Object(latest)) = stamps.last_mut() {
                latest.insert("changes".to_string(), serde_json::to_value(&trail)?);
            }
        }

        debug!(changes = trail.len(), "computed booking audit trail");
        Ok(trail)
    }

    /// Flatten and filter a change list according to this hook's policy
    pub fn trail(&self, records: &[ChangeRecord]) -> TourdeskResult<Vec<FlatChange>> {
        let flat = if self.strict {
            try_flatten(records, "")?
        } else {
            flatten(records, "")
        };
        Ok(self.filter.apply(flat))
    }
}

fn is_bookkeeping(key: &str) -> bool {
    BOOKKEEPING_FIELDS.contains(&key)
}

/// Strip `_id` / `__v` from an embedded document such as a pickup location
fn without_nested_ids(value: Value) -> Value {
    match value {
        Value::Object(mut map) => {
            map.retain(|k, _| k != "_id" && k != "__v");
            Value::Object(map)
        }
        other => other,
    }
}
