//! Transaction category model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::CategoryId;

/// A user-defined label for wallet transactions (fuel, tickets, tips, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
    pub user: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(title: impl Into<String>, user: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            title: title.into(),
            user: user.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check required fields; returns a message suitable for a validation error
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Category title is required".into());
        }
        if self.user.trim().is_empty() {
            return Err("Category user is required".into());
        }
        Ok(())
    }
}
