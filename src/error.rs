//! Custom error types for Tourdesk
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Tourdesk operations
#[derive(Error, Debug)]
pub enum TourdeskError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Reading or writing a record failed; the pending commit is aborted
    #[error("Persistence failure: {0}")]
    Persistence(String),

    /// A change record carried a kind the flattener does not handle
    #[error("Unrecognized change kind at '{path}'")]
    UnrecognizedChangeKind { path: String },
}

impl TourdeskError {
    /// Create a "not found" error for wallets
    pub fn wallet_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Wallet",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for bookings
    pub fn booking_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Booking",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a persistence failure
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}

impl From<std::io::Error> for TourdeskError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TourdeskError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Tourdesk operations
pub type TourdeskResult<T> = Result<T, TourdeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = TourdeskError::Config("bad value".into());
        assert_eq!(err.to_string(), "Configuration error: bad value");
    }

    #[test]
    fn test_not_found_error() {
        let err = TourdeskError::wallet_not_found("wal-1234abcd");
        assert_eq!(err.to_string(), "Wallet not found: wal-1234abcd");
        assert!(err.is_not_found());
        assert!(!err.is_persistence());
    }

    #[test]
    fn test_persistence_error() {
        let err = TourdeskError::Persistence("disk full".into());
        assert_eq!(err.to_string(), "Persistence failure: disk full");
        assert!(err.is_persistence());
    }

    #[test]
    fn test_unrecognized_kind_error() {
        let err = TourdeskError::UnrecognizedChangeKind {
            path: "tickets.adults".into(),
        };
        assert_eq!(err.to_string(), "Unrecognized change kind at 'tickets.adults'");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TourdeskError = io_err.into();
        assert!(matches!(err, TourdeskError::Io(_)));
    }
}
