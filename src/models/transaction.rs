//! Wallet transaction model
//!
//! A transaction is a signed movement of money against exactly one wallet,
//! labelled with one category. The amount is fixed at creation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, TransactionId, WalletId};
use super::money::Money;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    /// Wallet whose balance this transaction moves
    pub wallet: WalletId,

    pub category: CategoryId,

    /// User who recorded the transaction
    pub user: String,

    /// Positive for money in, negative for money out
    pub amount: Money,

    /// Booking date of the movement (defaults to today)
    pub date: NaiveDate,

    pub description: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        wallet: WalletId,
        category: CategoryId,
        user: impl Into<String>,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            wallet,
            category,
            user: user.into(),
            amount,
            date: now.date_naive(),
            description: description.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the movement date
    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn is_outflow(&self) -> bool {
        self.amount.is_negative()
    }

    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.user.trim().is_empty() {
            return Err(TransactionValidationError::MissingUser);
        }
        if self.description.trim().is_empty() {
            return Err(TransactionValidationError::MissingDescription);
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.amount, self.description)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    MissingUser,
    MissingDescription,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingUser => write!(f, "Transaction user is required"),
            Self::MissingDescription => write!(f, "Transaction description is required"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(amount: i64) -> Transaction {
        Transaction::new(
            WalletId::new(),
            CategoryId::new(),
            "maria",
            Money::from_units(amount),
            "Diesel for the minibus",
        )
    }

    #[test]
    fn test_defaults_to_today() {
        let txn = sample(-30);
        assert_eq!(txn.date, Utc::now().date_naive());
        assert!(txn.is_outflow());
    }

    #[test]
    fn test_explicit_date() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        let txn = sample(10).on(date);
        assert_eq!(txn.date, date);
        assert!(!txn.is_outflow());
    }

    #[test]
    fn test_validation() {
        assert!(sample(5).validate().is_ok());

        let mut txn = sample(5);
        txn.description = "  ".into();
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::MissingDescription)
        );

        let mut txn = sample(5);
        txn.user.clear();
        assert_eq!(txn.validate(), Err(TransactionValidationError::MissingUser));
    }
}
