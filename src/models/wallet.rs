//! Wallet model
//!
//! A wallet holds a running balance. The balance only moves when a
//! transaction against the wallet is committed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::WalletId;
use super::money::Money;

/// A wallet with a running balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: WalletId,

    /// Display title, e.g. "Office cash"
    pub title: String,

    /// Owner of the wallet
    pub user: String,

    pub balance: Money,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Wallet {
    /// Create a wallet with an opening balance
    pub fn new(title: impl Into<String>, user: impl Into<String>, balance: Money) -> Self {
        let now = Utc::now();
        Self {
            id: WalletId::new(),
            title: title.into(),
            user: user.into(),
            balance,
            created_at: now,
            updated_at: now,
        }
    }

    /// Add a signed amount to the balance
    ///
    /// Returns the new balance, or `None` (leaving the wallet untouched) if
    /// the sum overflows.
    pub fn accrue(&mut self, amount: Money) -> Option<Money> {
        let balance = self.balance.checked_add(amount)?;
        self.balance = balance;
        self.updated_at = Utc::now();
        Some(balance)
    }

    pub fn validate(&self) -> Result<(), WalletValidationError> {
        if self.title.trim().is_empty() {
            return Err(WalletValidationError::EmptyTitle);
        }
        if self.user.trim().is_empty() {
            return Err(WalletValidationError::EmptyUser);
        }
        Ok(())
    }
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.user)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletValidationError {
    EmptyTitle,
    EmptyUser,
}

impl fmt::Display for WalletValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Wallet title is required"),
            Self::EmptyUser => write!(f, "Wallet user is required"),
        }
    }
}

impl std::error::Error for WalletValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accrue_adds_signed_amount() {
        let mut wallet = Wallet::new("Office cash", "maria", Money::from_units(100));
        assert_eq!(wallet.accrue(Money::from_units(-30)), Some(Money::from_units(70)));
        assert_eq!(wallet.balance, Money::from_units(70));
    }

    #[test]
    fn test_accrue_overflow_leaves_balance() {
        let mut wallet = Wallet::new("Office cash", "maria", Money::from_cents(i64::MAX));
        assert_eq!(wallet.accrue(Money::from_cents(1)), None);
        assert_eq!(wallet.balance, Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_validate() {
        assert!(Wallet::new("Cash", "maria", Money::zero()).validate().is_ok());
        assert_eq!(
            Wallet::new(" ", "maria", Money::zero()).validate(),
            Err(WalletValidationError::EmptyTitle)
        );
        assert_eq!(
            Wallet::new("Cash", "", Money::zero()).validate(),
            Err(WalletValidationError::EmptyUser)
        );
    }
}
