//! Wallet service
//!
//! Creation, lookup and listing of wallets. Balances only move through
//! transactions; see [`TransactionService`](super::TransactionService).

use crate::audit::EntityType;
use crate::error::{TourdeskError, TourdeskResult};
use crate::models::{Money, Wallet, WalletId};
use crate::storage::Storage;

/// Service for wallet management
pub struct WalletService<'a> {
    storage: &'a Storage,
}

impl<'a> WalletService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a wallet for `user` with an opening balance
    pub fn create(&self, title: &str, user: &str, opening_balance: Money) -> TourdeskResult<Wallet> {
        let title = title.trim();
        let user = user.trim();

        if self.get_by_title(title)?.is_some() {
            return Err(TourdeskError::Duplicate {
                entity_type: "Wallet",
                identifier: title.to_string(),
            });
        }

        let wallet = Wallet::new(title, user, opening_balance);
        wallet
            .validate()
            .map_err(|e| TourdeskError::Validation(e.to_string()))?;

        self.storage.wallets.upsert(wallet.clone())?;
        self.storage.wallets.save()?;

        self.storage.log_create(
            EntityType::Wallet,
            wallet.id.to_string(),
            Some(wallet.title.clone()),
            &wallet,
        );

        Ok(wallet)
    }

    pub fn get(&self, id: WalletId) -> TourdeskResult<Option<Wallet>> {
        self.storage.wallets.get(&id)
    }

    /// Get a wallet by title (case-insensitive)
    pub fn get_by_title(&self, title: &str) -> TourdeskResult<Option<Wallet>> {
        let title = title.trim().to_lowercase();
        self.storage
            .wallets
            .find(|w| w.title.to_lowercase() == title)
    }

    /// Find a wallet by title, full id or short id
    pub fn find(&self, identifier: &str) -> TourdeskResult<Option<Wallet>> {
        if let Some(wallet) = self.get_by_title(identifier)? {
            return Ok(Some(wallet));
        }

        if let Ok(id) = identifier.parse::<WalletId>() {
            return self.storage.wallets.get(&id);
        }

        let mut matches = self.storage.wallets.filter(|w| w.id.matches_short(identifier))?;
        if matches.len() == 1 {
            return Ok(matches.pop());
        }

        Ok(None)
    }

    /// Like [`find`](Self::find), but a miss is a `NotFound` error
    pub fn require(&self, identifier: &str) -> TourdeskResult<Wallet> {
        self.find(identifier)?
            .ok_or_else(|| TourdeskError::wallet_not_found(identifier))
    }

    /// All wallets, ordered by title
    pub fn list(&self) -> TourdeskResult<Vec<Wallet>> {
        let mut wallets = self.storage.wallets.get_all()?;
        wallets.sort_by_key(|w| w.title.to_lowercase());
        Ok(wallets)
    }
}
