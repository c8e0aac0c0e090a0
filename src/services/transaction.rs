//! Transaction service
//!
//! The commit path for wallet transactions: validate, accrue the amount into
//! the wallet, then write the transaction. Transactions are immutable once
//! written; nothing re-accrues balances afterwards.

use chrono::NaiveDate;
use tracing::{error, info, warn};

use crate::audit::EntityType;
use crate::error::{TourdeskError, TourdeskResult};
use crate::hooks::BalanceAccrualHook;
use crate::models::{CategoryId, Money, Transaction, TransactionId, WalletId};
use crate::storage::Storage;

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub wallet: WalletId,
    pub category: CategoryId,
    pub user: String,
    pub amount: Money,
    /// Defaults to today
    pub date: Option<NaiveDate>,
    pub description: String,
}

/// Service for wallet transactions
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a transaction and move its wallet's balance
    ///
    /// Fails with `NotFound` if the wallet or category is missing and with
    /// `Persistence` if either write fails. On failure no transaction is
    /// stored and the wallet balance is left as it was.
    pub fn create(&self, input: CreateTransactionInput) -> TourdeskResult<Transaction> {
        if !self.storage.categories.contains(&input.category)? {
            return Err(TourdeskError::category_not_found(input.category.to_string()));
        }

        let mut txn = Transaction::new(
            input.wallet,
            input.category,
            input.user.trim(),
            input.amount,
            input.description.trim(),
        );
        if let Some(date) = input.date {
            txn = txn.on(date);
        }
        txn.validate()
            .map_err(|e| TourdeskError::Validation(e.to_string()))?;

        let hook = BalanceAccrualHook::new(self.storage);
        let wallet = hook.before_commit(&txn)?;

        self.storage.transactions.upsert(txn.clone())?;
        if let Err(err) = self.storage.transactions.save() {
            warn!(transaction = %txn.id, error = %err, "transaction write failed, rolling back");
            self.rollback(&hook, &txn);
            return Err(err);
        }

        self.storage.log_create(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(txn.description.clone()),
            &txn,
        );

        info!(
            transaction = %txn.id,
            wallet = %wallet.id,
            balance = %wallet.balance,
            "recorded transaction"
        );
        Ok(txn)
    }

    /// Best-effort undo of a commit whose transaction write failed
    fn rollback(&self, hook: &BalanceAccrualHook<'_>, txn: &Transaction) {
        if let Err(err) = self.storage.transactions.remove(&txn.id) {
            error!(transaction = %txn.id, error = %err, "could not drop unsaved transaction");
        }
        if let Err(err) = hook.reverse(txn) {
            error!(wallet = %txn.wallet, error = %err, "could not reverse wallet accrual");
        }
    }

    pub fn get(&self, id: TransactionId) -> TourdeskResult<Option<Transaction>> {
        self.storage.transactions.get(&id)
    }

    /// Find a transaction by full or short id
    pub fn find(&self, identifier: &str) -> TourdeskResult<Option<Transaction>> {
        if let Ok(id) = identifier.parse::<TransactionId>() {
            return self.get(id);
        }

        let mut matches = self
            .storage
            .transactions
            .filter(|t| t.id.matches_short(identifier))?;
        if matches.len() == 1 {
            return Ok(matches.pop());
        }

        Ok(None)
    }

    /// Transactions against a wallet, oldest first
    pub fn list_by_wallet(&self, wallet: WalletId) -> TourdeskResult<Vec<Transaction>> {
        self.storage.transactions.by_wallet(wallet)
    }

    /// All transactions, oldest first
    pub fn list(&self) -> TourdeskResult<Vec<Transaction>> {
        let mut transactions = self.storage.transactions.get_all()?;
        transactions.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
        Ok(transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TourdeskPaths;
    use crate::models::{Category, Wallet};
    use tempfile::TempDir;

    struct Fixture {
        _temp: TempDir,
        storage: Storage,
        wallet: WalletId,
        category: CategoryId,
    }

    fn fixture(balance: i64) -> Fixture {
        let temp = TempDir::new().unwrap();
        let paths = TourdeskPaths::with_base_dir(temp.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        let wallet = Wallet::new("Office cash", "maria", Money::from_units(balance));
        let category = Category::new("Tolls", "maria");
        let (wallet_id, category_id) = (wallet.id, category.id);
        storage.wallets.upsert(wallet).unwrap();
        storage.categories.upsert(category).unwrap();
        storage.save_all().unwrap();

        Fixture {
            _temp: temp,
            storage,
            wallet: wallet_id,
            category: category_id,
        }
    }

    fn input(f: &Fixture, amount: i64) -> CreateTransactionInput {
        CreateTransactionInput {
            wallet: f.wallet,
            category: f.category,
            user: "maria".into(),
            amount: Money::from_units(amount),
            date: None,
            description: "Attiki Odos".into(),
        }
    }

    fn stored_balance(f: &Fixture) -> Money {
        f.storage.wallets.load().unwrap();
        f.storage.wallets.get(&f.wallet).unwrap().unwrap().balance
    }

    #[test]
    fn test_create_moves_balance() {
        let f = fixture(100);
        let service = TransactionService::new(&f.storage);

        let txn = service.create(input(&f, -30)).unwrap();

        assert_eq!(stored_balance(&f), Money::from_units(70));
        f.storage.transactions.load().unwrap();
        assert!(f.storage.transactions.contains(&txn.id).unwrap());
        assert_eq!(service.list_by_wallet(f.wallet).unwrap().len(), 1);
    }

    #[test]
    fn test_create_with_explicit_date() {
        let f = fixture(0);
        let mut req = input(&f, 15);
        req.date = NaiveDate::from_ymd_opt(2024, 6, 1);

        let txn = TransactionService::new(&f.storage).create(req).unwrap();
        assert_eq!(txn.date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    }

    #[test]
    fn test_missing_wallet_stores_nothing() {
        let f = fixture(100);
        let mut req = input(&f, 10);
        req.wallet = WalletId::new();

        let err = TransactionService::new(&f.storage).create(req).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(f.storage.transactions.count().unwrap(), 0);
    }

    #[test]
    fn test_missing_category_stores_nothing() {
        let f = fixture(100);
        let mut req = input(&f, 10);
        req.category = CategoryId::new();

        let err = TransactionService::new(&f.storage).create(req).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(stored_balance(&f), Money::from_units(100));
    }

    #[test]
    fn test_validation_runs_before_accrual() {
        let f = fixture(100);
        let mut req = input(&f, 10);
        req.description = "  ".into();

        let err = TransactionService::new(&f.storage).create(req).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(stored_balance(&f), Money::from_units(100));
    }

    #[test]
    fn test_wallet_write_failure_aborts_commit() {
        let f = fixture(100);
        let wallets_path = f.storage.wallets.path().to_path_buf();
        std::fs::remove_file(&wallets_path).unwrap();
        std::fs::create_dir(&wallets_path).unwrap();

        let err = TransactionService::new(&f.storage)
            .create(input(&f, -30))
            .unwrap_err();

        assert!(err.is_persistence());
        assert_eq!(
            f.storage.wallets.get(&f.wallet).unwrap().unwrap().balance,
            Money::from_units(100)
        );
        assert_eq!(f.storage.transactions.count().unwrap(), 0);
    }

    #[test]
    fn test_transaction_write_failure_reverses_accrual() {
        let f = fixture(100);
        let txns_path = f.storage.transactions.path().to_path_buf();
        let _ = std::fs::remove_file(&txns_path);
        std::fs::create_dir(&txns_path).unwrap();

        let err = TransactionService::new(&f.storage)
            .create(input(&f, -30))
            .unwrap_err();

        assert!(err.is_persistence());
        assert_eq!(f.storage.transactions.count().unwrap(), 0);
        assert_eq!(stored_balance(&f), Money::from_units(100));
    }

    #[test]
    fn test_audit_log_failure_keeps_saved_commit() {
        let f = fixture(100);
        std::fs::create_dir_all(f.storage.paths().audit_log()).unwrap();
        let service = TransactionService::new(&f.storage);

        let txn = service.create(input(&f, -30)).unwrap();

        assert_eq!(stored_balance(&f), Money::from_units(70));
        f.storage.transactions.load().unwrap();
        assert_eq!(f.storage.transactions.count().unwrap(), 1);
        assert!(f.storage.transactions.contains(&txn.id).unwrap());
    }

    #[test]
    fn test_find_by_short_id() {
        let f = fixture(100);
        let service = TransactionService::new(&f.storage);
        let txn = service.create(input(&f, 5)).unwrap();

        assert_eq!(service.find(&txn.id.to_string()).unwrap().unwrap().id, txn.id);
        assert_eq!(service.get(txn.id).unwrap().unwrap().id, txn.id);
    }
}
