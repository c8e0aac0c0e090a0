//! Wallet balance accrual on transaction commit

use tracing::{debug, error, warn};

use crate::error::{TourdeskError, TourdeskResult};
use crate::models::{Money, Transaction, Wallet};
use crate::storage::Storage;

/// Applies a transaction's amount to its wallet before the transaction is
/// written
///
/// The hook is not idempotent: running it twice for the same transaction
/// moves the balance twice.
pub struct BalanceAccrualHook<'a> {
    storage: &'a Storage,
}

impl<'a> BalanceAccrualHook<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add the transaction's amount to its wallet and persist the wallet
    ///
    /// Fails with `NotFound` when the wallet does not exist and with
    /// `Persistence` when the wallet cannot be written; in both cases the
    /// stored balance is unchanged and the caller must not write the
    /// transaction. An amount that could not be reversed is a `Validation`
    /// error and never reaches the wallet.
    pub fn before_commit(&self, txn: &Transaction) -> TourdeskResult<Wallet> {
        let undo = reversal(txn)?;
        let wallet = self.storage.wallets.accrue(&txn.wallet, txn.amount)?;

        if let Err(err) = self.storage.wallets.save() {
            warn!(wallet = %txn.wallet, transaction = %txn.id, error = %err, "wallet write failed, aborting commit");
            if let Err(restore_err) = self.storage.wallets.accrue(&txn.wallet, undo) {
                error!(wallet = %txn.wallet, error = %restore_err, "could not restore in-memory wallet balance");
            }
            return Err(err);
        }

        debug!(
            wallet = %wallet.id,
            transaction = %txn.id,
            amount = %txn.amount,
            balance = %wallet.balance,
            "accrued transaction into wallet"
        );
        Ok(wallet)
    }

    /// Take a previously accrued amount back out of the wallet and persist it
    ///
    /// Used when the transaction write fails after the wallet was updated.
    pub fn reverse(&self, txn: &Transaction) -> TourdeskResult<Wallet> {
        let wallet = self.storage.wallets.accrue(&txn.wallet, reversal(txn)?)?;
        self.storage.wallets.save()?;
        debug!(wallet = %wallet.id, transaction = %txn.id, "reversed accrual");
        Ok(wallet)
    }

}

fn reversal(txn: &Transaction) -> TourdeskResult<Money> {
    txn.amount.checked_neg().ok_or_else(|| {
        TourdeskError::Validation(format!(
            "Amount {} of transaction {} cannot be reversed",
            txn.amount, txn.id
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TourdeskPaths;
    use crate::models::{CategoryId, WalletId};
    use tempfile::TempDir;

    fn setup(balance: i64) -> (TempDir, Storage, WalletId) {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(TourdeskPaths::with_base_dir(temp.path().to_path_buf())).unwrap();
        let wallet = Wallet::new("Office cash", "maria", Money::from_units(balance));
        let id = wallet.id;
        storage.wallets.upsert(wallet).unwrap();
        storage.wallets.save().unwrap();
        (temp, storage, id)
    }

    fn txn(wallet: WalletId, amount: i64) -> Transaction {
        Transaction::new(wallet, CategoryId::new(), "maria", Money::from_units(amount), "Tolls")
    }

    #[test]
    fn test_accrues_and_persists() {
        let (_temp, storage, id) = setup(100);
        let hook = BalanceAccrualHook::new(&storage);

        let wallet = hook.before_commit(&txn(id, -30)).unwrap();
        assert_eq!(wallet.balance, Money::from_units(70));

        storage.wallets.load().unwrap();
        assert_eq!(
            storage.wallets.get(&id).unwrap().unwrap().balance,
            Money::from_units(70)
        );
    }

    #[test]
    fn test_missing_wallet_is_not_found() {
        let (_temp, storage, _) = setup(100);
        let err = BalanceAccrualHook::new(&storage)
            .before_commit(&txn(WalletId::new(), 10))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_not_idempotent() {
        let (_temp, storage, id) = setup(100);
        let hook = BalanceAccrualHook::new(&storage);
        let t = txn(id, -30);

        hook.before_commit(&t).unwrap();
        let wallet = hook.before_commit(&t).unwrap();
        assert_eq!(wallet.balance, Money::from_units(40));
    }

    #[test]
    fn test_write_failure_restores_balance() {
        let (_temp, storage, id) = setup(100);
        std::fs::remove_file(storage.wallets.path()).unwrap();
        std::fs::create_dir(storage.wallets.path()).unwrap();

        let err = BalanceAccrualHook::new(&storage)
            .before_commit(&txn(id, -30))
            .unwrap_err();
        assert!(err.is_persistence());
        assert_eq!(
            storage.wallets.get(&id).unwrap().unwrap().balance,
            Money::from_units(100)
        );
    }

    #[test]
    fn test_unreversible_amount_is_rejected() {
        let (_temp, storage, id) = setup(100);
        let t = Transaction::new(id, CategoryId::new(), "maria", Money::from_cents(i64::MIN), "Bad");

        let err = BalanceAccrualHook::new(&storage).before_commit(&t).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            storage.wallets.get(&id).unwrap().unwrap().balance,
            Money::from_units(100)
        );
    }

    #[test]
    fn test_reverse() {
        let (_temp, storage, id) = setup(100);
        let hook = BalanceAccrualHook::new(&storage);
        let t = txn(id, 25);

        hook.before_commit(&t).unwrap();
        let wallet = hook.reverse(&t).unwrap();
        assert_eq!(wallet.balance, Money::from_units(100));
    }
}
