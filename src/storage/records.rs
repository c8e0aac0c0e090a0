//! Collection bindings for every stored record type

use crate::error::{TourdeskError, TourdeskResult};
use crate::models::{
    Booking, BookingId, Category, CategoryId, Money, Product, ProductId, TicketsAvailability,
    TourGroup, TourGroupId, Transaction, TransactionId, Wallet, WalletId,
};

use super::collection::{JsonCollection, Record};

impl Record for Wallet {
    type Id = WalletId;
    const ENTITY: &'static str = "Wallet";

    fn id(&self) -> WalletId {
        self.id
    }
}

impl Record for Category {
    type Id = CategoryId;
    const ENTITY: &'static str = "Category";

    fn id(&self) -> CategoryId {
        self.id
    }
}

impl Record for Transaction {
    type Id = TransactionId;
    const ENTITY: &'static str = "Transaction";

    fn id(&self) -> TransactionId {
        self.id
    }
}

impl Record for Booking {
    type Id = BookingId;
    const ENTITY: &'static str = "Booking";

    fn id(&self) -> BookingId {
        self.id
    }
}

impl Record for Product {
    type Id = ProductId;
    const ENTITY: &'static str = "Product";

    fn id(&self) -> ProductId {
        self.id
    }
}

impl Record for TourGroup {
    type Id = TourGroupId;
    const ENTITY: &'static str = "TourGroup";

    fn id(&self) -> TourGroupId {
        self.id
    }
}

impl Record for TicketsAvailability {
    type Id = String;
    const ENTITY: &'static str = "TicketsAvailability";

    fn id(&self) -> String {
        self.id.clone()
    }
}

impl JsonCollection<Wallet> {
    /// Add `amount` to a wallet's in-memory balance as one atomic step
    ///
    /// Concurrent accruals on the same wallet serialize on the collection's
    /// write lock, so no increment is lost. Returns the updated wallet.
    pub fn accrue(&self, id: &WalletId, amount: Money) -> TourdeskResult<Wallet> {
        let accrued = self
            .modify(id, |wallet| wallet.accrue(amount).map(|_| wallet.clone()))?
            .ok_or_else(|| TourdeskError::wallet_not_found(id.to_string()))?;

        accrued.ok_or_else(|| {
            TourdeskError::Validation(format!(
                "Balance of wallet {} would overflow when adding {}",
                id, amount
            ))
        })
    }
}

impl JsonCollection<Transaction> {
    /// Transactions against one wallet, oldest first
    pub fn by_wallet(&self, wallet: WalletId) -> TourdeskResult<Vec<Transaction>> {
        let mut transactions = self.filter(|t| t.wallet == wallet)?;
        transactions.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
        Ok(transactions)
    }
}
