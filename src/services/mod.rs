//! Service layer for Tourdesk
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, lookups and the commit paths that run record hooks.

pub mod booking;
pub mod catalog;
pub mod category;
pub mod transaction;
pub mod wallet;

pub use booking::BookingService;
pub use catalog::CatalogService;
pub use category::CategoryService;
pub use transaction::{CreateTransactionInput, TransactionService};
pub use wallet::WalletService;
