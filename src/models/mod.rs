//! Record definitions for Tourdesk
//!
//! Wallets, categories and transactions form the ledger; bookings and the
//! catalog records describe tour operations.

pub mod booking;
pub mod catalog;
pub mod category;
pub mod ids;
pub mod money;
pub mod transaction;
pub mod wallet;

pub use booking::{Booking, MeetingPoint, UpdateStamp};
pub use catalog::{Product, TicketSlot, TicketsAvailability, TourGroup};
pub use category::Category;
pub use ids::{BookingId, CategoryId, ProductId, TourGroupId, TransactionId, WalletId};
pub use money::{Money, MoneyParseError};
pub use transaction::{Transaction, TransactionValidationError};
pub use wallet::{Wallet, WalletValidationError};
