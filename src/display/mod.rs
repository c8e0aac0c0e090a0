//! Display formatting for terminal output
//!
//! Plain-text tables and detail views for wallets, transactions and bookings.

pub mod booking;
pub mod transaction;
pub mod wallet;

pub use booking::{format_booking_details, format_booking_list, format_changes, format_history};
pub use transaction::format_transaction_register;
pub use wallet::{format_wallet_details, format_wallet_list};
