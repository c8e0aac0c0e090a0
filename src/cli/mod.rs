//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod booking;
pub mod catalog;
pub mod category;
pub mod changes;
pub mod transaction;
pub mod wallet;

pub use booking::{handle_booking_command, BookingCommands};
pub use catalog::{
    handle_group_command, handle_product_command, handle_tickets_command, GroupCommands,
    ProductCommands, TicketsCommands,
};
pub use category::{handle_category_command, CategoryCommands};
pub use changes::{handle_audit_command, handle_diff_command, handle_flatten_command};
pub use transaction::{handle_transaction_command, TransactionCommands};
pub use wallet::{handle_wallet_command, WalletCommands};
