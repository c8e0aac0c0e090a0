//! Tourdesk - back-office records for a tour operator
//!
//! This library keeps wallets and their transactions, bookings with a
//! field-level update history, and the tour catalog, each persisted as a JSON
//! file with an append-only audit log alongside.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `logging`: Tracing subscriber setup for the binary
//! - `models`: Records (wallets, transactions, bookings, catalog)
//! - `audit`: Change records, flattening, diffing and the audit log
//! - `storage`: JSON file collections
//! - `hooks`: Wallet accrual, booking audit trail, pre-save derivations
//! - `services`: Business logic layer
//! - `cli` / `display`: Command handlers and terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use tourdesk::config::{Settings, TourdeskPaths};
//! use tourdesk::storage::Storage;
//!
//! let paths = TourdeskPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths)?;
//! storage.load_all()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod hooks;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{TourdeskError, TourdeskResult};
