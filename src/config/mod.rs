//! Configuration module for Tourdesk
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - Settings persistence (currency, logging, audit filtering)

pub mod paths;
pub mod settings;

pub use paths::TourdeskPaths;
pub use settings::{AuditSettings, Settings};
