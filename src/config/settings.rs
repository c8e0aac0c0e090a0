//! User settings for Tourdesk
//!
//! Manages the currency symbol, default log level and the booking audit-trail
//! filter.

use serde::{Deserialize, Serialize};

use super::paths::TourdeskPaths;
use crate::audit::AuditFilter;
use crate::error::TourdeskError;

/// Settings for the booking audit trail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSettings {
    /// Paths dropped from booking audit trails.
    ///
    /// An entry matches a change path exactly, or every path below it when
    /// written as `prefix.*`.
    #[serde(default = "default_ignored_paths")]
    pub ignored_paths: Vec<String>,

    /// Fail booking updates whose diff contains a change kind the flattener
    /// does not handle, instead of silently dropping it
    #[serde(default = "default_strict_kinds")]
    pub strict_kinds: bool,
}

impl AuditSettings {
    /// Build the path filter described by these settings
    pub fn filter(&self) -> AuditFilter {
        AuditFilter::new(self.ignored_paths.iter().cloned())
    }
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            ignored_paths: default_ignored_paths(),
            strict_kinds: default_strict_kinds(),
        }
    }
}

/// User settings for Tourdesk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Default tracing filter when `TOURDESK_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub audit: AuditSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "€".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_ignored_paths() -> Vec<String> {
    vec!["pickup_location".to_string(), "pickup_location.*".to_string()]
}

fn default_strict_kinds() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            log_level: default_log_level(),
            audit: AuditSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &TourdeskPaths) -> Result<Self, TourdeskError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| TourdeskError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| TourdeskError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TourdeskPaths) -> Result<(), TourdeskError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| TourdeskError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| TourdeskError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
