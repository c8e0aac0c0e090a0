//! Path management for Tourdesk
//!
//! ## Path Resolution Order
//!
//! 1. `TOURDESK_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory reported by `directories`
//!    (`~/.config/tourdesk` on Linux, `~/Library/Application Support/tourdesk`
//!    on macOS, `%APPDATA%\tourdesk\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::TourdeskError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV_VAR: &str = "TOURDESK_DATA_DIR";

/// Manages all paths used by Tourdesk
#[derive(Debug, Clone)]
pub struct TourdeskPaths {
    base_dir: PathBuf,
}

impl TourdeskPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, TourdeskError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV_VAR) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding one JSON file per record collection
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn wallets_file(&self) -> PathBuf {
        self.data_dir().join("wallets.json")
    }

    pub fn categories_file(&self) -> PathBuf {
        self.data_dir().join("categories.json")
    }

    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    pub fn bookings_file(&self) -> PathBuf {
        self.data_dir().join("bookings.json")
    }

    pub fn products_file(&self) -> PathBuf {
        self.data_dir().join("products.json")
    }

    pub fn tour_groups_file(&self) -> PathBuf {
        self.data_dir().join("tour_groups.json")
    }

    pub fn tickets_file(&self) -> PathBuf {
        self.data_dir().join("tickets_availability.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), TourdeskError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| TourdeskError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| TourdeskError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if Tourdesk has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, TourdeskError> {
    ProjectDirs::from("", "", "tourdesk")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| TourdeskError::Config("Could not determine a home directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TourdeskPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TourdeskPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TourdeskPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.wallets_file(),
            temp_dir.path().join("data").join("wallets.json")
        );
        assert_eq!(
            paths.bookings_file(),
            temp_dir.path().join("data").join("bookings.json")
        );
    }
}
