//! Storage layer for Tourdesk
//!
//! One JSON file per record collection under the data directory, plus the
//! append-only audit log. Writes are atomic per file; there is no
//! cross-file transaction.

pub mod collection;
pub mod file_io;
mod records;

pub use collection::{JsonCollection, Record};
pub use file_io::{read_json, read_json_required, write_json_atomic};

use serde::Serialize;
use tracing::warn;

use crate::audit::{AuditEntry, AuditLogger, EntityType, FlatChange};
use crate::config::paths::TourdeskPaths;
use crate::error::TourdeskError;
use crate::models::{
    Booking, Category, Product, TicketsAvailability, TourGroup, Transaction, Wallet,
};

/// Main storage coordinator that provides access to all collections
pub struct Storage {
    paths: TourdeskPaths,
    pub wallets: JsonCollection<Wallet>,
    pub categories: JsonCollection<Category>,
    pub transactions: JsonCollection<Transaction>,
    pub bookings: JsonCollection<Booking>,
    pub products: JsonCollection<Product>,
    pub tour_groups: JsonCollection<TourGroup>,
    pub tickets: JsonCollection<TicketsAvailability>,
    audit: AuditLogger,
}

impl Storage {
    /// Create a storage instance, creating the data directory if needed
    pub fn new(paths: TourdeskPaths) -> Result<Self, TourdeskError> {
        paths.ensure_directories()?;

        Ok(Self {
            wallets: JsonCollection::new(paths.wallets_file()),
            categories: JsonCollection::new(paths.categories_file()),
            transactions: JsonCollection::new(paths.transactions_file()),
            bookings: JsonCollection::new(paths.bookings_file()),
            products: JsonCollection::new(paths.products_file()),
            tour_groups: JsonCollection::new(paths.tour_groups_file()),
            tickets: JsonCollection::new(paths.tickets_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &TourdeskPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load every collection from disk
    pub fn load_all(&self) -> Result<(), TourdeskError> {
        self.wallets.load()?;
        self.categories.load()?;
        self.transactions.load()?;
        self.bookings.load()?;
        self.products.load()?;
        self.tour_groups.load()?;
        self.tickets.load()?;
        Ok(())
    }

    /// Save every collection to disk
    pub fn save_all(&self) -> Result<(), TourdeskError> {
        self.wallets.save()?;
        self.categories.save()?;
        self.transactions.save()?;
        self.bookings.save()?;
        self.products.save()?;
        self.tour_groups.save()?;
        self.tickets.save()?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Append a create entry to the audit log
    ///
    /// Called once the record is saved; a failed append is logged and does
    /// not undo or fail the write.
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        self.append(AuditEntry::create(entity_type, entity_id, entity_name, entity));
    }

    /// Append an update entry with both snapshots and the change list
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        changes: Vec<FlatChange>,
    ) {
        self.append(AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            changes,
        ));
    }

    fn append(&self, entry: AuditEntry) {
        if let Err(err) = self.audit.log(&entry) {
            warn!(
                operation = %entry.operation,
                entity = %entry.entity_type,
                id = %entry.entity_id,
                error = %err,
                "audit log write failed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TourdeskPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_save_and_load_all() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TourdeskPaths::with_base_dir(temp_dir.path().to_path_buf());

        let storage = Storage::new(paths.clone()).unwrap();
        let wallet = Wallet::new("Guides float", "eleni", Money::from_units(250));
        let id = wallet.id;
        storage.wallets.upsert(wallet).unwrap();
        storage.save_all().unwrap();

        let reopened = Storage::new(paths).unwrap();
        reopened.load_all().unwrap();
        assert_eq!(
            reopened.wallets.get(&id).unwrap().unwrap().balance,
            Money::from_units(250)
        );
        assert_eq!(reopened.bookings.count().unwrap(), 0);
    }

    #[test]
    fn test_log_create_appends_entry() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TourdeskPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        let category = Category::new("Fuel", "nikos");
        storage.log_create(
            EntityType::Category,
            category.id.to_string(),
            Some(category.title.clone()),
            &category,
        );

        assert_eq!(storage.audit().read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_log_update_keeps_both_snapshots() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TourdeskPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        let before = Category::new("Fuel", "nikos");
        let mut after = before.clone();
        after.title = "Fuel & tolls".into();
        storage.log_update(
            EntityType::Category,
            before.id.to_string(),
            Some(after.title.clone()),
            &before,
            &after,
            Vec::new(),
        );

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries[0].before.as_ref().unwrap()["title"], "Fuel");
        assert_eq!(entries[0].after.as_ref().unwrap()["title"], "Fuel & tolls");
    }

    #[test]
    fn test_unwritable_audit_log_is_not_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TourdeskPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        std::fs::create_dir_all(storage.paths().audit_log()).unwrap();

        let category = Category::new("Fuel", "nikos");
        storage.log_create(EntityType::Category, category.id.to_string(), None, &category);

        assert!(storage.paths().audit_log().is_dir());
    }
}
