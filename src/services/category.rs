//! Category service

use crate::audit::EntityType;
use crate::error::{TourdeskError, TourdeskResult};
use crate::models::{Category, CategoryId};
use crate::storage::Storage;

/// Service for transaction categories
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new category
    pub fn create(&self, title: &str, user: &str) -> TourdeskResult<Category> {
        let title = title.trim();

        if self.get_by_title(title)?.is_some() {
            return Err(TourdeskError::Duplicate {
                entity_type: "Category",
                identifier: title.to_string(),
            });
        }

        let category = Category::new(title, user.trim());
        category.validate().map_err(TourdeskError::Validation)?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_create(
            EntityType::Category,
            category.id.to_string(),
            Some(category.title.clone()),
            &category,
        );

        Ok(category)
    }

    pub fn get_by_title(&self, title: &str) -> TourdeskResult<Option<Category>> {
        let title = title.trim().to_lowercase();
        self.storage
            .categories
            .find(|c| c.title.to_lowercase() == title)
    }

    /// Find a category by title or ID string
    pub fn find(&self, identifier: &str) -> TourdeskResult<Option<Category>> {
        if let Some(category) = self.get_by_title(identifier)? {
            return Ok(Some(category));
        }

        if let Ok(id) = identifier.parse::<CategoryId>() {
            return self.storage.categories.get(&id);
        }

        let mut matches = self
            .storage
            .categories
            .filter(|c| c.id.matches_short(identifier))?;
        if matches.len() == 1 {
            return Ok(matches.pop());
        }

        Ok(None)
    }

    pub fn require(&self, identifier: &str) -> TourdeskResult<Category> {
        self.find(identifier)?
            .ok_or_else(|| TourdeskError::category_not_found(identifier))
    }

    /// All categories, ordered by title
    pub fn list(&self) -> TourdeskResult<Vec<Category>> {
        let mut categories = self.storage.categories.get_all()?;
        categories.sort_by_key(|c| c.title.to_lowercase());
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TourdeskPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TourdeskPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_create_and_find() {
        let (_temp, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let fuel = service.create("Fuel", "nikos").unwrap();
        assert_eq!(service.find("fuel").unwrap().unwrap().id, fuel.id);
        assert_eq!(service.find(&fuel.id.to_string()).unwrap().unwrap().id, fuel.id);
        assert!(service.require("Tolls").unwrap_err().is_not_found());
    }

    #[test]
    fn test_duplicate_and_empty() {
        let (_temp, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        service.create("Tickets", "maria").unwrap();

        assert!(matches!(
            service.create("tickets", "maria").unwrap_err(),
            TourdeskError::Duplicate { .. }
        ));
        assert!(service.create(" ", "maria").unwrap_err().is_validation());
    }

    #[test]
    fn test_list_sorted() {
        let (_temp, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        service.create("Tolls", "u").unwrap();
        service.create("Fuel", "u").unwrap();

        let titles: Vec<_> = service.list().unwrap().into_iter().map(|c| c.title).collect();
        assert_eq!(titles, vec!["Fuel", "Tolls"]);
    }
}
