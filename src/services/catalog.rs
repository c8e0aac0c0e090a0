//! Catalog service
//!
//! Saves products, tour groups and ticket availability. Each record runs its
//! [`PreSave`] normalization before it is written; replacing an existing
//! record logs the fields that changed.

use crate::audit::{compute_changes, flatten, EntityType};
use crate::error::TourdeskResult;
use crate::hooks::PreSave;
use crate::models::{Product, ProductId, TicketsAvailability, TourGroup};
use crate::storage::{JsonCollection, Record, Storage};

/// Service for catalog records
pub struct CatalogService<'a> {
    storage: &'a Storage,
}

impl<'a> CatalogService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn save_product(&self, product: Product) -> TourdeskResult<Product> {
        let name = product.title.clone();
        self.store(&self.storage.products, EntityType::Product, name, product)
    }

    pub fn save_tour_group(&self, group: TourGroup) -> TourdeskResult<TourGroup> {
        let name = Some(format!("{} {} {}", group.product_id, group.date, group.time));
        self.store(&self.storage.tour_groups, EntityType::TourGroup, name, group)
    }

    pub fn save_tickets(&self, tickets: TicketsAvailability) -> TourdeskResult<TicketsAvailability> {
        let name = Some(tickets.place.clone());
        self.store(
            &self.storage.tickets,
            EntityType::TicketsAvailability,
            name,
            tickets,
        )
    }

    /// Find a product by slug or id
    pub fn find_product(&self, identifier: &str) -> TourdeskResult<Option<Product>> {
        let identifier = identifier.trim();
        if let Some(product) = self
            .storage
            .products
            .find(|p| p.slug.as_deref() == Some(identifier))?
        {
            return Ok(Some(product));
        }

        if let Ok(id) = identifier.parse::<ProductId>() {
            return self.storage.products.get(&id);
        }

        let mut matches = self
            .storage
            .products
            .filter(|p| p.id.matches_short(identifier))?;
        if matches.len() == 1 {
            return Ok(matches.pop());
        }

        Ok(None)
    }

    pub fn list_products(&self) -> TourdeskResult<Vec<Product>> {
        self.storage.products.get_all()
    }

    pub fn list_tour_groups(&self) -> TourdeskResult<Vec<TourGroup>> {
        let mut groups = self.storage.tour_groups.get_all()?;
        groups.sort_by(|a, b| (&a.date, &a.time, a.index).cmp(&(&b.date, &b.time, b.index)));
        Ok(groups)
    }

    pub fn get_tickets(&self, place: &str, placedate: &str) -> TourdeskResult<Option<TicketsAvailability>> {
        self.storage.tickets.get(&format!("{}{}", place, placedate))
    }

    fn store<T: Record + PreSave>(
        &self,
        collection: &JsonCollection<T>,
        entity_type: EntityType,
        name: Option<String>,
        mut record: T,
    ) -> TourdeskResult<T> {
        record.pre_save();
        let previous = collection.get(&record.id())?;

        collection.upsert(record.clone())?;
        collection.save()?;

        let id = record.id().to_string();
        match previous {
            Some(previous) => {
                let before = serde_json::to_value(&previous)?;
                let after = serde_json::to_value(&record)?;
                let changes = flatten(&compute_changes(&before, &after), "");
                self.storage
                    .log_update(entity_type, id, name, &previous, &record, changes);
            }
            None => self.storage.log_create(entity_type, id, name, &record),
        }

        Ok(record)
    }
}
