//! In-memory record collections backed by one JSON file each

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::TourdeskError;

use super::file_io::{read_json, write_json_atomic};

/// A record that can live in a [`JsonCollection`]
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Id: Clone + Eq + Hash + Ord + Display;

    /// Entity name used in error messages
    const ENTITY: &'static str;

    fn id(&self) -> Self::Id;
}

#[derive(Debug, Serialize, Deserialize)]
struct CollectionFile<T> {
    #[serde(default = "Vec::new")]
    records: Vec<T>,
}

impl<T> Default for CollectionFile<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

/// Records of one type, keyed by id, persisted to a single JSON file
pub struct JsonCollection<T: Record> {
    path: PathBuf,
    data: RwLock<HashMap<T::Id, T>>,
}

impl<T: Record> JsonCollection<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(super) fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<T::Id, T>>, TourdeskError> {
        self.data.read().map_err(|e| {
            TourdeskError::Persistence(format!("Failed to acquire {} read lock: {}", T::ENTITY, e))
        })
    }

    pub(super) fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<T::Id, T>>, TourdeskError> {
        self.data.write().map_err(|e| {
            TourdeskError::Persistence(format!("Failed to acquire {} write lock: {}", T::ENTITY, e))
        })
    }

    /// Replace the in-memory records with the file's contents
    pub fn load(&self) -> Result<(), TourdeskError> {
        let file: CollectionFile<T> = read_json(&self.path)?;

        let mut data = self.write()?;
        data.clear();
        for record in file.records {
            data.insert(record.id(), record);
        }

        Ok(())
    }

    /// Write all records to disk, ordered by id
    pub fn save(&self) -> Result<(), TourdeskError> {
        let data = self.read()?;

        let mut records: Vec<T> = data.values().cloned().collect();
        records.sort_by_key(|r| r.id());

        write_json_atomic(&self.path, &CollectionFile { records })
    }

    pub fn get(&self, id: &T::Id) -> Result<Option<T>, TourdeskError> {
        Ok(self.read()?.get(id).cloned())
    }

    /// Like [`get`](Self::get), but a missing record is a `NotFound` error
    pub fn require(&self, id: &T::Id) -> Result<T, TourdeskError> {
        self.get(id)?.ok_or_else(|| TourdeskError::NotFound {
            entity_type: T::ENTITY,
            identifier: id.to_string(),
        })
    }

    /// All records, ordered by id
    pub fn get_all(&self) -> Result<Vec<T>, TourdeskError> {
        let mut records: Vec<T> = self.read()?.values().cloned().collect();
        records.sort_by_key(|r| r.id());
        Ok(records)
    }

    /// First record (in id order) matching `predicate`
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Result<Option<T>, TourdeskError> {
        Ok(self.get_all()?.into_iter().find(|r| predicate(r)))
    }

    /// Records (in id order) matching `predicate`
    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> Result<Vec<T>, TourdeskError> {
        let mut records = self.get_all()?;
        records.retain(|r| predicate(r));
        Ok(records)
    }

    pub fn upsert(&self, record: T) -> Result<(), TourdeskError> {
        self.write()?.insert(record.id(), record);
        Ok(())
    }

    pub fn remove(&self, id: &T::Id) -> Result<Option<T>, TourdeskError> {
        Ok(self.write()?.remove(id))
    }

    /// Apply `f` to a record under the write lock
    ///
    /// Returns `None` if the record does not exist. Read, modification and
    /// write-back happen in one critical section.
    pub fn modify<R>(
        &self,
        id: &T::Id,
        f: impl FnOnce(&mut T) -> R,
    ) -> Result<Option<R>, TourdeskError> {
        let mut data = self.write()?;
        Ok(data.get_mut(id).map(f))
    }

    pub fn contains(&self, id: &T::Id) -> Result<bool, TourdeskError> {
        Ok(self.read()?.contains_key(id))
    }

    pub fn count(&self) -> Result<usize, TourdeskError> {
        Ok(self.read()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: u32,
        text: String,
    }

    impl Record for Note {
        type Id = u32;
        const ENTITY: &'static str = "Note";

        fn id(&self) -> u32 {
            self.id
        }
    }

    fn note(id: u32, text: &str) -> Note {
        Note {
            id,
            text: text.to_string(),
        }
    }

    fn create_test_collection() -> (TempDir, JsonCollection<Note>) {
        let temp_dir = TempDir::new().unwrap();
        let collection = JsonCollection::new(temp_dir.path().join("notes.json"));
        (temp_dir, collection)
    }

    #[test]
    fn test_empty_load() {
        let (_temp, collection) = create_test_collection();
        collection.load().unwrap();
        assert_eq!(collection.count().unwrap(), 0);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp, collection) = create_test_collection();
        collection.upsert(note(2, "b")).unwrap();
        collection.upsert(note(1, "a")).unwrap();
        collection.save().unwrap();

        let reloaded: JsonCollection<Note> = JsonCollection::new(temp.path().join("notes.json"));
        reloaded.load().unwrap();
        assert_eq!(reloaded.get_all().unwrap(), vec![note(1, "a"), note(2, "b")]);
    }

    #[test]
    fn test_require_missing() {
        let (_temp, collection) = create_test_collection();
        let err = collection.require(&7).unwrap_err();
        assert_eq!(err.to_string(), "Note not found: 7");
    }

    #[test]
    fn test_modify() {
        let (_temp, collection) = create_test_collection();
        collection.upsert(note(1, "a")).unwrap();

        let len = collection
            .modify(&1, |n| {
                n.text.push('!');
                n.text.len()
            })
            .unwrap();
        assert_eq!(len, Some(2));
        assert_eq!(collection.get(&1).unwrap().unwrap().text, "a!");

        assert_eq!(collection.modify(&9, |_| ()).unwrap(), None);
    }

    #[test]
    fn test_find_filter_remove() {
        let (_temp, collection) = create_test_collection();
        collection.upsert(note(1, "tour")).unwrap();
        collection.upsert(note(2, "bus")).unwrap();
        collection.upsert(note(3, "tour")).unwrap();

        assert_eq!(collection.find(|n| n.text == "tour").unwrap().unwrap().id, 1);
        assert_eq!(collection.filter(|n| n.text == "tour").unwrap().len(), 2);

        assert!(collection.remove(&2).unwrap().is_some());
        assert!(!collection.contains(&2).unwrap());
    }
}
