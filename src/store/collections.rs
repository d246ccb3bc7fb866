//! User collection store.
//!
//! This module defines [`CollectionStore`], the map of user-curated, named
//! collections of object IDs. Collections are mutated only by explicit user
//! actions and are the one piece of state that outlives the session: every
//! successful mutation is persisted through the [`DurableStore`] before the
//! operation is considered complete.
//!
//! Mutations either fully apply or fully no-op. When a persist fails the
//! in-memory change is rolled back, so memory never drifts ahead of disk.

use crate::domain::{CurioError, Result};
use crate::storage::{CollectionsData, DurableStore};
use std::collections::BTreeMap;

/// Named, ordered, persisted collections of object IDs.
///
/// Names are unique keys. Each collection preserves insertion order and
/// forbids duplicate IDs (re-adding is a no-op). Loaded once from the durable
/// store at construction; corrupt or absent stored data starts the session
/// with no collections.
#[derive(Debug)]
pub struct CollectionStore<S: DurableStore> {
    collections: BTreeMap<String, Vec<u64>>,
    storage: S,
}

impl<S: DurableStore> CollectionStore<S> {
    /// Loads collections from the durable store.
    pub fn load(mut storage: S) -> Self {
        let data = storage.load();
        tracing::debug!(collection_count = data.collections.len(), "collections loaded");
        Self {
            collections: data.collections,
            storage,
        }
    }

    /// Creates a new empty collection.
    ///
    /// # Errors
    ///
    /// [`CurioError::DuplicateName`] if the name is taken; storage errors if
    /// the persist fails (the collection is then not created).
    pub fn create(&mut self, name: &str) -> Result<()> {
        if self.collections.contains_key(name) {
            return Err(CurioError::DuplicateName(name.to_string()));
        }
        self.collections.insert(name.to_string(), Vec::new());
        if let Err(err) = self.persist() {
            self.collections.remove(name);
            return Err(err);
        }
        tracing::debug!(collection = %name, "collection created");
        Ok(())
    }

    /// Appends an ID to a collection.
    ///
    /// Re-adding an ID that is already present is a successful no-op.
    ///
    /// # Errors
    ///
    /// [`CurioError::CollectionNotFound`] if no such collection exists;
    /// storage errors if the persist fails (the item is then not added).
    pub fn add_item(&mut self, name: &str, id: u64) -> Result<()> {
        let items = self
            .collections
            .get_mut(name)
            .ok_or_else(|| CurioError::CollectionNotFound(name.to_string()))?;
        if items.contains(&id) {
            return Ok(());
        }
        items.push(id);
        if let Err(err) = self.persist() {
            if let Some(items) = self.collections.get_mut(name) {
                items.pop();
            }
            return Err(err);
        }
        tracing::debug!(collection = %name, object_id = id, "item added to collection");
        Ok(())
    }

    /// Removes an ID from a collection.
    ///
    /// Removing an absent ID is a successful no-op.
    ///
    /// # Errors
    ///
    /// [`CurioError::CollectionNotFound`] if no such collection exists;
    /// storage errors if the persist fails (the item is then not removed).
    pub fn remove_item(&mut self, name: &str, id: u64) -> Result<()> {
        let items = self
            .collections
            .get_mut(name)
            .ok_or_else(|| CurioError::CollectionNotFound(name.to_string()))?;
        let Some(position) = items.iter().position(|&existing| existing == id) else {
            return Ok(());
        };
        items.remove(position);
        if let Err(err) = self.persist() {
            if let Some(items) = self.collections.get_mut(name) {
                items.insert(position.min(items.len()), id);
            }
            return Err(err);
        }
        tracing::debug!(collection = %name, object_id = id, "item removed from collection");
        Ok(())
    }

    /// Renames a collection, preserving its items and their order.
    ///
    /// Renaming a collection to its own name is a successful no-op. Renaming
    /// onto an existing name is rejected rather than silently overwriting.
    ///
    /// # Errors
    ///
    /// [`CurioError::CollectionNotFound`] if `old_name` does not exist,
    /// [`CurioError::DuplicateName`] if `new_name` is taken; storage errors
    /// if the persist fails (the rename is then not applied).
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        if new_name == old_name {
            return Ok(());
        }
        if !self.collections.contains_key(old_name) {
            return Err(CurioError::CollectionNotFound(old_name.to_string()));
        }
        if self.collections.contains_key(new_name) {
            return Err(CurioError::DuplicateName(new_name.to_string()));
        }
        let items = self
            .collections
            .remove(old_name)
            .unwrap_or_default();
        self.collections.insert(new_name.to_string(), items);
        if let Err(err) = self.persist() {
            let items = self.collections.remove(new_name).unwrap_or_default();
            self.collections.insert(old_name.to_string(), items);
            return Err(err);
        }
        tracing::debug!(from = %old_name, to = %new_name, "collection renamed");
        Ok(())
    }

    /// Destroys a collection.
    ///
    /// # Errors
    ///
    /// [`CurioError::CollectionNotFound`] if no such collection exists;
    /// storage errors if the persist fails (the collection is then kept).
    pub fn destroy(&mut self, name: &str) -> Result<()> {
        let Some(items) = self.collections.remove(name) else {
            return Err(CurioError::CollectionNotFound(name.to_string()));
        };
        if let Err(err) = self.persist() {
            self.collections.insert(name.to_string(), items);
            return Err(err);
        }
        tracing::debug!(collection = %name, "collection destroyed");
        Ok(())
    }

    /// Whether a collection with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.collections.contains_key(name)
    }

    /// The ordered IDs of a collection, `None` when the name is unknown.
    #[must_use]
    pub fn items(&self, name: &str) -> Option<&[u64]> {
        self.collections.get(name).map(Vec::as_slice)
    }

    /// Collection names with their sizes, for sidebar-style listings.
    pub fn summaries(&self) -> impl Iterator<Item = (&str, usize)> {
        self.collections
            .iter()
            .map(|(name, items)| (name.as_str(), items.len()))
    }

    /// Number of collections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// The underlying durable store, mainly for tests asserting write-through.
    #[must_use]
    pub fn backend(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self) -> Result<()> {
        let data = CollectionsData::now(self.collections.clone());
        self.storage.save(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn empty_store() -> CollectionStore<MemoryStore> {
        CollectionStore::load(MemoryStore::new())
    }

    #[test]
    fn create_rejects_duplicate_names() {
        let mut store = empty_store();
        store.create("Dragons").unwrap();
        assert!(matches!(
            store.create("Dragons"),
            Err(CurioError::DuplicateName(name)) if name == "Dragons"
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn add_item_preserves_order_and_forbids_duplicates() {
        let mut store = empty_store();
        store.create("Dragons").unwrap();
        store.add_item("Dragons", 3).unwrap();
        store.add_item("Dragons", 1).unwrap();
        store.add_item("Dragons", 4).unwrap();
        // Duplicate append is a no-op.
        store.add_item("Dragons", 1).unwrap();
        assert_eq!(store.items("Dragons"), Some(&[3, 1, 4][..]));
    }

    #[test]
    fn mutations_on_unknown_collections_are_surfaced_noops() {
        let mut store = empty_store();
        assert!(matches!(
            store.add_item("Nope", 1),
            Err(CurioError::CollectionNotFound(_))
        ));
        assert!(matches!(
            store.remove_item("Nope", 1),
            Err(CurioError::CollectionNotFound(_))
        ));
        assert!(matches!(
            store.destroy("Nope"),
            Err(CurioError::CollectionNotFound(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn remove_absent_item_is_a_noop() {
        let mut store = empty_store();
        store.create("Vases").unwrap();
        store.add_item("Vases", 7).unwrap();
        store.remove_item("Vases", 99).unwrap();
        assert_eq!(store.items("Vases"), Some(&[7][..]));
    }

    #[test]
    fn rename_preserves_membership_and_order() {
        let mut store = empty_store();
        store.create("A").unwrap();
        for id in [3, 1, 4] {
            store.add_item("A", id).unwrap();
        }
        store.rename("A", "B").unwrap();
        assert!(!store.contains("A"));
        assert_eq!(store.items("B"), Some(&[3, 1, 4][..]));
    }

    #[test]
    fn rename_to_existing_name_is_rejected() {
        let mut store = empty_store();
        store.create("A").unwrap();
        store.create("B").unwrap();
        store.add_item("B", 9).unwrap();
        assert!(matches!(
            store.rename("A", "B"),
            Err(CurioError::DuplicateName(_))
        ));
        // Nothing was overwritten.
        assert_eq!(store.items("B"), Some(&[9][..]));
        assert!(store.contains("A"));
    }

    #[test]
    fn rename_to_same_name_is_a_noop() {
        let mut store = empty_store();
        store.create("A").unwrap();
        let saves_before = store.backend().save_count();
        store.rename("A", "A").unwrap();
        assert_eq!(store.backend().save_count(), saves_before);
    }

    #[test]
    fn every_mutation_is_persisted() {
        let mut store = empty_store();
        store.create("X").unwrap();
        store.add_item("X", 7).unwrap();
        store.rename("X", "Y").unwrap();
        store.remove_item("Y", 7).unwrap();
        store.destroy("Y").unwrap();
        assert_eq!(store.backend().save_count(), 5);
    }

    #[test]
    fn round_trips_through_the_durable_store() {
        let mut store = empty_store();
        store.create("X").unwrap();
        store.add_item("X", 7).unwrap();

        let persisted = store.backend().snapshot().clone();
        let reloaded = CollectionStore::load(MemoryStore::with_data(persisted));
        assert_eq!(reloaded.items("X"), Some(&[7][..]));
    }
}
