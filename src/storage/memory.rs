//! In-memory durable store.
//!
//! A [`DurableStore`] that keeps everything in memory. Used by tests and
//! available for ephemeral sessions where nothing should touch the disk.

use crate::domain::Result;
use crate::storage::backend::DurableStore;
use crate::storage::models::CollectionsData;

/// In-memory store; contents live only as long as the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: CollectionsData,
    /// Number of completed saves, readable by tests asserting write-through.
    save_count: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with existing data.
    #[must_use]
    pub fn with_data(data: CollectionsData) -> Self {
        Self {
            data,
            save_count: 0,
        }
    }

    /// How many times `save` has completed.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.save_count
    }

    /// A snapshot of the currently stored data.
    #[must_use]
    pub fn snapshot(&self) -> &CollectionsData {
        &self.data
    }
}

impl DurableStore for MemoryStore {
    fn load(&mut self) -> CollectionsData {
        self.data.clone()
    }

    fn save(&mut self, data: &CollectionsData) -> Result<()> {
        self.data = data.clone();
        self.save_count += 1;
        Ok(())
    }
}
