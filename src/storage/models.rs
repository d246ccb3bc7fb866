//! On-disk record models for the persistence layer.
//!
//! This module defines the container serialized to the durable store. It is
//! separate from the in-memory [`CollectionStore`](crate::store::CollectionStore)
//! to keep a clear boundary between storage representation and business logic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current storage format version.
pub const STORAGE_VERSION: u32 = 1;

/// Top-level container persisted to the durable store.
///
/// Wraps the collections mapping with a format version for future migrations
/// and a save timestamp. Collection names map to their object IDs in
/// insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionsData {
    /// Version of the storage format for future migrations.
    pub version: u32,

    /// Unix timestamp of the last save, 0 for never-saved data.
    #[serde(default)]
    pub saved_at: i64,

    /// All collections, name to ordered object IDs.
    #[serde(default)]
    pub collections: BTreeMap<String, Vec<u64>>,
}

impl Default for CollectionsData {
    fn default() -> Self {
        Self {
            version: STORAGE_VERSION,
            saved_at: 0,
            collections: BTreeMap::new(),
        }
    }
}

impl CollectionsData {
    /// Wraps a collections mapping with current version and timestamp.
    #[must_use]
    pub fn now(collections: BTreeMap<String, Vec<u64>>) -> Self {
        Self {
            version: STORAGE_VERSION,
            saved_at: chrono::Utc::now().timestamp(),
            collections,
        }
    }
}
