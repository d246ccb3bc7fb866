//! Persistence layer for user collections.
//!
//! Collections are the only entity that survives across sessions. This module
//! provides the [`DurableStore`] trait, the JSON file backend used by the CLI,
//! an in-memory backend for tests, and the versioned on-disk container.

pub mod backend;
pub mod json;
pub mod memory;
pub mod models;

pub use backend::DurableStore;
pub use json::JsonStore;
pub use memory::MemoryStore;
pub use models::{CollectionsData, STORAGE_VERSION};
