//! Durable store abstraction.
//!
//! This module defines the [`DurableStore`] trait that abstracts over the
//! persistence backend holding the user's collections. The trait is minimal
//! by design: collections are the only persisted entity, read once at session
//! start and written back whole on every mutation.

use crate::domain::Result;
use crate::storage::models::CollectionsData;

/// Abstraction over the persistence backend for collections.
///
/// # Implementations
///
/// - [`JsonStore`](crate::storage::JsonStore): JSON file with atomic writes
///   (default)
/// - [`MemoryStore`](crate::storage::MemoryStore): in-memory, for tests and
///   ephemeral sessions
pub trait DurableStore: Send {
    /// Reads the stored collections mapping.
    ///
    /// Infallible by contract: absent or malformed data degrades to the empty
    /// mapping (logged, never propagated), so a corrupt file can never keep
    /// the application from starting.
    fn load(&mut self) -> CollectionsData;

    /// Persists the full collections mapping.
    ///
    /// Must not leave previously stored data corrupted on failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; the caller rolls back the
    /// in-memory mutation it was persisting.
    fn save(&mut self, data: &CollectionsData) -> Result<()>;
}
