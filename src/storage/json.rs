//! JSON file-based durable store.
//!
//! This module provides the default persistence backend: a single
//! human-readable JSON file holding the collections mapping. Writes are
//! atomic (write-to-temp + rename) so the file is never left in a corrupt
//! state, even if the process dies mid-save. Reads degrade: a missing or
//! unparseable file loads as the empty mapping with a warning, never a fatal
//! error.

use crate::domain::{CurioError, Result};
use crate::storage::backend::DurableStore;
use crate::storage::models::CollectionsData;
use std::path::{Path, PathBuf};

/// JSON file durable store.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "saved_at": 1724900000,
///   "collections": {
///     "Dragons": [45734, 49698],
///     "Vases": [202228]
///   }
/// }
/// ```
#[derive(Debug)]
pub struct JsonStore {
    /// Path to the JSON file on disk.
    file_path: PathBuf,
}

impl JsonStore {
    /// Creates a JSON store at the given path.
    ///
    /// Parent directories are created eagerly so the first save cannot fail
    /// on a missing directory.
    ///
    /// # Errors
    ///
    /// Returns an error if parent directory creation fails.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Ok(Self { file_path })
    }

    /// The path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl DurableStore for JsonStore {
    fn load(&mut self) -> CollectionsData {
        let contents = match std::fs::read_to_string(&self.file_path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = ?self.file_path, "no stored collections, starting empty");
                return CollectionsData::default();
            }
            Err(err) => {
                tracing::warn!(path = ?self.file_path, error = %err, "failed to read stored collections, starting empty");
                return CollectionsData::default();
            }
        };

        match serde_json::from_str::<CollectionsData>(&contents) {
            Ok(data) => {
                tracing::debug!(
                    version = data.version,
                    collection_count = data.collections.len(),
                    "loaded stored collections"
                );
                data
            }
            Err(err) => {
                tracing::warn!(path = ?self.file_path, error = %err, "stored collections are corrupt, starting empty");
                CollectionsData::default()
            }
        }
    }

    fn save(&mut self, data: &CollectionsData) -> Result<()> {
        let _span = tracing::debug_span!("json_save_collections",
            collection_count = data.collections.len()
        )
        .entered();

        let json = serde_json::to_string_pretty(data)
            .map_err(|e| CurioError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;

        tracing::trace!("renaming temporary file to final location");
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!("collections saved");
        Ok(())
    }
}
