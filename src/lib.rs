//! Curio: a gallery explorer for the Met Museum's open-access collection.
//!
//! Curio is a terminal client for browsing the Metropolitan Museum of Art's
//! public collection API. It provides:
//! - Cached keyword search over the collection, results fetched once per term
//! - Lazy per-item hydration with at most one detail fetch per object
//! - Named, ordered, persistent collections backed by JSON file storage
//! - A paged gallery view that reconciles itself as result sets shrink
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI Shell (main.rs)                                │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Session state
//! │  - Action dispatching                               │  ← Reconciliation
//! │  - Page hydration and pruning                       │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Catalog Layer │   │ Store Layer   │   │ View Layer    │
//! │ (catalog/)    │   │ (store/)      │   │ (view/)       │
//! │ - HTTP client │   │ - Results     │   │ - Page math   │
//! │ - Wire models │   │ - Items       │   │ - Clamping    │
//! │ - Validation  │   │ - Collections │   │ - Status      │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Storage, Infrastructure & Domain Layers            │
//! │  - JSON persistence (storage/)                      │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Core types and errors (domain/)                  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: The gallery session, its action surface, and reconciliation
//! - [`catalog`]: Met API client, wire models, and record validation
//! - [`domain`]: Core domain types (items, departments, view descriptors, errors)
//! - [`store`]: In-memory session stores (search results, item details, collections)
//! - [`storage`]: Durable JSON persistence for collections
//! - [`view`]: Pure page resolution over ordered ID lists
//! - [`infrastructure`]: Platform path resolution
//! - [`observability`]: Tracing setup
//!
//! # Session Flow
//!
//! 1. **Startup** (`main.rs`): load [`Config`], initialize tracing, open the
//!    collections file, build a [`GallerySession`](app::GallerySession).
//! 2. **Search**: the first search for a term fetches its ordered object IDs;
//!    every later search for the same term is served from the cache.
//! 3. **Hydration**: each rendered page fetches detail records only for items
//!    never fetched this session, all page fetches running concurrently.
//! 4. **Reconciliation**: items with no usable image (or no valid ID) are
//!    pruned from their originating search results and the current page is
//!    clamped back into range.
//!
//! # Key Design Decisions
//!
//! ## Fetch-Once Caching
//!
//! Both search results and item details are fetched at most once per session
//! and never refetched, even after pruning. Staleness within a session is an
//! accepted trade-off for a gallery that never re-downloads what it has seen.
//!
//! ## Single-Writer State
//!
//! All state lives behind one `&mut` session; network waits suspend
//! cooperatively instead of blocking, so no locks are needed anywhere.
//!
//! ## Degradation over Errors
//!
//! A failed search renders as an empty result set and a corrupt collections
//! file loads as an empty mapping. Only collection mutations surface errors,
//! because those are the operations with user-owned data at stake.

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod store;
pub mod view;

pub use app::{handle_action, GallerySession, Outcome, UserAction};
pub use catalog::{CatalogService, HttpCatalog};
pub use domain::{CurioError, Department, ItemRecord, Result, ViewDescriptor, ViewMode};
pub use storage::JsonStore;

use serde::Deserialize;
use std::path::Path;

/// Number of items per gallery page when the configuration does not say.
pub const DEFAULT_PAGE_SIZE: u32 = 15;

/// Application configuration, loaded from a TOML file.
///
/// All fields are optional in the file; omitted fields take their defaults.
///
/// # Example
///
/// ```toml
/// # ~/.config/curio/config.toml
/// page_size = 20
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base URL of the collection API.
    ///
    /// Overriding this is mainly useful for testing against a local stub.
    pub api_base_url: Option<String>,

    /// Items per gallery page. Default: 15
    pub page_size: u32,

    /// Overrides the directory holding the collections file.
    ///
    /// Default: the platform data directory, e.g. `~/.local/share/curio`.
    pub data_dir: Option<String>,

    /// Tracing level filter, overridden by `RUST_LOG` when set.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"warn"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: None,
            page_size: DEFAULT_PAGE_SIZE,
            data_dir: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Loads the configuration from `path`.
    ///
    /// A missing file is not an error; it yields the default configuration. A
    /// `page_size` of zero is corrected to the default so the view math never
    /// divides by zero.
    ///
    /// # Errors
    ///
    /// Returns [`CurioError::Config`] when the file exists but cannot be read
    /// or is not valid TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(CurioError::Config(format!(
                    "failed to read {}: {err}",
                    path.display()
                )))
            }
        };

        let mut config: Self = toml::from_str(&contents)
            .map_err(|err| CurioError::Config(format!("invalid {}: {err}", path.display())))?;
        if config.page_size == 0 {
            tracing::warn!("page_size 0 is invalid, using default");
            config.page_size = DEFAULT_PAGE_SIZE;
        }
        Ok(config)
    }
}
