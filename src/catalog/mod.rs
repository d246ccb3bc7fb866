//! External catalog boundary.
//!
//! Everything that talks to (or mimics) the remote museum catalog lives here:
//! the [`CatalogService`] trait, the HTTP client against the live API, and the
//! wire models that trim responses down to the fields the gallery consumes.

pub mod client;
pub mod models;

pub use client::{CatalogService, HttpCatalog, DEFAULT_BASE_URL};
pub use models::{ObjectDefect, ObjectResponse, SearchResponse, TagResponse};
