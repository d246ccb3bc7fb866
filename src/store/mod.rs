//! Session state stores.
//!
//! The three stores behind the gallery view, each an explicit object with a
//! defined read/write contract (never ambient globals):
//!
//! - [`SearchResultCache`]: term → ordered result IDs, pruned as items turn
//!   out to be unusable, never refetched within a session.
//! - [`ItemDetailStore`]: per-ID hydration lifecycle with deduplicated fetch
//!   claims.
//! - [`CollectionStore`]: the user's named collections, persisted through the
//!   durable store on every mutation.
//!
//! The stores do not know about each other. Cross-store consequences (a
//! rejected hydration pruning a search result, a destroyed collection
//! retargeting the view) are wired up by [`crate::app::GallerySession`].

pub mod collections;
pub mod items;
pub mod search_results;

pub use collections::CollectionStore;
pub use items::{ItemDetailStore, ItemState, RejectReason};
pub use search_results::SearchResultCache;
