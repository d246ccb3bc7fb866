//! View descriptor types.
//!
//! This module defines [`ViewDescriptor`], the single source of truth for what
//! the gallery is showing: which source the IDs come from (a search term or a
//! collection), and where in it the user is paged. The descriptor never stores
//! item data; resolving it against the stores is the view resolver's job.

use serde::{Deserialize, Serialize};

/// Which source the gallery view draws its IDs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    /// Showing results for the descriptor's search term.
    Search,
    /// Showing the descriptor's named collection.
    Collection,
}

/// Describes the currently rendered gallery view.
///
/// `search_term` is meaningful only in [`ViewMode::Search`] and
/// `collection_name` only in [`ViewMode::Collection`]; both are kept so that
/// leaving a collection returns to the previous search. Pages are 1-indexed.
///
/// Invariant: `page` always lies in `[1, max(1, ceil(len / page_size))]` for
/// the current source list. The session re-clamps after every prune and view
/// switch; the descriptor itself never clamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewDescriptor {
    pub mode: ViewMode,
    /// The active search term, exactly as typed (case-sensitive, untrimmed).
    pub search_term: String,
    /// The active collection name.
    pub collection_name: String,
    /// Current page, 1-indexed.
    pub page: u32,
    /// Items per page, fixed for the session.
    pub page_size: u32,
}

impl ViewDescriptor {
    /// Creates a descriptor for an idle search view on page 1.
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            mode: ViewMode::Search,
            search_term: String::new(),
            collection_name: String::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Retargets the view at a search term, resetting to page 1.
    pub fn target_search(&mut self, term: &str) {
        self.mode = ViewMode::Search;
        self.search_term = term.to_string();
        self.page = 1;
    }

    /// Retargets the view at a collection, resetting to page 1.
    pub fn target_collection(&mut self, name: &str) {
        self.mode = ViewMode::Collection;
        self.collection_name = name.to_string();
        self.page = 1;
    }
}
