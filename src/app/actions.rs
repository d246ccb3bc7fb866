//! User actions: the UI-facing command surface.
//!
//! This module defines [`UserAction`], the set of commands a frontend can
//! issue against a gallery session. Frontends translate raw input (CLI
//! commands, key presses, clicks) into actions; the handler executes them and
//! reports an [`Outcome`](crate::app::handler::Outcome) describing what to
//! show. Keeping the surface as one enum keeps every frontend in sync with
//! what the engine can actually do.

/// Commands a frontend can issue against the gallery session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// Submits a search term and shows its first page of results.
    Search(String),

    /// Jumps to a page of the current view (1-indexed, clamped to range).
    GoToPage(u32),

    /// Advances one page.
    NextPage,

    /// Goes back one page.
    PrevPage,

    /// Shows a collection in the gallery.
    OpenCollection(String),

    /// Leaves collection view, returning to the last search.
    ExitCollection,

    /// Creates a new empty collection.
    CreateCollection(String),

    /// Renames a collection. An active view of it follows the rename.
    RenameCollection {
        from: String,
        to: String,
    },

    /// Destroys a collection. An active view of it returns to search mode.
    ///
    /// Destruction is confirmed by the frontend before the action is
    /// dispatched; the engine executes it unconditionally.
    DestroyCollection(String),

    /// Adds an item to a collection.
    AddToCollection {
        name: String,
        id: u64,
    },

    /// Removes an item from a collection.
    RemoveFromCollection {
        name: String,
        id: u64,
    },

    /// Opens an item's detail record, hydrating it if needed.
    OpenItem(u64),
}
