//! Application layer: the gallery session and its action surface.
//!
//! [`GallerySession`] owns all mutable view state; [`UserAction`] and
//! [`handle_action`] are the command surface frontends drive it through.

pub mod actions;
pub mod handler;
pub mod session;

pub use actions::UserAction;
pub use handler::{handle_action, Outcome};
pub use session::{GallerySession, PruneNotice};
