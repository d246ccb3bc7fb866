//! Action dispatch.
//!
//! This module implements [`handle_action`], the single entry point through
//! which frontends drive the gallery session. Each action maps onto session
//! operations; any action that lands the user on a (possibly different) page
//! finishes by hydrating that page, so frontends never have to remember to
//! trigger hydration themselves.
//!
//! Collection failures (`DuplicateName`, `CollectionNotFound`) propagate to
//! the caller for UI feedback; by the session's contracts they have already
//! left all state untouched.

use crate::app::actions::UserAction;
use crate::app::session::GallerySession;
use crate::catalog::CatalogService;
use crate::domain::Result;
use crate::storage::DurableStore;

/// What the frontend should do after an action succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The gallery view changed; re-render the current page.
    Refreshed,
    /// An item's detail record is ready (or was found unusable); show it.
    ItemOpened(u64),
    /// Nothing visible changed; show the feedback line.
    Feedback(String),
}

/// Executes a user action against the session.
///
/// # Errors
///
/// Propagates collection errors (duplicate or unknown names) for UI feedback.
/// Search and hydration failures never surface here; they degrade inside the
/// session.
pub async fn handle_action<C: CatalogService, S: DurableStore>(
    session: &mut GallerySession<C, S>,
    action: UserAction,
) -> Result<Outcome> {
    tracing::debug!(action = ?action, "handling action");

    match action {
        UserAction::Search(term) => {
            session.submit_search(&term).await;
            session.hydrate_page().await;
            Ok(Outcome::Refreshed)
        }
        UserAction::GoToPage(page) => {
            session.go_to_page(page);
            session.hydrate_page().await;
            Ok(Outcome::Refreshed)
        }
        UserAction::NextPage => {
            session.next_page();
            session.hydrate_page().await;
            Ok(Outcome::Refreshed)
        }
        UserAction::PrevPage => {
            session.prev_page();
            session.hydrate_page().await;
            Ok(Outcome::Refreshed)
        }
        UserAction::OpenCollection(name) => {
            session.open_collection(&name)?;
            session.hydrate_page().await;
            Ok(Outcome::Refreshed)
        }
        UserAction::ExitCollection => {
            session.exit_collection();
            session.hydrate_page().await;
            Ok(Outcome::Refreshed)
        }
        UserAction::CreateCollection(name) => {
            session.create_collection(&name)?;
            Ok(Outcome::Feedback(format!("created collection {name:?}")))
        }
        UserAction::RenameCollection { from, to } => {
            session.rename_collection(&from, &to)?;
            Ok(Outcome::Feedback(format!(
                "renamed collection {from:?} to {to:?}"
            )))
        }
        UserAction::DestroyCollection(name) => {
            session.destroy_collection(&name)?;
            session.hydrate_page().await;
            Ok(Outcome::Feedback(format!("destroyed collection {name:?}")))
        }
        UserAction::AddToCollection { name, id } => {
            session.add_to_collection(&name, id)?;
            Ok(Outcome::Feedback(format!("added {id} to {name:?}")))
        }
        UserAction::RemoveFromCollection { name, id } => {
            session.remove_from_collection(&name, id)?;
            Ok(Outcome::Feedback(format!("removed {id} from {name:?}")))
        }
        UserAction::OpenItem(id) => {
            session.hydrate_item(id).await;
            Ok(Outcome::ItemOpened(id))
        }
    }
}
