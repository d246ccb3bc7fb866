//! Item detail store.
//!
//! This module defines [`ItemDetailStore`], the per-session map from object ID
//! to its hydration state. Items start unfetched (absent from the map), move
//! to [`ItemState::Loading`] when a fetch is claimed, and end as either
//! [`ItemState::Hydrated`] or [`ItemState::Rejected`]. Both end states are
//! terminal for the session: a hydrated record is immutable and a rejected ID
//! is never retried.
//!
//! The store knows nothing about which search terms reference an ID. When a
//! hydration is rejected the orchestrator receives the `{id, reason}` notice
//! and decides which cached result sets to prune.

use crate::catalog::ObjectDefect;
use crate::domain::ItemRecord;
use std::collections::HashMap;

/// Why an item was rejected during hydration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The catalog response carried no object ID.
    MissingId,
    /// The object exists but has no primary image to display.
    MissingImage,
    /// The detail fetch failed at the transport level.
    Network,
}

impl From<ObjectDefect> for RejectReason {
    fn from(defect: ObjectDefect) -> Self {
        match defect {
            ObjectDefect::MissingId => RejectReason::MissingId,
            ObjectDefect::MissingImage => RejectReason::MissingImage,
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::MissingId => f.write_str("missing object ID"),
            RejectReason::MissingImage => f.write_str("missing primary image"),
            RejectReason::Network => f.write_str("fetch failed"),
        }
    }
}

/// Hydration state of a single item.
///
/// The unfetched state has no variant; it is represented by absence from the
/// store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemState {
    /// A detail fetch is in flight.
    Loading,
    /// Full record present; immutable and cached for the session.
    Hydrated(Box<ItemRecord>),
    /// Fetched but unusable. Terminal; never retried.
    Rejected(RejectReason),
}

/// Session store of per-item hydration state.
#[derive(Debug, Default)]
pub struct ItemDetailStore {
    items: HashMap<u64, ItemState>,
}

impl ItemDetailStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the right to hydrate an ID.
    ///
    /// Returns `true` only on the transition from unfetched to `Loading`; the
    /// caller that gets `true` owns the single network call for this ID and
    /// must follow up with [`complete_hydration`](Self::complete_hydration)
    /// or [`reject`](Self::reject). Loading, hydrated, and rejected IDs all
    /// return `false`, which is what makes hydration per-ID idempotent.
    pub fn begin_hydration(&mut self, id: u64) -> bool {
        match self.items.get(&id) {
            Some(_) => false,
            None => {
                self.items.insert(id, ItemState::Loading);
                tracing::trace!(object_id = id, "hydration claimed");
                true
            }
        }
    }

    /// Stores the hydrated record for an ID.
    ///
    /// Applied unconditionally even if the page that requested the fetch is no
    /// longer visible; an off-screen completion is harmless. Hydrated and
    /// rejected states are never overwritten.
    pub fn complete_hydration(&mut self, id: u64, record: ItemRecord) {
        match self.items.get(&id) {
            Some(ItemState::Hydrated(_) | ItemState::Rejected(_)) => {
                tracing::debug!(object_id = id, "ignoring late hydration for settled item");
            }
            _ => {
                tracing::trace!(object_id = id, "item hydrated");
                self.items.insert(id, ItemState::Hydrated(Box::new(record)));
            }
        }
    }

    /// Marks an ID as rejected.
    ///
    /// Terminal for the session. The caller is responsible for pruning the ID
    /// from whatever result set was rendering it.
    pub fn reject(&mut self, id: u64, reason: RejectReason) {
        match self.items.get(&id) {
            Some(ItemState::Hydrated(_) | ItemState::Rejected(_)) => {
                tracing::debug!(object_id = id, "ignoring late rejection for settled item");
            }
            _ => {
                tracing::debug!(object_id = id, reason = %reason, "item rejected");
                self.items.insert(id, ItemState::Rejected(reason));
            }
        }
    }

    /// Current state of an ID, `None` when unfetched. Never triggers a fetch.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&ItemState> {
        self.items.get(&id)
    }

    /// The hydrated record for an ID, if hydration has completed successfully.
    #[must_use]
    pub fn record(&self, id: u64) -> Option<&ItemRecord> {
        match self.items.get(&id) {
            Some(ItemState::Hydrated(record)) => Some(record),
            _ => None,
        }
    }

    /// Whether a fetch for the ID is currently in flight.
    #[must_use]
    pub fn is_loading(&self, id: u64) -> bool {
        matches!(self.items.get(&id), Some(ItemState::Loading))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64) -> ItemRecord {
        ItemRecord {
            id,
            title: Some(format!("Object {id}")),
            artist_display_name: None,
            artist_nationality: None,
            artist_display_bio: None,
            artist_begin_date: None,
            artist_end_date: None,
            artist_role: None,
            artist_gender: None,
            department: None,
            object_name: None,
            object_date: None,
            classification: None,
            dimensions: None,
            tags: vec![],
            culture: None,
            period: None,
            dynasty: None,
            credit_line: None,
            primary_image: format!("https://images.example/{id}.jpg"),
            additional_images: vec![],
            repository: None,
            accession_year: None,
            accession_number: None,
        }
    }

    #[test]
    fn begin_hydration_claims_exactly_once() {
        let mut store = ItemDetailStore::new();
        assert!(store.begin_hydration(7));
        // Repeated concurrent requests before resolution: no second fetch.
        assert!(!store.begin_hydration(7));
        assert!(!store.begin_hydration(7));
        assert!(store.is_loading(7));

        store.complete_hydration(7, record(7));
        assert!(!store.begin_hydration(7));
        assert_eq!(store.record(7).unwrap().id, 7);
    }

    #[test]
    fn rejected_items_are_never_retried() {
        let mut store = ItemDetailStore::new();
        assert!(store.begin_hydration(9));
        store.reject(9, RejectReason::MissingImage);

        assert!(!store.begin_hydration(9));
        assert_eq!(
            store.get(9),
            Some(&ItemState::Rejected(RejectReason::MissingImage))
        );
        assert!(store.record(9).is_none());
    }

    #[test]
    fn unfetched_ids_read_as_none() {
        let store = ItemDetailStore::new();
        assert!(store.get(42).is_none());
        assert!(store.record(42).is_none());
        assert!(!store.is_loading(42));
    }

    #[test]
    fn settled_states_are_not_overwritten() {
        let mut store = ItemDetailStore::new();
        assert!(store.begin_hydration(5));
        store.complete_hydration(5, record(5));

        // A straggling rejection for an already-hydrated item is dropped.
        store.reject(5, RejectReason::Network);
        assert!(store.record(5).is_some());
    }
}
