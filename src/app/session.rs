//! The gallery session: single owner of all view state.
//!
//! This module defines [`GallerySession`], the orchestration layer that owns
//! the three stores and the view descriptor and wires their cross-store
//! consequences together. All mutation flows through `&mut self` methods, so
//! the shared-state discipline is single-writer by construction; network
//! suspension is cooperative (`.await`) and never blocks other work on the
//! runtime.
//!
//! # Reconciliation
//!
//! The session enforces the invariants the stores cannot see on their own:
//!
//! - a hydration rejection prunes the ID from the search term that was active
//!   when the fetch was issued, then re-clamps the page against the shrunken
//!   list;
//! - renaming the viewed collection repoints the descriptor in the same
//!   operation;
//! - destroying the viewed collection returns the view to search mode in the
//!   same operation, so the descriptor never dangles.

use crate::catalog::CatalogService;
use crate::domain::{ItemRecord, Result, ViewDescriptor, ViewMode};
use crate::store::{CollectionStore, ItemDetailStore, ItemState, RejectReason, SearchResultCache};
use crate::storage::DurableStore;
use crate::view::{self, GalleryView, ViewSource};
use futures_util::future::join_all;

/// A notice that a hydration found an item unusable.
///
/// Emitted by the hydration path and consumed by the session itself, which
/// decides what to prune; the fetch logic never reaches into the result cache
/// directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneNotice {
    pub id: u64,
    pub reason: RejectReason,
    /// The search term being rendered when the fetch was issued, if any.
    pub origin_term: Option<String>,
}

/// Owns the stores and the view descriptor for one user session.
///
/// Generic over the catalog service and the durable store so tests can drive
/// the full reconciliation loop in memory.
#[derive(Debug)]
pub struct GallerySession<C: CatalogService, S: DurableStore> {
    catalog: C,
    results: SearchResultCache,
    items: ItemDetailStore,
    collections: CollectionStore<S>,
    descriptor: ViewDescriptor,
}

impl<C: CatalogService, S: DurableStore> GallerySession<C, S> {
    /// Creates a session, loading persisted collections from `storage`.
    pub fn new(catalog: C, storage: S, page_size: u32) -> Self {
        Self {
            catalog,
            results: SearchResultCache::new(),
            items: ItemDetailStore::new(),
            collections: CollectionStore::load(storage),
            descriptor: ViewDescriptor::new(page_size),
        }
    }

    /// The current view descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &ViewDescriptor {
        &self.descriptor
    }

    /// Resolves the descriptor into the renderable gallery view.
    #[must_use]
    pub fn current_view(&self) -> GalleryView {
        view::resolve(&self.descriptor, self.current_source())
    }

    /// Submits a search term and retargets the view at it.
    ///
    /// A previously searched term is served from the cache with no network
    /// call, even if pruning has emptied it. An uncached term is fetched once;
    /// a failed fetch degrades to a cached empty result set (rendered as NO
    /// RESULTS, reported by [`search_failed`](Self::search_failed)) rather
    /// than an error. A blank term just returns the view to the idle state.
    pub async fn submit_search(&mut self, term: &str) {
        if term.is_empty() {
            self.descriptor.target_search(term);
            return;
        }

        if self.results.begin_search(term) {
            match self.catalog.search(term).await {
                Ok(ids) => self.results.complete_search(term, ids),
                Err(err) => {
                    tracing::warn!(term = %term, error = %err, "search request failed");
                    self.results.fail_search(term);
                }
            }
        }

        if self.descriptor.mode != ViewMode::Search || self.descriptor.search_term != term {
            self.descriptor.target_search(term);
        }
    }

    /// Hydrates every unfetched item on the current page, repeating until the
    /// page is settled.
    ///
    /// Fetch claims are taken up front, so repeated calls while fetches are in
    /// flight issue no duplicate requests. All claimed fetches run
    /// concurrently; completions are applied in arrival order. Unusable items
    /// (no object ID, no primary image, transport failure) are rejected and
    /// pruned from the search term that was active when the fetch was issued,
    /// after which the page is re-clamped against the shrunken result set.
    ///
    /// Pruning reflows the page: items from further down the list slide into
    /// the visible slice, and a clamp can swap the slice out entirely. Each
    /// pass therefore re-resolves the page and fetches whatever is now visible
    /// and unfetched, stopping when a pass claims nothing. The loop terminates
    /// because every ID is claimed at most once per session.
    pub async fn hydrate_page(&mut self) {
        let origin_term = match self.descriptor.mode {
            ViewMode::Search => Some(self.descriptor.search_term.clone()),
            ViewMode::Collection => None,
        };

        loop {
            let to_fetch: Vec<u64> = self
                .current_view()
                .page_items
                .into_iter()
                .filter(|&id| self.items.begin_hydration(id))
                .collect();
            if to_fetch.is_empty() {
                return;
            }

            tracing::debug!(fetch_count = to_fetch.len(), "hydrating page");
            let catalog = &self.catalog;
            let completions = join_all(
                to_fetch
                    .iter()
                    .map(|&id| async move { (id, catalog.fetch_object(id).await) }),
            )
            .await;

            for (id, outcome) in completions {
                self.apply_hydration(id, outcome, origin_term.as_deref());
            }
            self.reconcile_page();
        }
    }

    /// Hydrates a single item by ID, for direct detail lookups.
    ///
    /// Same claim discipline as [`hydrate_page`](Self::hydrate_page): at most
    /// one fetch per ID per session.
    pub async fn hydrate_item(&mut self, id: u64) {
        if !self.items.begin_hydration(id) {
            return;
        }
        let origin_term = match self.descriptor.mode {
            ViewMode::Search => Some(self.descriptor.search_term.clone()),
            ViewMode::Collection => None,
        };
        let outcome = self.catalog.fetch_object(id).await;
        self.apply_hydration(id, outcome, origin_term.as_deref());
        self.reconcile_page();
    }

    /// Moves to a page, clamped into the valid range for the current view.
    pub fn go_to_page(&mut self, page: u32) {
        let pages = self.current_view().page_count;
        self.descriptor.page = view::clamp_page(page, pages);
    }

    /// Advances one page, saturating at the last.
    pub fn next_page(&mut self) {
        self.go_to_page(self.descriptor.page.saturating_add(1));
    }

    /// Goes back one page, saturating at the first.
    pub fn prev_page(&mut self) {
        self.go_to_page(self.descriptor.page.saturating_sub(1));
    }

    /// Retargets the view at a collection.
    ///
    /// Viewing the already-active collection is a no-op (the page is kept).
    ///
    /// # Errors
    ///
    /// [`CurioError::CollectionNotFound`](crate::domain::CurioError::CollectionNotFound)
    /// if no such collection exists.
    pub fn open_collection(&mut self, name: &str) -> Result<()> {
        if !self.collections.contains(name) {
            return Err(crate::domain::CurioError::CollectionNotFound(
                name.to_string(),
            ));
        }
        if self.descriptor.mode == ViewMode::Collection && self.descriptor.collection_name == name {
            return Ok(());
        }
        self.descriptor.target_collection(name);
        Ok(())
    }

    /// Returns the view to search mode, keeping the last search term.
    pub fn exit_collection(&mut self) {
        self.descriptor.mode = ViewMode::Search;
        self.descriptor.page = 1;
    }

    /// Creates a new empty collection.
    ///
    /// # Errors
    ///
    /// See [`CollectionStore::create`].
    pub fn create_collection(&mut self, name: &str) -> Result<()> {
        self.collections.create(name)
    }

    /// Adds an item to a collection.
    ///
    /// # Errors
    ///
    /// See [`CollectionStore::add_item`].
    pub fn add_to_collection(&mut self, name: &str, id: u64) -> Result<()> {
        self.collections.add_item(name, id)
    }

    /// Removes an item from a collection, re-clamping the page when the
    /// viewed collection shrinks.
    ///
    /// # Errors
    ///
    /// See [`CollectionStore::remove_item`].
    pub fn remove_from_collection(&mut self, name: &str, id: u64) -> Result<()> {
        self.collections.remove_item(name, id)?;
        if self.descriptor.mode == ViewMode::Collection && self.descriptor.collection_name == name {
            self.reconcile_page();
        }
        Ok(())
    }

    /// Renames a collection, repointing the view if it was showing it.
    ///
    /// The repoint happens in the same operation as the rename; the
    /// descriptor is never left referencing the old name.
    ///
    /// # Errors
    ///
    /// See [`CollectionStore::rename`].
    pub fn rename_collection(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        self.collections.rename(old_name, new_name)?;
        if self.descriptor.mode == ViewMode::Collection
            && self.descriptor.collection_name == old_name
        {
            self.descriptor.collection_name = new_name.to_string();
        }
        Ok(())
    }

    /// Destroys a collection, returning the view to search mode if it was
    /// showing it.
    ///
    /// # Errors
    ///
    /// See [`CollectionStore::destroy`].
    pub fn destroy_collection(&mut self, name: &str) -> Result<()> {
        self.collections.destroy(name)?;
        if self.descriptor.mode == ViewMode::Collection && self.descriptor.collection_name == name {
            self.descriptor.collection_name.clear();
            self.exit_collection();
        }
        Ok(())
    }

    /// The hydrated record for an item, if hydration has completed.
    #[must_use]
    pub fn item(&self, id: u64) -> Option<&ItemRecord> {
        self.items.record(id)
    }

    /// The hydration state of an item, `None` when unfetched.
    #[must_use]
    pub fn item_state(&self, id: u64) -> Option<&ItemState> {
        self.items.get(id)
    }

    /// Whether the active search view is showing a degraded (failed) search.
    #[must_use]
    pub fn search_failed(&self) -> bool {
        self.descriptor.mode == ViewMode::Search
            && self.results.search_failed(&self.descriptor.search_term)
    }

    /// Read access to the user's collections.
    #[must_use]
    pub fn collections(&self) -> &CollectionStore<S> {
        &self.collections
    }

    /// Read access to the search-result cache.
    #[must_use]
    pub fn results(&self) -> &SearchResultCache {
        &self.results
    }

    /// The ID list the current descriptor resolves against.
    fn current_source(&self) -> ViewSource<'_> {
        match self.descriptor.mode {
            ViewMode::Search => match self.results.ids(&self.descriptor.search_term) {
                Some(ids) if !self.descriptor.search_term.is_empty() => ViewSource::Ids(ids),
                _ => ViewSource::Idle,
            },
            ViewMode::Collection => ViewSource::Ids(
                self.collections
                    .items(&self.descriptor.collection_name)
                    .unwrap_or(&[]),
            ),
        }
    }

    /// Applies one hydration completion, pruning on rejection.
    fn apply_hydration(
        &mut self,
        id: u64,
        outcome: Result<crate::catalog::ObjectResponse>,
        origin_term: Option<&str>,
    ) {
        match outcome {
            Ok(response) => match response.into_record() {
                Ok(record) => self.items.complete_hydration(id, record),
                Err(defect) => self.handle_prune_notice(PruneNotice {
                    id,
                    reason: defect.into(),
                    origin_term: origin_term.map(str::to_string),
                }),
            },
            Err(err) => {
                tracing::warn!(object_id = id, error = %err, "detail fetch failed");
                self.handle_prune_notice(PruneNotice {
                    id,
                    reason: RejectReason::Network,
                    origin_term: origin_term.map(str::to_string),
                });
            }
        }
    }

    /// Rejects the item and prunes it from the result set that was rendering
    /// it. Collection membership is user-owned and never auto-pruned.
    fn handle_prune_notice(&mut self, notice: PruneNotice) {
        self.items.reject(notice.id, notice.reason);
        if let Some(term) = notice.origin_term.as_deref() {
            self.results.prune(term, notice.id);
        }
    }

    /// Re-establishes the page invariant after the source list changed.
    ///
    /// Runs after every prune and every shrink of the viewed collection, not
    /// only on explicit page changes; only ever corrects downward.
    fn reconcile_page(&mut self) {
        let pages = self.current_view().page_count;
        let clamped = view::clamp_page(self.descriptor.page, pages);
        if clamped != self.descriptor.page {
            tracing::debug!(
                from = self.descriptor.page,
                to = clamped,
                "page clamped after result set shrank"
            );
            self.descriptor.page = clamped;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ObjectResponse;
    use crate::domain::CurioError;
    use crate::storage::MemoryStore;
    use crate::view::GalleryStatus;
    use async_trait::async_trait;
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Catalog backed by fixed fixtures, counting every network call.
    #[derive(Default)]
    struct FakeCatalog {
        searches: HashMap<String, Vec<u64>>,
        objects: HashMap<u64, ObjectResponse>,
        failing_terms: HashSet<String>,
        failing_objects: HashSet<u64>,
        search_calls: AtomicUsize,
        fetch_calls: AtomicUsize,
    }

    impl FakeCatalog {
        fn with_search(mut self, term: &str, ids: &[u64]) -> Self {
            self.searches.insert(term.to_string(), ids.to_vec());
            for &id in ids {
                self.objects.entry(id).or_insert_with(|| usable(id));
            }
            self
        }

        fn with_object(mut self, response: ObjectResponse) -> Self {
            let id = response.object_id.unwrap();
            self.objects.insert(id, response);
            self
        }

        fn with_failing_term(mut self, term: &str) -> Self {
            self.failing_terms.insert(term.to_string());
            self
        }

        fn with_failing_object(mut self, id: u64) -> Self {
            self.failing_objects.insert(id);
            self
        }

        fn search_calls(&self) -> usize {
            self.search_calls.load(Ordering::SeqCst)
        }

        fn fetch_calls(&self) -> usize {
            self.fetch_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CatalogService for FakeCatalog {
        async fn search(&self, term: &str) -> crate::domain::Result<Vec<u64>> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            if self.failing_terms.contains(term) {
                return Err(CurioError::Network("connection refused".to_string()));
            }
            Ok(self.searches.get(term).cloned().unwrap_or_default())
        }

        async fn fetch_object(&self, id: u64) -> crate::domain::Result<ObjectResponse> {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            if self.failing_objects.contains(&id) {
                return Err(CurioError::Network("connection refused".to_string()));
            }
            // An unknown ID answers with an empty body, like the live catalog.
            Ok(self.objects.get(&id).cloned().unwrap_or_default())
        }
    }

    fn usable(id: u64) -> ObjectResponse {
        ObjectResponse {
            object_id: Some(id),
            title: Some(format!("Object {id}")),
            primary_image: Some(format!("https://images.example/{id}.jpg")),
            ..Default::default()
        }
    }

    fn imageless(id: u64) -> ObjectResponse {
        ObjectResponse {
            object_id: Some(id),
            title: Some(format!("Object {id}")),
            ..Default::default()
        }
    }

    fn session(catalog: FakeCatalog, page_size: u32) -> GallerySession<FakeCatalog, MemoryStore> {
        GallerySession::new(catalog, MemoryStore::new(), page_size)
    }

    #[tokio::test]
    async fn search_fetches_once_then_serves_from_cache() {
        let mut session = session(FakeCatalog::default().with_search("vase", &[1, 2, 3]), 10);

        session.submit_search("vase").await;
        session.submit_search("vase").await;

        assert_eq!(session.catalog.search_calls(), 1);
        assert_eq!(session.current_view().page_items, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn failed_search_degrades_to_cached_empty_results() {
        let mut session = session(FakeCatalog::default().with_failing_term("vase"), 10);

        session.submit_search("vase").await;
        assert_eq!(session.current_view().status, GalleryStatus::NoResults);
        assert!(session.search_failed());

        // The failure is cached like any other result; no retry on re-search.
        session.submit_search("vase").await;
        assert_eq!(session.catalog.search_calls(), 1);
    }

    #[tokio::test]
    async fn blank_search_returns_to_idle() {
        let mut session = session(FakeCatalog::default().with_search("vase", &[1]), 10);
        session.submit_search("vase").await;
        session.submit_search("").await;
        assert_eq!(session.current_view().status, GalleryStatus::Idle);
    }

    #[tokio::test]
    async fn page_hydration_fetches_each_item_at_most_once() {
        let mut session = session(FakeCatalog::default().with_search("vase", &[1, 2]), 10);
        session.submit_search("vase").await;

        session.hydrate_page().await;
        session.hydrate_page().await;

        assert_eq!(session.catalog.fetch_calls(), 2);
        assert!(session.item(1).is_some());
        assert!(session.item(2).is_some());
    }

    #[tokio::test]
    async fn imageless_item_is_rejected_and_pruned_from_its_search() {
        let catalog = FakeCatalog::default()
            .with_search("dragon", &[10, 20, 30])
            .with_object(imageless(20));
        let mut session = session(catalog, 10);

        session.submit_search("dragon").await;
        session.hydrate_page().await;

        assert_eq!(session.current_view().page_items, vec![10, 30]);
        assert!(matches!(
            session.item_state(20),
            Some(ItemState::Rejected(RejectReason::MissingImage))
        ));
        // Rejected means settled; re-rendering fetches nothing new.
        session.hydrate_page().await;
        assert_eq!(session.catalog.fetch_calls(), 3);
    }

    #[tokio::test]
    async fn prune_on_last_page_clamps_the_page_down() {
        let catalog = FakeCatalog::default()
            .with_search("dragon", &[10, 20, 30])
            .with_object(imageless(30));
        let mut session = session(catalog, 2);

        session.submit_search("dragon").await;
        session.go_to_page(2);
        session.hydrate_page().await;

        // Page 2 held only the pruned item; the view falls back to page 1.
        let view = session.current_view();
        assert_eq!(session.descriptor().page, 1);
        assert_eq!(view.page_count, 1);
        assert_eq!(view.page_items, vec![10, 20]);
    }

    #[tokio::test]
    async fn reflow_after_prune_hydrates_newly_visible_items() {
        let catalog = FakeCatalog::default()
            .with_search("dragon", &[10, 20, 30])
            .with_object(imageless(20));
        let mut session = session(catalog, 2);

        session.submit_search("dragon").await;
        session.hydrate_page().await;

        // Pruning 20 slid 30 onto page 1; the same pass must have fetched it.
        assert_eq!(session.current_view().page_items, vec![10, 30]);
        assert!(matches!(
            session.item_state(30),
            Some(ItemState::Hydrated(_))
        ));
        assert_eq!(session.catalog.fetch_calls(), 3);
    }

    #[tokio::test]
    async fn transport_failure_rejects_and_prunes_like_a_defect() {
        let catalog = FakeCatalog::default()
            .with_search("vase", &[1, 2])
            .with_failing_object(2);
        let mut session = session(catalog, 10);

        session.submit_search("vase").await;
        session.hydrate_page().await;

        assert_eq!(session.current_view().page_items, vec![1]);
        assert!(matches!(
            session.item_state(2),
            Some(ItemState::Rejected(RejectReason::Network))
        ));
    }

    #[tokio::test]
    async fn rejection_in_collection_view_never_prunes_membership() {
        let catalog = FakeCatalog::default()
            .with_search("vase", &[1])
            .with_object(imageless(7));
        let mut session = session(catalog, 10);
        session.submit_search("vase").await;
        session.create_collection("favorites").unwrap();
        session.add_to_collection("favorites", 7).unwrap();

        session.open_collection("favorites").unwrap();
        session.hydrate_page().await;

        // Membership is user-owned; only the item state records the defect.
        assert_eq!(session.collections().items("favorites").unwrap(), &[7]);
        assert!(matches!(
            session.item_state(7),
            Some(ItemState::Rejected(RejectReason::MissingImage))
        ));
        // The cached search is untouched too.
        assert_eq!(session.results().ids("vase"), Some(&[1][..]));
    }

    #[tokio::test]
    async fn opening_a_missing_collection_is_an_error() {
        let mut session = session(FakeCatalog::default(), 10);
        assert!(matches!(
            session.open_collection("nope"),
            Err(CurioError::CollectionNotFound(_))
        ));
        assert_eq!(session.descriptor().mode, ViewMode::Search);
    }

    #[tokio::test]
    async fn renaming_the_viewed_collection_repoints_the_view() {
        let mut session = session(FakeCatalog::default(), 10);
        session.create_collection("drafts").unwrap();
        session.open_collection("drafts").unwrap();

        session.rename_collection("drafts", "keepers").unwrap();

        assert_eq!(session.descriptor().mode, ViewMode::Collection);
        assert_eq!(session.descriptor().collection_name, "keepers");
    }

    #[tokio::test]
    async fn destroying_the_viewed_collection_returns_to_search() {
        let mut session = session(FakeCatalog::default().with_search("vase", &[1]), 10);
        session.submit_search("vase").await;
        session.create_collection("drafts").unwrap();
        session.open_collection("drafts").unwrap();

        session.destroy_collection("drafts").unwrap();

        assert_eq!(session.descriptor().mode, ViewMode::Search);
        assert_eq!(session.descriptor().search_term, "vase");
        assert_eq!(session.current_view().page_items, vec![1]);
    }

    #[tokio::test]
    async fn removing_from_the_viewed_collection_clamps_the_page() {
        let mut session = session(FakeCatalog::default(), 2);
        session.create_collection("wall").unwrap();
        for id in [1, 2, 3] {
            session.add_to_collection("wall", id).unwrap();
        }
        session.open_collection("wall").unwrap();
        session.go_to_page(2);

        session.remove_from_collection("wall", 3).unwrap();

        assert_eq!(session.descriptor().page, 1);
        assert_eq!(session.current_view().page_items, vec![1, 2]);
    }

    #[tokio::test]
    async fn empty_collection_renders_ready_not_no_results() {
        let mut session = session(FakeCatalog::default(), 10);
        session.create_collection("empty").unwrap();
        session.open_collection("empty").unwrap();
        assert_eq!(session.current_view().status, GalleryStatus::Ready);
    }

    #[tokio::test]
    async fn collections_survive_into_a_new_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("collections.json");
        {
            let store = crate::storage::JsonStore::new(path.clone()).unwrap();
            let mut session = GallerySession::new(FakeCatalog::default(), store, 10);
            session.create_collection("favorites").unwrap();
            session.add_to_collection("favorites", 42).unwrap();
        }

        let store = crate::storage::JsonStore::new(path).unwrap();
        let session = GallerySession::new(FakeCatalog::default(), store, 10);
        assert_eq!(session.collections().items("favorites").unwrap(), &[42]);
    }

    #[tokio::test]
    async fn detail_lookup_hydrates_a_single_item_once() {
        let catalog = FakeCatalog::default().with_object(usable(42));
        let mut session = session(catalog, 10);

        session.hydrate_item(42).await;
        session.hydrate_item(42).await;

        assert_eq!(session.catalog.fetch_calls(), 1);
        assert_eq!(session.item(42).map(|r| r.id), Some(42));
    }
}
