//! Search-result cache.
//!
//! This module defines [`SearchResultCache`], the per-session map from search
//! term to the ordered object IDs the catalog returned for it. Terms are keys
//! exactly as typed (case-sensitive, untrimmed). Once a term has an entry it
//! is never fetched again for the rest of the session, even after pruning has
//! emptied it: an empty cached set renders as NO RESULTS, not as "go ask the
//! catalog again".
//!
//! A pending-request set gates in-flight searches so that overlapping lookups
//! of the same uncached term issue exactly one network call.

use std::collections::{HashMap, HashSet};

/// Cached result set for one search term.
#[derive(Debug, Clone)]
struct ResultSet {
    /// Object IDs in catalog relevance order. Only ever shrinks.
    ids: Vec<u64>,
    /// True when this entry was synthesized from a failed search rather than
    /// a genuine empty result. Lets the UI offer a retry affordance while
    /// still rendering NO RESULTS.
    failed: bool,
}

/// Session cache of search results, keyed by exact term.
#[derive(Debug, Default)]
pub struct SearchResultCache {
    entries: HashMap<String, ResultSet>,
    /// Terms with a search currently in flight.
    pending: HashSet<String>,
}

impl SearchResultCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the term has a cached entry (possibly pruned to empty).
    ///
    /// This is the "has been searched" test: a term with an entry renders
    /// either results or NO RESULTS, never the idle state.
    #[must_use]
    pub fn contains_term(&self, term: &str) -> bool {
        self.entries.contains_key(term)
    }

    /// The current (possibly pruned) ID list for a term.
    ///
    /// Returns `None` for terms that were never searched. Never triggers a
    /// fetch.
    #[must_use]
    pub fn ids(&self, term: &str) -> Option<&[u64]> {
        self.entries.get(term).map(|set| set.ids.as_slice())
    }

    /// Whether the term's entry came from a failed search.
    #[must_use]
    pub fn search_failed(&self, term: &str) -> bool {
        self.entries.get(term).is_some_and(|set| set.failed)
    }

    /// Claims the right to fetch a term.
    ///
    /// Returns `true` exactly once per uncached term: the caller that gets
    /// `true` must follow up with [`complete_search`](Self::complete_search)
    /// or [`fail_search`](Self::fail_search). Cached or already-pending terms
    /// return `false`, so concurrent lookups never double-fetch.
    pub fn begin_search(&mut self, term: &str) -> bool {
        if self.entries.contains_key(term) || self.pending.contains(term) {
            return false;
        }
        self.pending.insert(term.to_string());
        tracing::debug!(term = %term, "search fetch claimed");
        true
    }

    /// Stores the catalog's ID list for a term, verbatim.
    pub fn complete_search(&mut self, term: &str, ids: Vec<u64>) {
        self.pending.remove(term);
        tracing::debug!(term = %term, result_count = ids.len(), "search results cached");
        self.entries
            .insert(term.to_string(), ResultSet { ids, failed: false });
    }

    /// Records a failed search as an empty, flagged result set.
    ///
    /// The term is cached like any other, so it will not be refetched; the
    /// view shows NO RESULTS and [`search_failed`](Self::search_failed)
    /// reports the degradation.
    pub fn fail_search(&mut self, term: &str) {
        self.pending.remove(term);
        tracing::warn!(term = %term, "search failed, caching empty result set");
        self.entries.insert(
            term.to_string(),
            ResultSet {
                ids: Vec::new(),
                failed: true,
            },
        );
    }

    /// Removes an ID from a term's result set.
    ///
    /// No-op when the term is unknown or the ID is already absent; safe to
    /// call after the set has been pruned to empty. IDs are only ever removed
    /// from entries, never added.
    pub fn prune(&mut self, term: &str, id: u64) {
        if let Some(set) = self.entries.get_mut(term) {
            let before = set.ids.len();
            set.ids.retain(|&existing| existing != id);
            if set.ids.len() != before {
                tracing::debug!(
                    term = %term,
                    object_id = id,
                    remaining = set.ids.len(),
                    "pruned unusable item from results"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_search_claims_exactly_once() {
        let mut cache = SearchResultCache::new();
        assert!(cache.begin_search("dragon"));
        // Second concurrent lookup while the first is in flight.
        assert!(!cache.begin_search("dragon"));

        cache.complete_search("dragon", vec![10, 20, 30]);
        // Cached now: sequential lookups never refetch either.
        assert!(!cache.begin_search("dragon"));
        assert_eq!(cache.ids("dragon"), Some(&[10, 20, 30][..]));
    }

    #[test]
    fn terms_are_case_sensitive_and_untrimmed() {
        let mut cache = SearchResultCache::new();
        cache.complete_search("dragon", vec![1]);
        assert!(cache.contains_term("dragon"));
        assert!(!cache.contains_term("Dragon"));
        assert!(!cache.contains_term("dragon "));
    }

    #[test]
    fn prune_is_idempotent_and_safe_on_empty_sets() {
        let mut cache = SearchResultCache::new();
        cache.complete_search("vase", vec![7]);

        cache.prune("vase", 7);
        assert_eq!(cache.ids("vase"), Some(&[][..]));

        // Already absent, already empty, unknown term: all harmless.
        cache.prune("vase", 7);
        cache.prune("vase", 99);
        cache.prune("unknown", 7);
        assert_eq!(cache.ids("vase"), Some(&[][..]));
    }

    #[test]
    fn pruned_to_empty_still_counts_as_searched() {
        let mut cache = SearchResultCache::new();
        cache.complete_search("vase", vec![7]);
        cache.prune("vase", 7);
        assert!(cache.contains_term("vase"));
        assert!(!cache.begin_search("vase"));
    }

    #[test]
    fn failed_search_is_cached_empty_and_flagged() {
        let mut cache = SearchResultCache::new();
        assert!(cache.begin_search("dragon"));
        cache.fail_search("dragon");

        assert!(cache.contains_term("dragon"));
        assert_eq!(cache.ids("dragon"), Some(&[][..]));
        assert!(cache.search_failed("dragon"));
        assert!(!cache.search_failed("other"));
        // Still never refetched.
        assert!(!cache.begin_search("dragon"));
    }

    #[test]
    fn prune_preserves_relative_order() {
        let mut cache = SearchResultCache::new();
        cache.complete_search("armor", vec![5, 3, 9, 1]);
        cache.prune("armor", 9);
        assert_eq!(cache.ids("armor"), Some(&[5, 3, 1][..]));
    }
}
