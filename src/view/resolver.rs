//! View resolution and pagination arithmetic.
//!
//! This module turns a [`ViewDescriptor`] plus the ID list it points at into a
//! concrete [`GalleryView`]: the page slice to render, the page count, and the
//! view's status (idle, no results, ready). It is pure, with no store access
//! and no side effects, which is what keeps the reconciliation loop testable:
//! the session feeds it the current list after every change and re-clamps the
//! descriptor from the result.

use crate::domain::{ViewDescriptor, ViewMode};

/// What the resolved ID list means for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryStatus {
    /// Search mode with no term looked up yet; show the neutral idle state.
    Idle,
    /// A searched term resolved to an empty list; show NO RESULTS.
    NoResults,
    /// There is a list to render (possibly an empty collection).
    Ready,
}

/// A resolved, renderable slice of the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryView {
    /// Object IDs of the current page, in source order.
    pub page_items: Vec<u64>,
    /// The page actually rendered (the descriptor's page, defensively
    /// clamped).
    pub page: u32,
    /// Total pages; at least 1 even for an empty list.
    pub page_count: u32,
    /// Length of the full source list.
    pub total: usize,
    pub status: GalleryStatus,
}

/// The ID list a descriptor resolves against.
#[derive(Debug, Clone, Copy)]
pub enum ViewSource<'a> {
    /// Search mode with a term that has never been looked up (or is blank).
    Idle,
    /// An ordered ID list from the search cache or a collection.
    Ids(&'a [u64]),
}

/// Total pages for a list of `total` items at `page_size` per page.
///
/// Always at least 1, so an empty result set still has a valid page 1.
#[must_use]
pub fn page_count(total: usize, page_size: u32) -> u32 {
    let size = page_size.max(1) as usize;
    let pages = total.div_ceil(size);
    u32::try_from(pages).unwrap_or(u32::MAX).max(1)
}

/// Clamps a 1-indexed page into `[1, page_count]`.
///
/// Only ever corrects downward relative to a previously valid page: the page
/// count shrinking under the view (pruning) pulls the page back, but a page
/// that is still justified is returned unchanged.
#[must_use]
pub fn clamp_page(page: u32, page_count: u32) -> u32 {
    page.min(page_count.max(1)).max(1)
}

/// Resolves a descriptor against its source list.
///
/// Computes `page_count = max(1, ceil(total / page_size))` and slices
/// `[(page - 1) * size, page * size)` clamped to bounds. The descriptor's
/// page is clamped defensively here as well, but the session is responsible
/// for writing the clamp back to the descriptor whenever the source shrinks.
#[must_use]
pub fn resolve(descriptor: &ViewDescriptor, source: ViewSource<'_>) -> GalleryView {
    let ids = match source {
        ViewSource::Idle => {
            return GalleryView {
                page_items: Vec::new(),
                page: 1,
                page_count: 1,
                total: 0,
                status: GalleryStatus::Idle,
            };
        }
        ViewSource::Ids(ids) => ids,
    };

    let total = ids.len();
    let pages = page_count(total, descriptor.page_size);
    let page = clamp_page(descriptor.page, pages);

    let size = descriptor.page_size.max(1) as usize;
    let start = (page as usize - 1) * size;
    let end = (start + size).min(total);
    let page_items = if start < total {
        ids[start..end].to_vec()
    } else {
        Vec::new()
    };

    let status = if total == 0 && descriptor.mode == ViewMode::Search {
        GalleryStatus::NoResults
    } else {
        GalleryStatus::Ready
    };

    GalleryView {
        page_items,
        page,
        page_count: pages,
        total,
        status,
    }
}
