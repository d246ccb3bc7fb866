//! Gallery view resolution.
//!
//! Pure functions mapping a view descriptor and its source ID list to the
//! renderable page. All pagination invariants live here.

pub mod resolver;

pub use resolver::{clamp_page, page_count, resolve, GalleryStatus, GalleryView, ViewSource};
