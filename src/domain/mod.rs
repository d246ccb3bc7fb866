//! Core domain types.
//!
//! This module contains the fundamental types shared across the crate:
//! the catalog item model, the view descriptor, and the central error type.
//! Domain types carry no behavior beyond their own formatting and validation;
//! orchestration lives in [`crate::app`].

pub mod error;
pub mod item;
pub mod view;

pub use error::{CurioError, Result};
pub use item::{Department, ItemRecord};
pub use view::{ViewDescriptor, ViewMode};
