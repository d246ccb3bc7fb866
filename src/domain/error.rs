//! Error types for curio.
//!
//! This module defines the centralized error type [`CurioError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for curio operations.
///
/// This enum consolidates all error conditions that can occur while driving the
/// gallery engine, from catalog fetches to storage writes and configuration
/// issues. Variants wrapping external crates use `#[from]` for automatic
/// conversion with `?`.
///
/// Catalog failures (`Network`, `InvalidItem`) are usually *degraded* rather
/// than propagated: a failed search renders as an empty result set and an
/// unusable item is rejected and pruned. They surface as errors only at the
/// boundaries where the caller asked for the record directly.
#[derive(Debug, Error)]
pub enum CurioError {
    /// A catalog request failed at the transport level.
    ///
    /// Carries the HTTP client's error description. Converted from
    /// `reqwest::Error` so catalog calls can use `?`.
    #[error("Network error: {0}")]
    Network(String),

    /// A fetched catalog record is missing required fields.
    ///
    /// Occurs when an object response lacks an object ID or a primary image.
    /// Such items are rejected and pruned from the result set that was
    /// rendering them. The string names the missing field.
    #[error("Invalid item: {0}")]
    InvalidItem(String),

    /// A collection with the given name already exists.
    ///
    /// Returned by `create` and `rename`. The operation is a no-op; persisted
    /// state is untouched.
    #[error("A collection named {0:?} already exists")]
    DuplicateName(String),

    /// No collection with the given name exists.
    ///
    /// Returned by collection mutations targeting an unknown name. The
    /// operation is a no-op; persisted state is untouched.
    #[error("No collection named {0:?}")]
    CollectionNotFound(String),

    /// Storage operation failed.
    ///
    /// Occurs when writing to the durable store fails. The string contains
    /// a description of what went wrong.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically
    /// converts from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid.
    ///
    /// Occurs when the configuration file cannot be parsed or contains
    /// malformed values. The string describes the specific problem.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for CurioError {
    fn from(err: reqwest::Error) -> Self {
        CurioError::Network(err.to_string())
    }
}

/// A specialized `Result` type for curio operations.
///
/// This is a type alias for `std::result::Result<T, CurioError>` that
/// simplifies function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, CurioError>;
