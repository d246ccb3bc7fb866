//! Infrastructure layer for filesystem and environment interactions.

pub mod paths;

pub use paths::{collections_file, config_file, data_dir};
