//! Filesystem locations for configuration and durable data.
//!
//! This module resolves where the configuration file and the collections file
//! live on the host platform, following the platform's conventional
//! directories (XDG on Linux, the equivalents on macOS and Windows). Both
//! resolvers fall back to the current directory when the platform reports no
//! conventional location, so the application still runs in minimal
//! environments such as containers.

use std::path::{Path, PathBuf};

/// Name of the per-user directory everything lives under.
const APP_DIR: &str = "curio";

/// Returns the data directory where collections are persisted.
///
/// Resolves to `<platform data dir>/curio`, e.g.
/// `~/.local/share/curio` on Linux.
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Returns the path of the collections storage file under `data_dir`.
///
/// Takes the directory rather than resolving it, so a configured data
/// directory override flows through the same path construction.
#[must_use]
pub fn collections_file(data_dir: &Path) -> PathBuf {
    data_dir.join("collections.json")
}

/// Returns the path of the configuration file.
///
/// Resolves to `<platform config dir>/curio/config.toml`, e.g.
/// `~/.config/curio/config.toml` on Linux.
#[must_use]
pub fn config_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_ends_with_app_dir() {
        assert!(data_dir().ends_with(APP_DIR));
    }

    #[test]
    fn collections_file_lives_in_the_given_dir() {
        assert_eq!(
            collections_file(&data_dir()),
            data_dir().join("collections.json")
        );
        assert_eq!(
            collections_file(Path::new("/custom/base")),
            PathBuf::from("/custom/base/collections.json")
        );
    }

    #[test]
    fn config_file_is_toml() {
        assert_eq!(
            config_file().extension().and_then(|e| e.to_str()),
            Some("toml")
        );
    }
}
