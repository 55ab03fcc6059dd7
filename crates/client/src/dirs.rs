//! Platform-specific directory utilities
//!
//! Provides consistent directory paths across different operating systems,
//! following platform conventions for cache and data directories.

use std::path::PathBuf;

const APP_NAME: &str = "hunter";

/// Get the platform-specific log directory
///
/// - macOS: `~/Library/Caches/hunter/logs`
/// - Linux: `~/.cache/hunter/logs` (or `$XDG_CACHE_HOME/hunter/logs`)
/// - Windows: `%LOCALAPPDATA%\hunter\cache\logs`
/// - Fallback: `/tmp/hunter/logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/hunter"))
        .join("logs")
}

/// Get the platform-specific data directory, where guard anchors are kept
///
/// - macOS: `~/Library/Application Support/hunter`
/// - Linux: `~/.local/share/hunter` (or `$XDG_DATA_HOME/hunter`)
/// - Windows: `%APPDATA%\hunter\data`
/// - Fallback: `./hunter_data`
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./hunter_data"))
}
