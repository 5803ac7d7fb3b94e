//! Storage keys and default on-disk locations.

use std::path::PathBuf;

/// Key under which the note collection is stored.
pub const NOTES_STORAGE_KEY: &str = "notes_app_data";

/// Key under which the dark-mode flag is stored.
pub const THEME_STORAGE_KEY: &str = "notes_app_theme";

/// Which keys the stores read and write inside a shared backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub notes_key: String,
    pub theme_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            notes_key: NOTES_STORAGE_KEY.to_string(),
            theme_key: THEME_STORAGE_KEY.to_string(),
        }
    }
}

/// Returns the default database path.
///
/// - Linux: `~/.local/share/notekeep/notes.db`
/// - macOS: `~/Library/Application Support/notekeep/notes.db`
/// - Windows: `%APPDATA%/notekeep/notes.db`
pub fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".local")
                .join("share")
        })
        .join("notekeep")
        .join("notes.db")
}

/// Returns the directory export files are written to by default: the user's
/// documents folder, or the home directory when there is none.
pub fn default_export_directory() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}
