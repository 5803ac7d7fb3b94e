//! Error types for the Notekeep core library.

use thiserror::Error;

/// All errors that can occur within the Notekeep core library.
#[derive(Debug, Error)]
pub enum NotekeepError {
    /// A SQLite operation failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A key-value backend failed for a reason other than SQLite.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A note ID was requested that does not exist in the collection.
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    /// A required field was empty when trying to save a note.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Persisted or imported data is well-formed JSON but not a note collection.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// An I/O operation on the filesystem failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Note data could not be serialized to or deserialized from JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias that pins the error type to [`NotekeepError`].
pub type Result<T> = std::result::Result<T, NotekeepError>;

impl NotekeepError {
    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Database(e) => format!("Failed to save: {e}"),
            Self::Storage(e) => format!("Failed to save: {e}"),
            Self::NoteNotFound(_) => "Note no longer exists".to_string(),
            Self::ValidationFailed(msg) => msg.clone(),
            Self::InvalidFormat(_) => "The data does not contain a list of notes".to_string(),
            Self::Io(e) => format!("File error: {e}"),
            Self::Json(e) => format!("Data format error: {e}"),
        }
    }
}
