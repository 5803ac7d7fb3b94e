//! Note export to and import from standalone JSON files.
//!
//! An export file is the pretty-printed note collection, named after the
//! export date. Import files are untrusted: records without string `id`,
//! `title` and `content` are dropped and missing timestamps default to now.
//! Presenting save/share dialogs is left to the UI.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::core::codec;
use crate::{ImportSummary, KeyValueStore, Note, NotekeepError, NotesStore};

/// Errors specific to export/import operations.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid export format: {0}")]
    InvalidFormat(String),

    #[error("There are no notes to export")]
    NothingToExport,

    #[error("No notes found to import")]
    NothingToImport,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<NotekeepError> for ExportError {
    fn from(e: NotekeepError) -> Self {
        match e {
            NotekeepError::Io(e) => Self::Io(e),
            NotekeepError::Json(e) => Self::Json(e),
            NotekeepError::InvalidFormat(msg) => Self::InvalidFormat(msg),
            other => Self::Storage(other.to_string()),
        }
    }
}

/// File name for an export made on `date`: `notes_export_YYYY-MM-DD.json`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("notes_export_{}.json", date.format("%Y-%m-%d"))
}

/// Writes `notes` as pretty-printed JSON into `dir`, named after today's UTC
/// date. An existing export from the same day is overwritten.
///
/// # Errors
///
/// Returns [`ExportError::NothingToExport`] for an empty collection, or
/// [`ExportError::Io`] if the file cannot be written.
pub fn export_notes<P: AsRef<Path>>(dir: P, notes: &[Note]) -> Result<PathBuf, ExportError> {
    if notes.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let json = codec::serialize_pretty(notes)?;
    let path = dir
        .as_ref()
        .join(export_file_name(chrono::Utc::now().date_naive()));
    fs::write(&path, json)?;

    log::info!("exported {} notes to {}", notes.len(), path.display());
    Ok(path)
}

/// Exports everything currently in `store`.
pub fn export_store<S: KeyValueStore, P: AsRef<Path>>(
    store: &NotesStore<S>,
    dir: P,
) -> Result<PathBuf, ExportError> {
    export_notes(dir, &store.get_all_notes())
}

/// Reads an import file and returns the notes it validly contains.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be read,
/// [`ExportError::Json`] if it is not JSON, and
/// [`ExportError::InvalidFormat`] if it is not a JSON array.
pub fn import_notes_file<P: AsRef<Path>>(path: P) -> Result<Vec<Note>, ExportError> {
    let content = fs::read_to_string(path.as_ref())?;
    let notes = codec::parse_import(&content)?;
    log::info!(
        "parsed {} notes from {}",
        notes.len(),
        path.as_ref().display()
    );
    Ok(notes)
}

/// Reads an import file and merges its notes into `store`.
///
/// # Errors
///
/// Everything [`import_notes_file`] reports, plus
/// [`ExportError::NothingToImport`] when the file holds no valid notes.
pub fn import_file_into<S: KeyValueStore, P: AsRef<Path>>(
    store: &NotesStore<S>,
    path: P,
) -> Result<ImportSummary, ExportError> {
    let notes = import_notes_file(path)?;
    if notes.is_empty() {
        return Err(ExportError::NothingToImport);
    }
    Ok(store.import_notes(&notes))
}
