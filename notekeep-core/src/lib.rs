//! Core library for Notekeep, a small note-taking application backed by
//! on-device key-value persistence.
//!
//! The primary entry point is [`NotesStore`], the single source of truth for
//! the note collection. [`PreferenceStore`] and [`AppSettings`] hold the theme
//! preference, and the `export` functions move notes in and out of JSON files.
//! Both stores sit on any [`KeyValueStore`]; [`SqliteStore`] is the on-device one.
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use crate::core::{
    codec::{deserialize, parse_import, serialize, serialize_pretty, validate_note},
    config::{
        default_database_path, default_export_directory, StoreConfig, NOTES_STORAGE_KEY,
        THEME_STORAGE_KEY,
    },
    error::{NotekeepError, Result},
    export::{
        export_file_name, export_notes, export_store, import_file_into, import_notes_file,
        ExportError,
    },
    note::{now_millis, sort_by_recent, Note, NoteDraft},
    notes::{ImportSummary, NotesStore},
    preferences::{AppSettings, PreferenceStore, Theme},
    storage::{KeyValueStore, MemoryStore, SqliteStore},
};
