//! Internal domain modules for the Notekeep core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod codec;
pub mod config;
pub mod error;
pub mod export;
pub mod note;
pub mod notes;
pub mod preferences;
pub mod storage;

#[doc(inline)]
pub use config::StoreConfig;
#[doc(inline)]
pub use error::{NotekeepError, Result};
#[doc(inline)]
pub use export::ExportError;
#[doc(inline)]
pub use note::{Note, NoteDraft};
#[doc(inline)]
pub use notes::{ImportSummary, NotesStore};
#[doc(inline)]
pub use preferences::{AppSettings, PreferenceStore, Theme};
#[doc(inline)]
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};
