//! The notes store: CRUD and import over a single persisted note collection.

use crate::core::codec;
use crate::core::note::now_millis;
use crate::{KeyValueStore, Note, NotekeepError, Result, StoreConfig};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Counts reported after merging an imported batch into the collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    /// Notes whose id was not in the collection before the import.
    pub added: usize,
    /// Existing notes that were overwritten by the import.
    pub updated: usize,
}

impl ImportSummary {
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.added > 0 || self.updated > 0
    }

    /// The summary shown to the user once an import finishes.
    #[must_use]
    pub fn message(&self) -> String {
        if !self.has_changes() {
            return "No changes were made.".to_string();
        }
        let mut parts = Vec::new();
        if self.added > 0 {
            parts.push(format!("Added {} new notes.", self.added));
        }
        if self.updated > 0 {
            parts.push(format!("Updated {} existing notes.", self.updated));
        }
        parts.join(" ")
    }
}

/// Sole authority over the persisted note collection.
///
/// The whole collection lives as one JSON array under a single key of the
/// backend. Every operation reads the full collection, computes the new one,
/// and writes it back in full; nothing is cached between calls.
///
/// Public operations never return errors. Backend failures, corrupt payloads
/// and missing ids are logged and reported as `None`, `false` or zero counts,
/// leaving the caller to decide what to tell the user.
///
/// Callers issue one operation at a time. Two stores mutating the same key
/// concurrently can lose writes.
pub struct NotesStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> NotesStore<S> {
    /// Creates a store that keeps notes under the default key.
    pub fn new(backend: S) -> Self {
        Self::with_config(backend, &StoreConfig::default())
    }

    pub fn with_config(backend: S, config: &StoreConfig) -> Self {
        Self {
            backend,
            key: config.notes_key.clone(),
        }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Returns every stored note in stored order.
    ///
    /// Returns an empty vector when nothing has been stored yet, or when the
    /// stored payload cannot be read or parsed.
    pub fn get_all_notes(&self) -> Vec<Note> {
        match self.load() {
            Ok(notes) => notes,
            Err(e) => {
                log::warn!("Error loading notes: {e}");
                Vec::new()
            }
        }
    }

    /// Replaces the whole collection with `notes`.
    ///
    /// Returns `false` without writing if `notes` contains a duplicate id or
    /// if the write fails.
    pub fn save_all_notes(&self, notes: &[Note]) -> bool {
        let result = ensure_unique_ids(notes).and_then(|()| self.save(notes));
        recover("save notes", result).is_some()
    }

    /// Creates a note from `title` and `content` (both trimmed) and persists it.
    ///
    /// Returns the stored note, or `None` if the collection could not be
    /// written. On failure nothing is persisted.
    pub fn add_note(&self, title: &str, content: &str) -> Option<Note> {
        recover("add note", self.try_add_note(title, content))
    }

    /// Looks up a note by id.
    pub fn get_note_by_id(&self, id: &str) -> Option<Note> {
        self.get_all_notes().into_iter().find(|note| note.id == id)
    }

    /// Overwrites the title and content of the stored note with `note.id`.
    ///
    /// `id` and `created_at` always come from the stored record; `updated_at`
    /// is refreshed. Returns the note as now stored, or `None` if no note has
    /// that id or the write failed, in which case nothing changes.
    pub fn update_note(&self, note: &Note) -> Option<Note> {
        recover("update note", self.try_update_note(note))
    }

    /// Removes the note with `id`. Returns `false` if there was none.
    pub fn delete_note(&self, id: &str) -> bool {
        recover("delete note", self.try_delete_note(id)).is_some()
    }

    /// Merges an imported batch into the collection by id.
    ///
    /// Entries whose id already exists overwrite that note's title and content
    /// and refresh `updated_at`; the existing `created_at` is kept. Other
    /// entries are appended with their own `created_at` (or now) and a fresh
    /// `updated_at`. Within one batch a later entry with the same id wins.
    /// The merged collection is written once, after the whole batch.
    ///
    /// Returns zero counts if the merge could not be persisted.
    pub fn import_notes(&self, imported: &[Note]) -> ImportSummary {
        recover("import notes", self.try_import_notes(imported)).unwrap_or_default()
    }

    fn load(&self) -> Result<Vec<Note>> {
        match self.backend.get(&self.key)? {
            Some(text) => codec::deserialize(&text),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, notes: &[Note]) -> Result<()> {
        let text = codec::serialize(notes)?;
        self.backend.set(&self.key, &text)
    }

    fn try_add_note(&self, title: &str, content: &str) -> Result<Note> {
        let mut notes = self.load()?;
        let note = Note::create(title, content, now_millis());
        notes.push(note.clone());
        self.save(&notes)?;
        log::debug!("added note {}", note.id);
        Ok(note)
    }

    fn try_update_note(&self, updated: &Note) -> Result<Note> {
        let mut notes = self.load()?;
        let stored = notes
            .iter_mut()
            .find(|note| note.id == updated.id)
            .ok_or_else(|| NotekeepError::NoteNotFound(updated.id.clone()))?;

        stored.title = updated.title.clone();
        stored.content = updated.content.clone();
        stored.updated_at = now_millis().max(stored.updated_at);
        let result = stored.clone();

        self.save(&notes)?;
        log::debug!("updated note {}", result.id);
        Ok(result)
    }

    fn try_delete_note(&self, id: &str) -> Result<()> {
        let mut notes = self.load()?;
        let before = notes.len();
        notes.retain(|note| note.id != id);
        if notes.len() == before {
            return Err(NotekeepError::NoteNotFound(id.to_string()));
        }
        self.save(&notes)?;
        log::debug!("deleted note {id}");
        Ok(())
    }

    fn try_import_notes(&self, imported: &[Note]) -> Result<ImportSummary> {
        let mut notes = self.load()?;
        let preexisting: HashSet<String> = notes.iter().map(|note| note.id.clone()).collect();
        let mut positions: HashMap<String, usize> = notes
            .iter()
            .enumerate()
            .map(|(i, note)| (note.id.clone(), i))
            .collect();
        let mut updated_ids: HashSet<&str> = HashSet::new();
        let mut added = 0;
        let now = now_millis();

        for incoming in imported {
            match positions.get(&incoming.id) {
                Some(&i) => {
                    let stored = &mut notes[i];
                    stored.title = incoming.title.clone();
                    stored.content = incoming.content.clone();
                    if preexisting.contains(&incoming.id) {
                        stored.updated_at = now.max(stored.updated_at);
                        updated_ids.insert(&incoming.id);
                    } else {
                        // Appended earlier in this batch; the later entry replaces it whole.
                        stored.created_at = created_or(incoming, now);
                        stored.updated_at = now;
                    }
                }
                None => {
                    positions.insert(incoming.id.clone(), notes.len());
                    notes.push(Note {
                        id: incoming.id.clone(),
                        title: incoming.title.clone(),
                        content: incoming.content.clone(),
                        created_at: created_or(incoming, now),
                        updated_at: now,
                    });
                    added += 1;
                }
            }
        }

        self.save(&notes)?;
        let summary = ImportSummary {
            added,
            updated: updated_ids.len(),
        };
        log::debug!(
            "imported {} notes: {} added, {} updated",
            imported.len(),
            summary.added,
            summary.updated
        );
        Ok(summary)
    }
}

fn created_or(note: &Note, now: i64) -> i64 {
    if note.created_at != 0 {
        note.created_at
    } else {
        now
    }
}

fn ensure_unique_ids(notes: &[Note]) -> Result<()> {
    let mut seen = HashSet::new();
    for note in notes {
        if !seen.insert(note.id.as_str()) {
            return Err(NotekeepError::ValidationFailed(format!(
                "Duplicate note id: {}",
                note.id
            )));
        }
    }
    Ok(())
}

/// Converts a fallible store operation into the store's soft-failure signal.
fn recover<T>(operation: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(NotekeepError::NoteNotFound(id)) => {
            log::debug!("{operation}: note {id} not found");
            None
        }
        Err(e) => {
            log::error!("Error during {operation}: {e}");
            None
        }
    }
}
