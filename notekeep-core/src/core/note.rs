//! The note entity and the draft type used by the add/edit flow.

use crate::{NotekeepError, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single note as stored in the persisted collection.
///
/// Timestamps are milliseconds since the Unix epoch. Fields serialize in
/// camelCase (`createdAt`, `updatedAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Note {
    /// Builds a fresh note with a new time-ordered id and both timestamps set to `now`.
    pub(crate) fn create(title: &str, content: &str, now: i64) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            title: title.trim().to_string(),
            content: content.trim().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Title and content as typed by the user, before they reach the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Starts a draft from an existing note, for the edit flow.
    pub fn from_note(note: &Note) -> Self {
        Self::new(note.title.clone(), note.content.clone())
    }

    /// Checks that neither title nor content is blank.
    ///
    /// # Errors
    ///
    /// Returns [`NotekeepError::ValidationFailed`] naming the first blank field.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(NotekeepError::ValidationFailed(
                "Please enter a title.".to_string(),
            ));
        }
        if self.content.trim().is_empty() {
            return Err(NotekeepError::ValidationFailed(
                "Please enter the note content.".to_string(),
            ));
        }
        Ok(())
    }

    /// Applies the draft onto `note`, trimming both fields. Timestamps are left
    /// for the store to maintain.
    pub fn apply_to(&self, note: &Note) -> Note {
        Note {
            title: self.title.trim().to_string(),
            content: self.content.trim().to_string(),
            ..note.clone()
        }
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Orders notes newest-updated first, the order the notes list displays.
pub fn sort_by_recent(notes: &mut [Note]) {
    notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str, updated_at: i64) -> Note {
        Note {
            id: id.to_string(),
            title: format!("Note {id}"),
            content: String::new(),
            created_at: 1,
            updated_at,
        }
    }

    #[test]
    fn test_create_note_trims_and_stamps() {
        let note = Note::create("  Groceries ", " milk, eggs \n", 1_700_000_000_000);
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "milk, eggs");
        assert_eq!(note.created_at, note.updated_at);
        assert!(!note.id.is_empty());
    }

    #[test]
    fn test_created_ids_are_distinct() {
        let a = Note::create("A", "", 5);
        let b = Note::create("A", "", 5);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_note_serializes_camel_case() {
        let json = serde_json::to_string(&note("n1", 42)).unwrap();
        assert!(json.contains("\"createdAt\":1"));
        assert!(json.contains("\"updatedAt\":42"));
        assert!(!json.contains("created_at"));
    }

    #[test]
    fn test_draft_rejects_blank_title() {
        let draft = NoteDraft::new("   ", "body");
        assert!(matches!(
            draft.validate(),
            Err(NotekeepError::ValidationFailed(msg)) if msg.contains("title")
        ));
    }

    #[test]
    fn test_draft_rejects_blank_content() {
        let draft = NoteDraft::new("Title", "\n\t");
        assert!(matches!(
            draft.validate(),
            Err(NotekeepError::ValidationFailed(msg)) if msg.contains("content")
        ));
    }

    #[test]
    fn test_draft_apply_keeps_identity() {
        let original = note("n1", 10);
        let edited = NoteDraft::new(" New ", " text ").apply_to(&original);
        assert_eq!(edited.id, "n1");
        assert_eq!(edited.created_at, original.created_at);
        assert_eq!(edited.updated_at, original.updated_at);
        assert_eq!(edited.title, "New");
        assert_eq!(edited.content, "text");
    }

    #[test]
    fn test_sort_by_recent() {
        let mut notes = vec![note("a", 1), note("b", 3), note("c", 2)];
        sort_by_recent(&mut notes);
        let ids: Vec<_> = notes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "a"]);
    }
}
