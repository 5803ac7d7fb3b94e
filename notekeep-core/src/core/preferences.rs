//! Theme preference persistence and the application settings object.
//!
//! The dark-mode flag is stored as a JSON boolean under its own key, next to
//! the note collection in the same backend. [`AppSettings`] owns the flag's
//! load/save lifecycle; screens receive the resolved [`Theme`] explicitly.

use crate::{KeyValueStore, Result, StoreConfig};
use serde::{Deserialize, Serialize};

/// Persists a single boolean flag under one key.
pub struct PreferenceStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    /// A store for the dark-mode flag under the default key.
    pub fn new(backend: S) -> Self {
        Self::with_config(backend, &StoreConfig::default())
    }

    pub fn with_config(backend: S, config: &StoreConfig) -> Self {
        Self {
            backend,
            key: config.theme_key.clone(),
        }
    }

    /// Stores `flag`. Returns `false` if the backend rejected the write.
    pub fn save(&self, flag: bool) -> bool {
        match self.try_save(flag) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Error saving theme preference: {e}");
                false
            }
        }
    }

    /// Returns the stored flag, or `None` if none was ever stored.
    ///
    /// An unreadable or non-boolean value is logged and treated as absent.
    pub fn load(&self) -> Option<bool> {
        match self.try_load() {
            Ok(flag) => flag,
            Err(e) => {
                log::warn!("Error loading theme preference: {e}");
                None
            }
        }
    }

    fn try_save(&self, flag: bool) -> Result<()> {
        let text = serde_json::to_string(&flag)?;
        self.backend.set(&self.key, &text)
    }

    fn try_load(&self) -> Result<Option<bool>> {
        match self.backend.get(&self.key)? {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }
}

/// Colour scheme the UI renders with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    #[must_use]
    pub fn from_dark_mode(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        Self::from_dark_mode(!self.is_dark())
    }
}

/// Process-wide settings, loaded once at start-up and passed to whatever
/// renders screens.
pub struct AppSettings<S> {
    store: PreferenceStore<S>,
    theme: Theme,
}

impl<S: KeyValueStore> AppSettings<S> {
    /// Loads settings from `store`, falling back to [`Theme::Light`] when no
    /// preference was ever saved.
    pub fn load(store: PreferenceStore<S>) -> Self {
        let theme = store
            .load()
            .map(Theme::from_dark_mode)
            .unwrap_or_default();
        Self { store, theme }
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Switches to `theme` and persists it.
    ///
    /// The in-memory theme changes even if persisting fails, so the current
    /// session still reflects the user's choice; the return value reports
    /// whether it was saved.
    pub fn set_theme(&mut self, theme: Theme) -> bool {
        self.theme = theme;
        self.store.save(theme.is_dark())
    }

    /// Flips between light and dark and persists the result.
    ///
    /// Returns the new theme and whether it was saved, as [`set_theme`](Self::set_theme) does.
    pub fn toggle_theme(&mut self) -> (Theme, bool) {
        let next = self.theme.toggled();
        let saved = self.set_theme(next);
        (next, saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStore, NotekeepError};

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(NotekeepError::Storage("read-only".to_string()))
        }
    }

    #[test]
    fn test_load_absent() {
        let store = PreferenceStore::new(MemoryStore::new());
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_save_and_load() {
        let backend = MemoryStore::new();
        let store = PreferenceStore::new(&backend);
        assert!(store.save(true));
        assert_eq!(store.load(), Some(true));
        assert_eq!(backend.get("notes_app_theme").unwrap().as_deref(), Some("true"));

        assert!(store.save(false));
        assert_eq!(store.load(), Some(false));
    }

    #[test]
    fn test_corrupt_value_is_absent() {
        let backend = MemoryStore::new();
        backend.set("notes_app_theme", "\"dark\"").unwrap();
        assert_eq!(PreferenceStore::new(&backend).load(), None);
    }

    #[test]
    fn test_save_failure_reports_false() {
        let store = PreferenceStore::new(ReadOnlyStore);
        assert!(!store.save(true));
    }

    #[test]
    fn test_settings_default_to_light() {
        let settings = AppSettings::load(PreferenceStore::new(MemoryStore::new()));
        assert_eq!(settings.theme(), Theme::Light);
    }

    #[test]
    fn test_settings_toggle_persists() {
        let backend = MemoryStore::new();
        let mut settings = AppSettings::load(PreferenceStore::new(&backend));
        assert_eq!(settings.toggle_theme(), (Theme::Dark, true));

        let reloaded = AppSettings::load(PreferenceStore::new(&backend));
        assert_eq!(reloaded.theme(), Theme::Dark);
        assert!(reloaded.theme().is_dark());
    }

    #[test]
    fn test_set_theme_keeps_session_value_when_save_fails() {
        let mut settings = AppSettings::load(PreferenceStore::new(ReadOnlyStore));
        assert!(!settings.set_theme(Theme::Dark));
        assert_eq!(settings.theme(), Theme::Dark);

        assert_eq!(settings.toggle_theme(), (Theme::Light, false));
        assert_eq!(settings.theme(), Theme::Light);
    }

    #[test]
    fn test_theme_and_notes_share_backend() {
        let backend = MemoryStore::new();
        let notes = crate::NotesStore::new(&backend);
        let prefs = PreferenceStore::new(&backend);

        notes.add_note("Hello", "").unwrap();
        assert!(prefs.save(true));
        assert_eq!(notes.get_all_notes().len(), 1);
        assert_eq!(prefs.load(), Some(true));
    }
}
