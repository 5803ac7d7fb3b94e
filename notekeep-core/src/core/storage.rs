//! Key-value persistence backends.
//!
//! Everything Notekeep persists is a text value under a string key: the note
//! collection under one key, the theme flag under another. [`KeyValueStore`]
//! is the seam; [`SqliteStore`] is the on-device backend and [`MemoryStore`]
//! keeps entries in process memory.

use crate::{NotekeepError, Result};
use rusqlite::{Connection, OptionalExtension};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// A backend that stores text values by key.
///
/// `set` overwrites any previous value. Neither method retries; a failure is
/// reported to the caller immediately.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` if nothing was ever stored.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// SQLite-backed key-value store: a single `kv` table in one database file.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path` and ensures the `kv` table exists.
    ///
    /// Missing parent directories are created first.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self { conn })
    }

    /// Opens an existing database at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`NotekeepError::Storage`] if the file has no `kv` table, or
    /// [`NotekeepError::Database`] if it is not a SQLite database at all.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;

        let table_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name = 'kv'",
            [],
            |row| row.get(0),
        )?;

        if table_count != 1 {
            return Err(NotekeepError::Storage(
                "Not a valid Notekeep database".to_string(),
            ));
        }

        Ok(Self { conn })
    }

    /// Creates a database that lives only as long as this value.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![key, value],
        )?;
        Ok(())
    }
}

/// In-memory key-value store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| NotekeepError::Storage("Memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_create_storage() {
        let temp = NamedTempFile::new().unwrap();
        let storage = SqliteStore::create(temp.path()).unwrap();

        let tables: Vec<String> = storage
            .connection()
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap();

        assert!(tables.contains(&"kv".to_string()));
    }

    #[test]
    fn test_create_makes_missing_parent_directories() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("notekeep").join("notes.db");

        let storage = SqliteStore::create(&path).unwrap();
        storage.set("k", "v").unwrap();
        assert!(path.exists());

        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_get_missing_key_is_none() {
        let storage = SqliteStore::open_in_memory().unwrap();
        assert_eq!(storage.get("notes_app_data").unwrap(), None);
    }

    #[test]
    fn test_set_overwrites() {
        let storage = SqliteStore::open_in_memory().unwrap();
        storage.set("k", "first").unwrap();
        storage.set("k", "second").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("second"));

        let rows: i64 = storage
            .connection()
            .query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_values_persist_across_open() {
        let temp = NamedTempFile::new().unwrap();
        {
            let storage = SqliteStore::create(temp.path()).unwrap();
            storage.set("notes_app_theme", "true").unwrap();
        }

        let storage = SqliteStore::open(temp.path()).unwrap();
        assert_eq!(
            storage.get("notes_app_theme").unwrap().as_deref(),
            Some("true")
        );
    }

    #[test]
    fn test_open_invalid_database() {
        let temp = NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "not a database").unwrap();

        let result = SqliteStore::open(temp.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_open_database_without_kv_table() {
        let temp = NamedTempFile::new().unwrap();
        {
            let conn = Connection::open(temp.path()).unwrap();
            conn.execute("CREATE TABLE other (id INTEGER PRIMARY KEY)", [])
                .unwrap();
        }

        let result = SqliteStore::open(temp.path());
        assert!(matches!(result, Err(NotekeepError::Storage(_))));
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_shared_backend_through_arc_and_ref() {
        let store = Arc::new(MemoryStore::new());
        let shared = Arc::clone(&store);
        shared.set("k", "v").unwrap();
        let by_ref: &MemoryStore = &store;
        assert_eq!(KeyValueStore::get(&by_ref, "k").unwrap().as_deref(), Some("v"));
    }
}
