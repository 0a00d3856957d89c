//! Persistent local key/value storage.
//!
//! [`KeyValueStorage`] mirrors the small synchronous API of browser local
//! storage. [`SqliteStorage`] keeps the pairs in a dedicated SQLite file next
//! to the listing database; [`MemoryStorage`] keeps them in process memory.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use rusqlite::{Connection, OptionalExtension, params};

use crate::error::{DatabaseResultExt, ListingError, Result};

const CREATE_TABLE_SQL: &str =
    "CREATE TABLE IF NOT EXISTS local_storage (key TEXT PRIMARY KEY, value TEXT NOT NULL)";
const GET_ITEM_SQL: &str = "SELECT value FROM local_storage WHERE key = ?1";
const SET_ITEM_SQL: &str = "INSERT INTO local_storage (key, value) VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = excluded.value";
const REMOVE_ITEM_SQL: &str = "DELETE FROM local_storage WHERE key = ?1";

/// String key/value store surviving process restarts.
pub trait KeyValueStorage: Send {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores a value, replacing any previous one.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes a key. Removing a missing key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// Key/value storage in its own SQLite file.
pub struct SqliteStorage {
    connection: Connection,
}

impl SqliteStorage {
    /// Opens (or creates) the storage file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| ListingError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let connection = Connection::open(path).db_context("Failed to open local storage")?;
        connection
            .execute(CREATE_TABLE_SQL, [])
            .db_context("Failed to initialize local storage")?;

        Ok(Self { connection })
    }

    /// `$XDG_DATA_HOME/paddock/local_storage.db`
    pub fn default_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("paddock")
            .place_data_file("local_storage.db")
            .map_err(|e| ListingError::XdgDirectory(e.to_string()))
    }
}

impl KeyValueStorage for SqliteStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.connection
            .query_row(GET_ITEM_SQL, params![key], |row| row.get(0))
            .optional()
            .db_context("Failed to read local storage")
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.connection
            .execute(SET_ITEM_SQL, params![key, value])
            .db_context("Failed to write local storage")?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.connection
            .execute(REMOVE_ITEM_SQL, params![key])
            .db_context("Failed to remove local storage item")?;
        Ok(())
    }
}

/// In-memory storage. Clones share the same underlying map, which lets a
/// test "reload" by building a fresh backup over a clone.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set_item` calls across all clones.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.items
            .lock()
            .map_err(|_| ListingError::storage("memory storage lock poisoned"))
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}
