//! Key-value snapshot storage.
//!
//! The engine persists the whole store under one fixed key. The trait is
//! the boundary; hosts plug in whatever durable storage they have. Two
//! implementations ship with the crate: an in-memory map and a single-table
//! SQLite store.

use std::collections::HashMap;

use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Result, TrackError};

/// Storage key for the workout snapshot.
pub const SNAPSHOT_KEY: &str = "workouts";

/// String key-value storage boundary.
///
/// All operations are fallible; the controller propagates storage errors
/// to the host rather than assuming writes succeed.
pub trait KeyValueStore {
    /// Read the value under `key`, `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete the value under `key`. Deleting an absent key is a no-op.
    fn remove(&mut self, key: &str) -> Result<()>;
}

// ============================================================================
// In-memory store
// ============================================================================

/// HashMap-backed store for tests and hosts without durable storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

// ============================================================================
// SQLite store
// ============================================================================

/// SQLite-backed store: one `kv` table, value per key.
pub struct SqliteStore {
    db: Connection,
}

impl SqliteStore {
    /// Open (or create) the store at `path` and initialize the schema.
    pub fn open(path: &str) -> Result<Self> {
        let db = Connection::open(path)
            .map_err(|e| TrackError::Storage(format!("failed to open {}: {}", path, e)))?;
        let store = Self { db };
        store.init_schema()?;
        Ok(store)
    }

    /// In-memory SQLite database, useful for tests.
    pub fn open_in_memory() -> Result<Self> {
        let db = Connection::open_in_memory()
            .map_err(|e| TrackError::Storage(format!("failed to open in-memory db: {}", e)))?;
        let store = Self { db };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.db
            .execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS kv (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );
                "#,
            )
            .map_err(|e| TrackError::Storage(format!("failed to create kv schema: {}", e)))
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.db
            .query_row("SELECT value FROM kv WHERE key = ?", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| TrackError::Storage(format!("failed to read '{}': {}", key, e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        debug!("storage: set '{}' ({} bytes)", key, value.len());
        self.db
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map(|_| ())
            .map_err(|e| TrackError::Storage(format!("failed to write '{}': {}", key, e)))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.db
            .execute("DELETE FROM kv WHERE key = ?", params![key])
            .map(|_| ())
            .map_err(|e| TrackError::Storage(format!("failed to delete '{}': {}", key, e)))
    }
}
