use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};
use std::path::{Path, PathBuf};

use crate::paths;

/// A durable string key-value store backed by `SQLite`.
///
/// One text value per key, surviving restarts.
pub struct LocalStorage {
    db_path: PathBuf,
    conn: Connection,
}

impl LocalStorage {
    /// Opens the storage database in the data directory.
    pub fn new() -> Result<Self> {
        let data_dir = paths::data_dir();

        std::fs::create_dir_all(&data_dir).with_context(|| {
            format!("Failed to create data directory: {}", data_dir.display())
        })?;

        Self::open(data_dir.join("storage.db"))
    }

    /// Opens (or creates) the storage database at `db_path`.
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        let conn = Connection::open(&db_path).with_context(|| {
            format!("Failed to open storage database: {}", db_path.display())
        })?;

        let storage = Self { db_path, conn };
        storage.init_db()?;

        Ok(storage)
    }

    fn init_db(&self) -> Result<()> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS storage (
                    key TEXT PRIMARY KEY NOT NULL,
                    value TEXT NOT NULL,
                    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )
            .context("Failed to create storage table")?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM storage WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
            .with_context(|| format!("Failed to read storage key: {key}"))
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO storage (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
                [key, value],
            )
            .with_context(|| format!("Failed to write storage key: {key}"))?;

        Ok(())
    }
}
