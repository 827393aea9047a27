// src/db/store.rs
//! The recordings store: one connection, four operations.

use std::path::Path;

use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension};

use super::migrations;
use super::models::Recording;
use crate::error::{Result, SoundboardError};

/// Owns the database connection and exposes the recording operations.
///
/// Every operation is a single statement (insert runs inside its own
/// transaction), so a failure never leaves partial state behind.
pub struct RecordingStore {
    conn: Connection,
}

impl RecordingStore {
    /// Open (or create) the database at `db_path` and make sure the schema exists.
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path).map_err(SoundboardError::DatabaseWrite)?;
        let store = Self { conn };
        store.ensure_schema()?;

        info!("opened recordings database at {}", db_path.display());
        Ok(store)
    }

    /// Open a throwaway in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(SoundboardError::DatabaseWrite)?;
        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    pub fn ensure_schema(&self) -> Result<()> {
        migrations::ensure_schema(&self.conn).map_err(SoundboardError::DatabaseWrite)
    }

    /// Append a recording and return its generated id.
    pub fn insert(&mut self, uri: &str) -> Result<i64> {
        let tx = self.conn.transaction().map_err(SoundboardError::DatabaseWrite)?;
        tx.execute("INSERT INTO recordings (uri) VALUES (?1)", params![uri])
            .map_err(SoundboardError::DatabaseWrite)?;
        let id = tx.last_insert_rowid();
        tx.commit().map_err(SoundboardError::DatabaseWrite)?;

        debug!("saved recording {} -> {}", id, uri);
        Ok(id)
    }

    /// All recordings in insertion order.
    pub fn list_all(&self) -> Result<Vec<Recording>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, uri FROM recordings ORDER BY id")
            .map_err(SoundboardError::DatabaseRead)?;

        let rows = stmt
            .query_map([], Recording::from_row)
            .map_err(SoundboardError::DatabaseRead)?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(SoundboardError::DatabaseRead)
    }

    /// The recording with `id`, if it exists.
    pub fn find_by_id(&self, id: i64) -> Result<Option<Recording>> {
        self.conn
            .query_row(
                "SELECT id, uri FROM recordings WHERE id = ?1",
                params![id],
                Recording::from_row,
            )
            .optional()
            .map_err(SoundboardError::DatabaseRead)
    }

    /// Delete the recording with `id`. Returns the number of rows removed (0 or 1).
    pub fn delete_by_id(&self, id: i64) -> Result<usize> {
        let affected = self
            .conn
            .execute("DELETE FROM recordings WHERE id = ?1", params![id])
            .map_err(SoundboardError::DatabaseWrite)?;

        debug!("delete recording {}: {} row(s)", id, affected);
        Ok(affected)
    }
}
