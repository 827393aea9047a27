// src/db/models.rs
//! Row types stored in the database.

use rusqlite::Row;

/// A captured clip: the auto-assigned id and where its audio lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recording {
    pub id: i64,
    pub uri: String,
}

impl Recording {
    /// Build a recording from a `SELECT id, uri` row.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            uri: row.get(1)?,
        })
    }
}
