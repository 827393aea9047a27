// src/db/migrations.rs
//! Schema setup.

use rusqlite::Connection;

/// The only persisted state. Kept byte-for-byte so existing databases open.
pub const CREATE_RECORDINGS: &str =
    "CREATE TABLE IF NOT EXISTS recordings (id INTEGER PRIMARY KEY AUTOINCREMENT, uri TEXT NOT NULL)";

/// Create the `recordings` table if it is absent. Safe to call repeatedly.
pub fn ensure_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(CREATE_RECORDINGS, [])?;
    Ok(())
}
