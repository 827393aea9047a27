// src/db/mod.rs
//! Local persistence for user recordings (SQLite via rusqlite).

pub mod migrations;
pub mod models;
pub mod store;

// Re-export commonly used types
pub use models::Recording;
pub use store::RecordingStore;
