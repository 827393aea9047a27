// src/lib.rs
//! Soundboard - a terminal soundboard.
//!
//! Play a few bundled clips, record your own from the microphone, and keep
//! the recordings in a local SQLite database.

pub mod app;
pub mod audio;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod ui;

pub use error::{Result, SoundboardError};
