// src/app/mod.rs
//! Application module - contains application state and logic.

pub mod screen;
pub mod state;

// Re-export the App struct
pub use screen::Screen;
pub use state::{App, RecordingEntry};
