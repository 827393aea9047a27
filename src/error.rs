// src/error.rs
//! Error type shared by the store, the audio services and the app.

use thiserror::Error;

/// Everything that can go wrong behind a user action.
///
/// None of these ever reach the screen: the app logs them and carries on.
#[derive(Debug, Error)]
pub enum SoundboardError {
    #[error("microphone permission denied: {0}")]
    PermissionDenied(String),

    #[error("failed to load audio: {0}")]
    AudioLoad(String),

    #[error("playback failed: {0}")]
    Playback(String),

    #[error("failed to start recording: {0}")]
    RecordingStart(String),

    #[error("failed to stop recording: {0}")]
    RecordingStop(String),

    /// The capture ended but its file could not be completed; nothing to retry.
    #[error("recording lost: {0}")]
    RecordingLost(String),

    #[error("recording already in progress")]
    AlreadyRecording,

    #[error("no recording in progress")]
    NotRecording,

    #[error("database write failed: {0}")]
    DatabaseWrite(#[source] rusqlite::Error),

    #[error("database read failed: {0}")]
    DatabaseRead(#[source] rusqlite::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SoundboardError>;
