// src/audio/mod.rs
//! Audio module - playback of bundled and recorded clips, and microphone capture.

pub mod capture;
pub mod metadata;
pub mod player;
pub mod recorder;
pub mod sources;

// Re-export commonly used types
pub use capture::{CaptureBackend, CpalCapture};
pub use player::{PlaybackBackend, PlaybackController, RodioBackend};
pub use recorder::{RecordingSession, RecordingState};
pub use sources::{BundledSound, SoundSource};
