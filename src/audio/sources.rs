// src/audio/sources.rs
//! What can be played: the bundled clips and stored recordings.

use std::{
    fmt,
    path::{Path, PathBuf},
};

/// The clips shipped with the app, referenced by logical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundledSound {
    Hero,
    Tada,
    Thunder,
}

impl BundledSound {
    /// Display order on the play screen.
    pub const ALL: [BundledSound; 3] = [BundledSound::Hero, BundledSound::Tada, BundledSound::Thunder];

    pub fn name(self) -> &'static str {
        match self {
            BundledSound::Hero => "HERO",
            BundledSound::Tada => "TADA",
            BundledSound::Thunder => "THUNDER",
        }
    }

    /// File name inside the assets directory.
    pub fn file_name(self) -> &'static str {
        match self {
            BundledSound::Hero => "sound1.mp3",
            BundledSound::Tada => "sound2.mp3",
            BundledSound::Thunder => "sound3.mp3",
        }
    }
}

impl fmt::Display for BundledSound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A playable source: either a bundled clip or the uri of a stored recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    Bundled(BundledSound),
    Stored(String),
}

impl SoundSource {
    /// Resolve the source to a file on disk.
    pub fn resolve(&self, assets_dir: &Path) -> PathBuf {
        match self {
            SoundSource::Bundled(sound) => assets_dir.join(sound.file_name()),
            SoundSource::Stored(uri) => uri_to_path(uri),
        }
    }
}

impl fmt::Display for SoundSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoundSource::Bundled(sound) => write!(f, "{}", sound),
            SoundSource::Stored(uri) => write!(f, "{}", uri),
        }
    }
}

/// Stored uris are plain paths, optionally prefixed with `file://`.
pub fn uri_to_path(uri: &str) -> PathBuf {
    PathBuf::from(uri.strip_prefix("file://").unwrap_or(uri))
}
