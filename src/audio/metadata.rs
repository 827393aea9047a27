// src/audio/metadata.rs
//! Clip properties read with Lofty.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use lofty::file::AudioFile;
use lofty::probe::Probe;

/// Length of the audio file at `path`.
pub fn clip_duration(path: &Path) -> Result<Duration> {
    let tagged_file = Probe::open(path)?.read()?;
    Ok(tagged_file.properties().duration())
}

/// `mm:ss`, or `--:--` when the length is unknown.
pub fn format_duration(duration: Option<Duration>) -> String {
    match duration {
        Some(d) => {
            let secs = d.as_secs();
            format!("{:02}:{:02}", secs / 60, secs % 60)
        }
        None => "--:--".to_string(),
    }
}
