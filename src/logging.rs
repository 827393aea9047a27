// src/logging.rs
//! File logger behind the `log` facade. The terminal belongs to the UI, so
//! log lines go to a file instead of stderr.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};

struct FileLogger {
    level: LevelFilter,
    file: Mutex<File>,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(
                file,
                "{} {:<5} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// A log file bigger than this is started over at launch.
pub const MAX_LOG_BYTES: u64 = 4 * 1024 * 1024;

/// Install the global logger, appending to `path`.
pub fn init(path: &Path, level: LevelFilter) -> Result<()> {
    let file = open_log_file(path, MAX_LOG_BYTES)?;

    log::set_boxed_logger(Box::new(FileLogger {
        level,
        file: Mutex::new(file),
    }))
    .context("logger already installed")?;
    log::set_max_level(level);
    Ok(())
}

/// Open `path` for appending, truncating it first when it has grown past
/// `max_bytes`.
fn open_log_file(path: &Path, max_bytes: u64) -> Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let oversized = std::fs::metadata(path).is_ok_and(|m| m.len() > max_bytes);

    let mut options = OpenOptions::new();
    options.create(true);
    if oversized {
        options.write(true).truncate(true);
    } else {
        options.append(true);
    }
    options
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))
}
