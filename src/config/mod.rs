// src/config/mod.rs
//! Command-line configuration and the paths derived from it.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Database file name, kept from the first release so old data still opens.
pub const DATABASE_FILE: &str = "soundApp.db";
pub const LOG_FILE: &str = "soundboard.log";
pub const RECORDINGS_DIR: &str = "recordings";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// A terminal soundboard: play bundled clips, record your own.
#[derive(Debug, Clone, Parser)]
#[command(name = "soundboard", version, about)]
pub struct Config {
    /// Where the database, recordings and log file live
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory holding the bundled clips (sound1.mp3 .. sound3.mp3)
    #[arg(long, default_value = "assets/sounds")]
    pub assets_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl Config {
    /// `--data-dir`, or the platform data directory.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("soundboard")
        })
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir().join(DATABASE_FILE)
    }

    pub fn recordings_dir(&self) -> PathBuf {
        self.data_dir().join(RECORDINGS_DIR)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join(LOG_FILE)
    }
}
