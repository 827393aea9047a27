use anyhow::Result;
use clap::Parser;
use log::info;

use soundboard::{config::Config, logging, ui};

fn main() -> Result<()> {
    let config = Config::parse();

    logging::init(&config.log_path(), config.log_level.into())?;
    info!(
        "starting soundboard (data dir {}, assets {})",
        config.data_dir().display(),
        config.assets_dir.display()
    );

    ui::run(&config)
}
