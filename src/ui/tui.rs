// src/ui/tui.rs
//! Terminal setup and the main event loop.

use std::{
    io,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event as CEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::{
    app::App,
    audio::{CaptureBackend, CpalCapture, PlaybackBackend, RodioBackend},
    config::Config,
    db::RecordingStore,
};

/// Open the store, wire the audio devices and run the UI until the user quits.
pub fn run(config: &Config) -> Result<()> {
    let db_path = config.database_path();
    let store = RecordingStore::open(&db_path)
        .with_context(|| format!("opening database {}", db_path.display()))?;

    let mut app = App::new(
        store,
        RodioBackend::new(),
        CpalCapture::new(),
        config.assets_dir.clone(),
        config.recordings_dir(),
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, &mut app);
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("bye");
    result
}

fn event_loop<B, P, C>(terminal: &mut Terminal<B>, app: &mut App<P, C>) -> Result<()>
where
    B: Backend,
    P: PlaybackBackend,
    C: CaptureBackend,
{
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| app.draw(f))?;

        let timeout = tick_rate.checked_sub(last_tick.elapsed()).unwrap_or_default();
        if event::poll(timeout)? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.on_key(key) {
                    return Ok(());
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
            app.tick();
        }
    }
}
