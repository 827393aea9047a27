// src/app/state.rs
//! Application state management.

use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::KeyEvent;
use log::{error, info, warn};
use ratatui::{widgets::ListState, Frame};

use super::screen::Screen;
use crate::{
    audio::{
        metadata::clip_duration, sources::uri_to_path, BundledSound, CaptureBackend,
        PlaybackBackend, PlaybackController, RecordingSession, SoundSource,
    },
    db::{Recording, RecordingStore},
    ui::{
        keybindings::{key_to_action, NavigationAction},
        layout::compute_layout,
        widgets::{render_footer, render_header, render_home_menu, render_record_panel, render_sound_list},
    },
};

/// Entries of the home menu and where they lead.
pub const HOME_MENU: [(&str, Screen); 2] = [
    ("PLAY SOUNDS", Screen::PlaySounds),
    ("RECORD SOUNDS", Screen::RecordSounds),
];

/// A stored recording plus what the list shows about it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingEntry {
    pub recording: Recording,
    pub duration: Option<Duration>,
}

/// Main application state.
pub struct App<P: PlaybackBackend, C: CaptureBackend> {
    /// Screen currently shown
    pub screen: Screen,
    /// Currently selected index on the current screen
    pub selected: usize,
    /// List widget state
    pub state: ListState,

    pub store: RecordingStore,
    pub player: PlaybackController<P>,
    pub session: RecordingSession<C>,

    /// Recordings shown on the UserSounds screen
    pub recordings: Vec<RecordingEntry>,
}

impl<P: PlaybackBackend, C: CaptureBackend> App<P, C> {
    /// Build the app around an open store and the audio backends.
    pub fn new(
        store: RecordingStore,
        playback: P,
        capture: C,
        assets_dir: PathBuf,
        recordings_dir: PathBuf,
    ) -> Self {
        let mut state = ListState::default();
        state.select(Some(0));

        Self {
            screen: Screen::Home,
            selected: 0,
            state,
            store,
            player: PlaybackController::new(playback, assets_dir),
            session: RecordingSession::new(capture, recordings_dir),
            recordings: Vec::new(),
        }
    }

    /// Handle a key event and return true if the app should quit.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        match key_to_action(&key) {
            NavigationAction::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            NavigationAction::Down => {
                if self.selected + 1 < self.item_count() {
                    self.selected += 1;
                }
            }
            NavigationAction::Enter => self.activate_selected(),
            NavigationAction::Back => self.navigate(Screen::Home),
            NavigationAction::GoTo(screen) => self.navigate(screen),
            NavigationAction::Stop => self.player.stop(),
            NavigationAction::Delete => {
                if self.screen == Screen::UserSounds {
                    if let Some(id) = self.recordings.get(self.selected).map(|e| e.recording.id) {
                        self.delete_recording(id);
                    }
                }
            }
            NavigationAction::ToggleRecord => {
                if self.screen == Screen::RecordSounds {
                    self.toggle_recording();
                }
            }
            NavigationAction::Quit => {
                self.shutdown();
                return true; // Signal to quit
            }
            NavigationAction::None => {}
        }

        self.state.select(Some(self.selected));
        false
    }

    /// Number of selectable rows on the current screen.
    pub fn item_count(&self) -> usize {
        match self.screen {
            Screen::Home => HOME_MENU.len(),
            Screen::PlaySounds => BundledSound::ALL.len(),
            Screen::RecordSounds => 1,
            Screen::UserSounds => self.recordings.len(),
        }
    }

    /// Switch screens. Playback belongs to the screen that started it, so it
    /// stops on the way out.
    pub fn navigate(&mut self, screen: Screen) {
        if screen == self.screen {
            return;
        }
        self.player.stop();
        if self.screen == Screen::RecordSounds {
            // The recording belongs to this screen too; keep what was captured.
            self.finish_recording();
        }
        info!("navigate {} -> {}", self.screen, screen);

        self.screen = screen;
        self.selected = 0;
        if screen == Screen::UserSounds {
            self.reload_recordings();
        }
        self.state.select(Some(self.selected));
    }

    fn activate_selected(&mut self) {
        match self.screen {
            Screen::Home => {
                if let Some((_, target)) = HOME_MENU.get(self.selected) {
                    self.navigate(*target);
                }
            }
            Screen::PlaySounds => {
                if let Some(sound) = BundledSound::ALL.get(self.selected) {
                    self.player.play(SoundSource::Bundled(*sound));
                }
            }
            Screen::RecordSounds => self.toggle_recording(),
            Screen::UserSounds => self.play_recording(self.selected),
        }
    }

    /// Play the recording at `index` in the list.
    pub fn play_recording(&mut self, index: usize) {
        if let Some(entry) = self.recordings.get(index) {
            let uri = entry.recording.uri.clone();
            self.player.play(SoundSource::Stored(uri));
        }
    }

    /// Start recording when idle, otherwise stop, save and show the list.
    pub fn toggle_recording(&mut self) {
        if self.session.is_recording() {
            if self.finish_recording().is_some() {
                self.navigate(Screen::UserSounds);
            }
        } else if let Err(e) = self.session.start() {
            error!("error starting recording: {}", e);
        }
    }

    /// Stop and save an in-flight recording. Errors are logged.
    fn finish_recording(&mut self) -> Option<Recording> {
        if !self.session.is_recording() {
            return None;
        }
        match self.session.stop(&mut self.store) {
            Ok(recording) => {
                info!("saved recording {} ({})", recording.id, recording.uri);
                Some(recording)
            }
            Err(e) => {
                error!("error stopping recording: {}", e);
                None
            }
        }
    }

    /// Refresh the UserSounds list from the store.
    pub fn reload_recordings(&mut self) {
        match self.store.list_all() {
            Ok(rows) => {
                self.recordings = rows
                    .into_iter()
                    .map(|recording| {
                        let duration = clip_duration(&uri_to_path(&recording.uri)).ok();
                        RecordingEntry { recording, duration }
                    })
                    .collect();
            }
            Err(e) => error!("error fetching recordings: {}", e),
        }
        self.clamp_selection();
    }

    /// Delete a recording. Playback stops only when the deleted clip is the
    /// one playing.
    pub fn delete_recording(&mut self, id: i64) {
        let uri = match self.store.find_by_id(id) {
            Ok(found) => found.map(|r| r.uri),
            Err(e) => {
                warn!("error looking up recording {}: {}", id, e);
                self.recordings
                    .iter()
                    .find(|e| e.recording.id == id)
                    .map(|e| e.recording.uri.clone())
            }
        };

        match self.store.delete_by_id(id) {
            Ok(0) => warn!("recording {} was not in the database", id),
            Ok(_) => {
                info!("recording {} deleted from the database", id);
                if uri.as_deref().is_some_and(|u| self.player.is_playing_uri(u)) {
                    self.player.stop();
                }
                self.recordings.retain(|e| e.recording.id != id);
                self.clamp_selection();
            }
            Err(e) => error!("error deleting recording {}: {}", id, e),
        }
    }

    /// Periodic housekeeping from the UI loop.
    pub fn tick(&mut self) {
        self.player.poll();
    }

    /// Stop playback and save an in-flight recording before exit.
    pub fn shutdown(&mut self) {
        self.player.stop();
        self.finish_recording();
    }

    fn clamp_selection(&mut self) {
        let count = self.item_count();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
        self.state.select(Some(self.selected));
    }

    /// Draw the application UI.
    pub fn draw(&mut self, f: &mut Frame<'_>) {
        let layout = compute_layout(f.area());

        render_header(f, layout.header, self.screen, self.player.now_playing());

        match self.screen {
            Screen::Home => render_home_menu(f, layout.body, &HOME_MENU, &mut self.state),
            Screen::PlaySounds => {
                let rows: Vec<String> = BundledSound::ALL.iter().map(|s| s.name().to_string()).collect();
                let playing = self.player.now_playing().and_then(|src| match src {
                    SoundSource::Bundled(s) => BundledSound::ALL.iter().position(|b| b == s),
                    SoundSource::Stored(_) => None,
                });
                render_sound_list(f, layout.body, "Play Sounds", &rows, playing, &mut self.state);
            }
            Screen::RecordSounds => {
                render_record_panel(f, layout.body, self.session.state(), self.session.level())
            }
            Screen::UserSounds => {
                let rows: Vec<String> = self
                    .recordings
                    .iter()
                    .map(|e| {
                        let name = uri_to_path(&e.recording.uri)
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_else(|| e.recording.uri.clone());
                        format!(
                            "#{:<4} {}  {}",
                            e.recording.id,
                            crate::audio::metadata::format_duration(e.duration),
                            name
                        )
                    })
                    .collect();
                let playing = self
                    .recordings
                    .iter()
                    .position(|e| self.player.is_playing_uri(&e.recording.uri));
                render_sound_list(f, layout.body, "My Sounds", &rows, playing, &mut self.state);
            }
        }

        render_footer(f, layout.footer, self.screen, self.session.is_recording());
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::path::Path;
    use std::rc::Rc;

    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::error::{Result, SoundboardError};

    #[derive(Default, Clone)]
    struct FakePlayback {
        started: Rc<RefCell<Vec<PathBuf>>>,
        releases: Rc<Cell<usize>>,
    }

    impl PlaybackBackend for FakePlayback {
        fn start(&mut self, path: &Path) -> Result<()> {
            self.started.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
        fn halt(&mut self) -> Result<()> {
            Ok(())
        }
        fn release(&mut self) {
            self.releases.set(self.releases.get() + 1);
        }
        fn finished(&self) -> bool {
            false
        }
    }

    #[derive(Default)]
    struct FakeCapture {
        current: Option<PathBuf>,
    }

    impl CaptureBackend for FakeCapture {
        fn request_permission(&mut self) -> Result<()> {
            Ok(())
        }
        fn configure(&mut self) -> Result<()> {
            Ok(())
        }
        fn begin(&mut self, path: &Path) -> Result<()> {
            self.current = Some(path.to_path_buf());
            Ok(())
        }
        fn finish(&mut self) -> Result<PathBuf> {
            self.current.take().ok_or(SoundboardError::NotRecording)
        }
    }

    fn app(dir: &Path) -> (App<FakePlayback, FakeCapture>, FakePlayback) {
        let playback = FakePlayback::default();
        let app = App::new(
            RecordingStore::open_in_memory().unwrap(),
            playback.clone(),
            FakeCapture::default(),
            dir.join("assets"),
            dir.join("recordings"),
        );
        (app, playback)
    }

    fn press(app: &mut App<FakePlayback, FakeCapture>, code: KeyCode) -> bool {
        app.on_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn home_menu_opens_screens() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = app(dir.path());

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::PlaySounds);
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::RecordSounds);
    }

    #[test]
    fn play_screen_plays_selected_bundled_sound() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, playback) = app(dir.path());
        app.navigate(Screen::PlaySounds);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        assert_eq!(
            *playback.started.borrow(),
            vec![dir.path().join("assets").join("sound2.mp3")]
        );
        assert_eq!(
            app.player.now_playing(),
            Some(&SoundSource::Bundled(BundledSound::Tada))
        );

        press(&mut app, KeyCode::Char('s'));
        assert!(app.player.now_playing().is_none());
    }

    #[test]
    fn leaving_screen_stops_playback() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, playback) = app(dir.path());
        app.navigate(Screen::PlaySounds);
        press(&mut app, KeyCode::Enter);

        app.navigate(Screen::Home);
        assert!(app.player.now_playing().is_none());
        assert_eq!(playback.releases.get(), 1);
    }

    #[test]
    fn deleting_playing_recording_stops_it() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = app(dir.path());
        let a = app.store.insert("/rec/a.wav").unwrap();
        app.store.insert("/rec/b.wav").unwrap();
        app.navigate(Screen::UserSounds);

        app.play_recording(0);
        assert!(app.player.is_playing_uri("/rec/a.wav"));

        app.delete_recording(a);
        assert!(app.player.now_playing().is_none());
        assert_eq!(app.recordings.len(), 1);
        assert!(app.store.list_all().unwrap().iter().all(|r| r.id != a));
    }

    #[test]
    fn deleting_other_recording_keeps_playback() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = app(dir.path());
        app.store.insert("/rec/a.wav").unwrap();
        let b = app.store.insert("/rec/b.wav").unwrap();
        app.navigate(Screen::UserSounds);

        app.play_recording(0);
        app.delete_recording(b);

        assert!(app.player.is_playing_uri("/rec/a.wav"));
        assert_eq!(app.recordings.len(), 1);
    }

    #[test]
    fn delete_key_removes_selected_and_clamps_selection() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = app(dir.path());
        app.store.insert("/rec/a.wav").unwrap();
        app.store.insert("/rec/b.wav").unwrap();
        app.navigate(Screen::UserSounds);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('d'));

        assert_eq!(app.selected, 0);
        assert_eq!(app.recordings.len(), 1);
        assert_eq!(app.recordings[0].recording.uri, "/rec/a.wav");
        assert!(app.recordings[0].duration.is_none());
    }

    #[test]
    fn deleting_playing_recording_missing_from_list_stops_it() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = app(dir.path());
        app.navigate(Screen::UserSounds);
        // Saved after the list was loaded, so the cached list doesn't know it.
        let id = app.store.insert("/rec/late.wav").unwrap();
        app.player.play(SoundSource::Stored("/rec/late.wav".into()));

        app.delete_recording(id);

        assert!(app.player.now_playing().is_none());
        assert!(app.store.list_all().unwrap().is_empty());
    }

    #[test]
    fn leaving_record_screen_saves_recording() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = app(dir.path());
        app.navigate(Screen::RecordSounds);
        app.toggle_recording();
        assert!(app.session.is_recording());

        press(&mut app, KeyCode::Esc);

        assert_eq!(app.screen, Screen::Home);
        assert!(!app.session.is_recording());
        assert_eq!(app.store.list_all().unwrap().len(), 1);
    }

    #[test]
    fn jumping_away_while_recording_saves_once() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = app(dir.path());
        app.navigate(Screen::RecordSounds);
        app.toggle_recording();

        press(&mut app, KeyCode::Char('4'));

        assert_eq!(app.screen, Screen::UserSounds);
        assert!(!app.session.is_recording());
        assert_eq!(app.recordings.len(), 1);
        assert_eq!(app.store.list_all().unwrap().len(), 1);
    }

    #[test]
    fn record_key_only_acts_on_record_screen() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = app(dir.path());

        press(&mut app, KeyCode::Char('r'));
        assert!(!app.session.is_recording());

        app.navigate(Screen::RecordSounds);
        press(&mut app, KeyCode::Char('r'));
        assert!(app.session.is_recording());
    }

    #[test]
    fn quit_saves_in_flight_recording() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = app(dir.path());
        app.navigate(Screen::RecordSounds);
        app.toggle_recording();

        assert!(press(&mut app, KeyCode::Char('q')));
        assert!(!app.session.is_recording());
        assert_eq!(app.store.list_all().unwrap().len(), 1);
    }
}
