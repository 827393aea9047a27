// src/audio/recorder.rs
//! Recording lifecycle: Idle -> Recording -> (Stopping) -> Idle.

use std::path::{Path, PathBuf};

use chrono::Local;
use log::{error, info, warn};

use super::capture::CaptureBackend;
use crate::db::{Recording, RecordingStore};
use crate::error::{Result, SoundboardError};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordingState {
    Idle,
    Recording { path: PathBuf },
    /// Capture halted, file being finalized and saved.
    Stopping,
}

/// One microphone, one recording at a time.
pub struct RecordingSession<C: CaptureBackend> {
    capture: C,
    recordings_dir: PathBuf,
    state: RecordingState,
}

impl<C: CaptureBackend> RecordingSession<C> {
    pub fn new(capture: C, recordings_dir: PathBuf) -> Self {
        Self {
            capture,
            recordings_dir,
            state: RecordingState::Idle,
        }
    }

    pub fn state(&self) -> &RecordingState {
        &self.state
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.state, RecordingState::Recording { .. })
    }

    pub fn level(&self) -> f32 {
        if self.is_recording() { self.capture.level() } else { 0.0 }
    }

    /// Request the microphone, configure it and begin capturing into a new
    /// file. Any failure leaves the session idle.
    pub fn start(&mut self) -> Result<()> {
        if self.state != RecordingState::Idle {
            return Err(SoundboardError::AlreadyRecording);
        }

        self.capture.request_permission()?;
        self.capture.configure()?;

        std::fs::create_dir_all(&self.recordings_dir)
            .map_err(|e| SoundboardError::RecordingStart(e.to_string()))?;
        let path = next_recording_path(&self.recordings_dir);
        self.capture.begin(&path)?;

        info!("recording to {}", path.display());
        self.state = RecordingState::Recording { path };
        Ok(())
    }

    /// Finalize the capture and save it to `store`.
    ///
    /// A capture that could not be halted stays in `Recording` so the user
    /// can try again. A lost clip or a failed save drops back to `Idle`.
    pub fn stop(&mut self, store: &mut RecordingStore) -> Result<Recording> {
        let path = match std::mem::replace(&mut self.state, RecordingState::Stopping) {
            RecordingState::Recording { path } => path,
            other => {
                self.state = other;
                return Err(SoundboardError::NotRecording);
            }
        };

        let finished = match self.capture.finish() {
            Ok(p) => p,
            Err(e @ (SoundboardError::NotRecording | SoundboardError::RecordingLost(_))) => {
                warn!("capture for {} is gone: {}", path.display(), e);
                self.state = RecordingState::Idle;
                return Err(e);
            }
            Err(e) => {
                self.state = RecordingState::Recording { path };
                return Err(e);
            }
        };
        self.state = RecordingState::Idle;

        let uri = finished.to_string_lossy().into_owned();
        match store.insert(&uri) {
            Ok(id) => {
                info!("recording saved to database with id {}", id);
                Ok(Recording { id, uri })
            }
            Err(e) => {
                error!("error saving recording {} to database: {}", uri, e);
                Err(e)
            }
        }
    }

    pub fn capture(&self) -> &C {
        &self.capture
    }
}

/// `recording_<date>_<time>_<millis>.wav` inside `dir`.
fn next_recording_path(dir: &Path) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d_%H%M%S_%3f");
    let mut path = dir.join(format!("recording_{}.wav", stamp));
    let mut n = 1;
    while path.exists() {
        path = dir.join(format!("recording_{}_{}.wav", stamp, n));
        n += 1;
    }
    path
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;

    #[derive(Default, Clone)]
    struct FakeCapture {
        deny: Rc<Cell<bool>>,
        fail_finish: Rc<Cell<bool>>,
        lose_clip: Rc<Cell<bool>>,
        current: Rc<RefCell<Option<PathBuf>>>,
    }

    impl CaptureBackend for FakeCapture {
        fn request_permission(&mut self) -> Result<()> {
            if self.deny.get() {
                return Err(SoundboardError::PermissionDenied("denied".into()));
            }
            Ok(())
        }

        fn configure(&mut self) -> Result<()> {
            Ok(())
        }

        fn begin(&mut self, path: &Path) -> Result<()> {
            std::fs::write(path, b"RIFF")?;
            *self.current.borrow_mut() = Some(path.to_path_buf());
            Ok(())
        }

        fn finish(&mut self) -> Result<PathBuf> {
            if self.fail_finish.get() {
                return Err(SoundboardError::RecordingStop("device busy".into()));
            }
            if self.lose_clip.get() {
                self.current.borrow_mut().take();
                return Err(SoundboardError::RecordingLost("finalize failed".into()));
            }
            self.current.borrow_mut().take().ok_or(SoundboardError::NotRecording)
        }
    }

    fn session(dir: &Path) -> (RecordingSession<FakeCapture>, FakeCapture) {
        let fake = FakeCapture::default();
        (RecordingSession::new(fake.clone(), dir.join("recordings")), fake)
    }

    #[test]
    fn start_then_stop_saves_uri() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = RecordingStore::open_in_memory().unwrap();
        let (mut rec, _) = session(dir.path());

        rec.start().unwrap();
        let path = match rec.state() {
            RecordingState::Recording { path } => path.clone(),
            other => panic!("unexpected state {:?}", other),
        };
        assert!(path.starts_with(dir.path().join("recordings")));

        let saved = rec.stop(&mut store).unwrap();
        assert_eq!(saved.uri, path.to_string_lossy());
        assert_eq!(*rec.state(), RecordingState::Idle);
        assert_eq!(store.list_all().unwrap(), vec![saved]);
    }

    #[test]
    fn permission_denied_stays_idle() {
        let dir = tempfile::tempdir().unwrap();
        let (mut rec, fake) = session(dir.path());
        fake.deny.set(true);

        assert!(matches!(rec.start(), Err(SoundboardError::PermissionDenied(_))));
        assert_eq!(*rec.state(), RecordingState::Idle);
    }

    #[test]
    fn second_start_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (mut rec, _) = session(dir.path());
        rec.start().unwrap();
        assert!(matches!(rec.start(), Err(SoundboardError::AlreadyRecording)));
        assert!(rec.is_recording());
    }

    #[test]
    fn stop_without_start_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = RecordingStore::open_in_memory().unwrap();
        let (mut rec, _) = session(dir.path());

        assert!(matches!(rec.stop(&mut store), Err(SoundboardError::NotRecording)));
        assert_eq!(*rec.state(), RecordingState::Idle);
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn failed_finish_keeps_recording_for_retry() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = RecordingStore::open_in_memory().unwrap();
        let (mut rec, fake) = session(dir.path());

        rec.start().unwrap();
        fake.fail_finish.set(true);
        assert!(matches!(rec.stop(&mut store), Err(SoundboardError::RecordingStop(_))));
        assert!(rec.is_recording());
        assert!(store.list_all().unwrap().is_empty());

        fake.fail_finish.set(false);
        rec.stop(&mut store).unwrap();
        assert_eq!(store.list_all().unwrap().len(), 1);
    }

    #[test]
    fn lost_clip_returns_to_idle_without_saving() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = RecordingStore::open_in_memory().unwrap();
        let (mut rec, fake) = session(dir.path());

        rec.start().unwrap();
        fake.lose_clip.set(true);
        assert!(matches!(rec.stop(&mut store), Err(SoundboardError::RecordingLost(_))));
        assert_eq!(*rec.state(), RecordingState::Idle);
        assert!(store.list_all().unwrap().is_empty());

        // A fresh recording works afterwards.
        fake.lose_clip.set(false);
        rec.start().unwrap();
        rec.stop(&mut store).unwrap();
        assert_eq!(store.list_all().unwrap().len(), 1);
    }

    #[test]
    fn failed_save_returns_to_idle() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("soundApp.db");
        let mut store = RecordingStore::open(&db_path).unwrap();
        let (mut rec, _) = session(dir.path());

        let other = rusqlite::Connection::open(&db_path).unwrap();
        other.execute("DROP TABLE recordings", []).unwrap();

        rec.start().unwrap();
        assert!(matches!(rec.stop(&mut store), Err(SoundboardError::DatabaseWrite(_))));
        assert_eq!(*rec.state(), RecordingState::Idle);
    }

    #[test]
    fn recording_paths_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let a = next_recording_path(dir.path());
        std::fs::write(&a, b"").unwrap();
        let b = next_recording_path(dir.path());
        assert_ne!(a, b);
    }
}
