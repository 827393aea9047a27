// src/audio/player.rs
//! Playback: a rodio backend on its own audio thread and the controller that
//! keeps at most one clip loaded at a time.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{debug, error, info, warn};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use super::sources::SoundSource;
use crate::error::{Result, SoundboardError};

/// The device side of playback. One clip at a time.
pub trait PlaybackBackend {
    /// Load `path` and start playing it.
    fn start(&mut self, path: &Path) -> Result<()>;
    /// Halt the current clip.
    fn halt(&mut self) -> Result<()>;
    /// Drop everything held for the current clip. Must not fail.
    fn release(&mut self);
    /// True once the current clip has played to its end.
    fn finished(&self) -> bool;
}

/// Commands sent to the audio playback thread.
enum PlayerCommand {
    Start(PathBuf, Sender<Result<()>>),
    Halt(Sender<Result<()>>),
    Release,
}

/// rodio output. The `OutputStream` lives on a dedicated thread; this handle
/// only talks to it over a channel.
pub struct RodioBackend {
    cmd_tx: Sender<PlayerCommand>,
    finished_flag: Arc<AtomicBool>,
}

impl RodioBackend {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel::<PlayerCommand>();
        let finished_flag = Arc::new(AtomicBool::new(false));
        let finished = finished_flag.clone();

        thread::spawn(move || {
            let (stream, handle) = match OutputStream::try_default() {
                Ok(pair) => pair,
                Err(e) => {
                    warn!("no audio output available: {}", e);
                    // Answer every request with an error until the sender goes away.
                    while let Ok(cmd) = rx.recv() {
                        let unavailable = || SoundboardError::Playback(format!("no audio output: {}", e));
                        match cmd {
                            PlayerCommand::Start(_, reply) | PlayerCommand::Halt(reply) => {
                                let _ = reply.send(Err(unavailable()));
                            }
                            PlayerCommand::Release => {}
                        }
                    }
                    return;
                }
            };

            let mut sink: Option<Sink> = None;

            loop {
                match rx.recv_timeout(Duration::from_millis(100)) {
                    Ok(PlayerCommand::Start(path, reply)) => {
                        if let Some(s) = sink.take() {
                            s.stop();
                        }
                        finished.store(false, Ordering::SeqCst);

                        let result = open_sink(&handle, &path).map(|s| sink = Some(s));
                        let _ = reply.send(result);
                    }
                    Ok(PlayerCommand::Halt(reply)) => {
                        if let Some(s) = &sink {
                            s.stop();
                        }
                        let _ = reply.send(Ok(()));
                    }
                    Ok(PlayerCommand::Release) => {
                        sink = None;
                        finished.store(false, Ordering::SeqCst);
                    }
                    Err(RecvTimeoutError::Timeout) => {
                        if sink.as_ref().is_some_and(|s| s.empty()) {
                            finished.store(true, Ordering::SeqCst);
                        }
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }

            if let Some(s) = sink.take() {
                s.stop();
            }
            // Keep stream alive until thread exits
            drop(stream);
        });

        Self {
            cmd_tx: tx,
            finished_flag,
        }
    }

    fn request(&self, make: impl FnOnce(Sender<Result<()>>) -> PlayerCommand) -> Result<()> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.cmd_tx
            .send(make(reply_tx))
            .map_err(|_| SoundboardError::Playback("audio thread has stopped".into()))?;
        reply_rx
            .recv()
            .map_err(|_| SoundboardError::Playback("audio thread dropped the request".into()))?
    }
}

impl Default for RodioBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn open_sink(handle: &OutputStreamHandle, path: &Path) -> Result<Sink> {
    let file = File::open(path)
        .map_err(|e| SoundboardError::AudioLoad(format!("{}: {}", path.display(), e)))?;
    let source = Decoder::new(BufReader::new(file))
        .map_err(|e| SoundboardError::AudioLoad(format!("{}: {}", path.display(), e)))?;
    let sink = Sink::try_new(handle).map_err(|e| SoundboardError::Playback(e.to_string()))?;

    sink.append(source);
    sink.play();
    Ok(sink)
}

impl PlaybackBackend for RodioBackend {
    fn start(&mut self, path: &Path) -> Result<()> {
        let path = path.to_path_buf();
        self.request(|reply| PlayerCommand::Start(path, reply))
    }

    fn halt(&mut self) -> Result<()> {
        self.request(PlayerCommand::Halt)
    }

    fn release(&mut self) {
        let _ = self.cmd_tx.send(PlayerCommand::Release);
    }

    fn finished(&self) -> bool {
        self.finished_flag.load(Ordering::SeqCst)
    }
}

/// Plays one source at a time: `play` always stops and releases the previous
/// clip first, and `stop` releases even when halting fails.
pub struct PlaybackController<B: PlaybackBackend> {
    backend: B,
    assets_dir: PathBuf,
    active: Option<SoundSource>,
}

impl<B: PlaybackBackend> PlaybackController<B> {
    pub fn new(backend: B, assets_dir: PathBuf) -> Self {
        Self {
            backend,
            assets_dir,
            active: None,
        }
    }

    /// Stop whatever is playing, then load and start `source`.
    /// Failures are logged and leave the controller idle.
    pub fn play(&mut self, source: SoundSource) {
        self.stop();

        let path = source.resolve(&self.assets_dir);
        match self.backend.start(&path) {
            Ok(()) => {
                info!("playing {}", source);
                self.active = Some(source);
            }
            Err(e) => {
                error!("error loading or playing {}: {}", source, e);
                self.backend.release();
            }
        }
    }

    /// Halt and release the active clip, if any.
    pub fn stop(&mut self) {
        if let Some(source) = self.active.take() {
            if let Err(e) = self.backend.halt() {
                error!("error stopping {}: {}", source, e);
            }
            self.backend.release();
            debug!("released {}", source);
        }
    }

    /// Drop the handle of a clip that finished on its own.
    pub fn poll(&mut self) {
        if self.active.is_some() && self.backend.finished() {
            if let Some(source) = self.active.take() {
                debug!("{} finished", source);
            }
            self.backend.release();
        }
    }

    pub fn now_playing(&self) -> Option<&SoundSource> {
        self.active.as_ref()
    }

    /// True when the stored recording at `uri` is the active clip.
    pub fn is_playing_uri(&self, uri: &str) -> bool {
        matches!(&self.active, Some(SoundSource::Stored(u)) if u == uri)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: PlaybackBackend> Drop for PlaybackController<B> {
    fn drop(&mut self) {
        self.stop();
    }
}
