// src/audio/capture.rs
//! Microphone capture to a 16-bit WAV file using cpal and hound.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    Device, SampleFormat, SizedSample, Stream, StreamConfig, SupportedStreamConfig,
};
use cpal::{FromSample, Sample};
use hound::{WavSpec, WavWriter};
use log::{debug, error, info, warn};
use ringbuf::{traits::*, HeapRb};

use crate::error::{Result, SoundboardError};

type SharedWriter = Arc<Mutex<Option<WavSink<BufWriter<File>>>>>;

/// Recent input samples kept for the level meter.
const LEVEL_WINDOW: usize = 4096;

/// The device side of recording.
pub trait CaptureBackend {
    /// Ask for access to the microphone.
    fn request_permission(&mut self) -> Result<()>;
    /// Prepare the input session (device and stream format).
    fn configure(&mut self) -> Result<()>;
    /// Start writing captured audio to `path`.
    fn begin(&mut self, path: &Path) -> Result<()>;
    /// Stop capturing and finalize the file, returning its path.
    fn finish(&mut self) -> Result<PathBuf>;
    /// Input level of the last few milliseconds, 0.0 to 1.0.
    fn level(&self) -> f32 {
        0.0
    }
}

/// Default-input-device capture.
pub struct CpalCapture {
    device: Option<Device>,
    config: Option<SupportedStreamConfig>,
    stream: Option<Stream>,
    writer: SharedWriter,
    path: Option<PathBuf>,
    levels: Arc<Mutex<HeapRb<f32>>>,
}

impl CpalCapture {
    pub fn new() -> Self {
        Self {
            device: None,
            config: None,
            stream: None,
            writer: Arc::new(Mutex::new(None)),
            path: None,
            levels: Arc::new(Mutex::new(HeapRb::<f32>::new(LEVEL_WINDOW))),
        }
    }
}

impl Default for CpalCapture {
    fn default() -> Self {
        Self::new()
    }
}

/// WAV output fed from the input callback. Stops writing at the first error
/// and reports it when the file is finalized.
pub struct WavSink<W: Write + Seek> {
    writer: WavWriter<W>,
    error: Option<String>,
}

impl<W: Write + Seek> WavSink<W> {
    pub fn new(writer: WavWriter<W>) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    /// Append samples in -1.0..=1.0 as 16-bit PCM.
    pub fn write(&mut self, samples: impl IntoIterator<Item = f32>) {
        if self.error.is_some() {
            return;
        }
        for v in samples {
            let v = v.clamp(-1.0, 1.0);
            if let Err(e) = self.writer.write_sample((v * i16::MAX as f32) as i16) {
                self.error = Some(e.to_string());
                return;
            }
        }
    }

    /// Complete the file. A clip that hit a write error is reported as lost.
    pub fn finalize(self) -> Result<()> {
        let finalized = self.writer.finalize();
        if let Some(e) = self.error {
            return Err(SoundboardError::RecordingLost(format!("write failed: {}", e)));
        }
        finalized.map_err(|e| SoundboardError::RecordingLost(e.to_string()))
    }
}

/// Build an input stream that converts every sample to i16 for the WAV writer
/// and mirrors it into the level buffer.
fn build_stream<T>(
    device: &Device,
    config: &StreamConfig,
    writer: SharedWriter,
    levels: Arc<Mutex<HeapRb<f32>>>,
) -> Result<Stream>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                if let Ok(mut guard) = writer.lock() {
                    if let Some(sink) = guard.as_mut() {
                        sink.write(data.iter().map(|s| s.to_sample::<f32>()));
                    }
                }
                if let Ok(mut buf) = levels.lock() {
                    for &s in data {
                        if buf.is_full() {
                            let _ = buf.try_pop();
                        }
                        let _ = buf.try_push(s.to_sample::<f32>());
                    }
                }
            },
            |e| error!("input stream error: {}", e),
            None,
        )
        .map_err(|e| SoundboardError::RecordingStart(e.to_string()))
}

impl CaptureBackend for CpalCapture {
    fn request_permission(&mut self) -> Result<()> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| SoundboardError::PermissionDenied("no input device available".into()))?;

        if let Ok(name) = device.name() {
            info!("using input device {}", name);
        }
        self.device = Some(device);
        Ok(())
    }

    fn configure(&mut self) -> Result<()> {
        let device = self
            .device
            .as_ref()
            .ok_or_else(|| SoundboardError::PermissionDenied("microphone not granted".into()))?;

        let config = device
            .default_input_config()
            .map_err(|e| SoundboardError::RecordingStart(e.to_string()))?;
        debug!(
            "input config: {} ch, {} Hz, {:?}",
            config.channels(),
            config.sample_rate().0,
            config.sample_format()
        );
        self.config = Some(config);
        Ok(())
    }

    fn begin(&mut self, path: &Path) -> Result<()> {
        if self.stream.is_some() {
            return Err(SoundboardError::AlreadyRecording);
        }
        let (device, supported) = match (&self.device, &self.config) {
            (Some(d), Some(c)) => (d, c.clone()),
            _ => return Err(SoundboardError::RecordingStart("input not configured".into())),
        };

        let sample_format = supported.sample_format();
        let config: StreamConfig = supported.into();

        let spec = WavSpec {
            channels: config.channels,
            sample_rate: config.sample_rate.0,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let wav = WavWriter::create(path, spec)
            .map_err(|e| SoundboardError::RecordingStart(format!("{}: {}", path.display(), e)))?;
        if let Ok(mut guard) = self.writer.lock() {
            *guard = Some(WavSink::new(wav));
        }
        if let Ok(mut buf) = self.levels.lock() {
            buf.clear();
        }

        let writer = self.writer.clone();
        let levels = self.levels.clone();
        let stream = match sample_format {
            SampleFormat::I16 => build_stream::<i16>(device, &config, writer, levels),
            SampleFormat::U16 => build_stream::<u16>(device, &config, writer, levels),
            SampleFormat::F32 => build_stream::<f32>(device, &config, writer, levels),
            other => Err(SoundboardError::RecordingStart(format!(
                "unsupported sample format {:?}",
                other
            ))),
        };
        let stream = match stream.and_then(|s| {
            s.play()
                .map(|_| s)
                .map_err(|e| SoundboardError::RecordingStart(e.to_string()))
        }) {
            Ok(s) => s,
            Err(e) => {
                // Don't leave a half-written file open.
                if let Ok(mut guard) = self.writer.lock() {
                    guard.take();
                }
                let _ = std::fs::remove_file(path);
                return Err(e);
            }
        };

        self.stream = Some(stream);
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    fn finish(&mut self) -> Result<PathBuf> {
        let stream = self.stream.take().ok_or(SoundboardError::NotRecording)?;
        // Still holding every resource here, so this one is retryable.
        if let Err(e) = stream.pause() {
            self.stream = Some(stream);
            return Err(SoundboardError::RecordingStop(e.to_string()));
        }
        drop(stream);

        let path = self.path.take().ok_or(SoundboardError::NotRecording)?;
        let sink = match self.writer.lock() {
            Ok(mut guard) => guard.take(),
            Err(_) => None,
        };
        let finalized = match sink {
            Some(sink) => sink.finalize(),
            None => Err(SoundboardError::RecordingLost("wav writer unavailable".into())),
        };
        if let Err(e) = finalized {
            warn!("discarding partial recording {}", path.display());
            let _ = std::fs::remove_file(&path);
            return Err(e);
        }
        Ok(path)
    }

    fn level(&self) -> f32 {
        let Ok(buf) = self.levels.lock() else {
            return 0.0;
        };
        let n = buf.occupied_len();
        if n == 0 {
            return 0.0;
        }
        let sum: f32 = buf.iter().map(|s| s * s).sum();
        (sum / n as f32).sqrt().clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor, SeekFrom};

    use super::*;

    /// In-memory file that refuses to grow past `limit` bytes.
    struct CappedFile {
        inner: Cursor<Vec<u8>>,
        limit: usize,
    }

    impl Write for CappedFile {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let end = self.inner.position() as usize + buf.len();
            if end > self.limit {
                return Err(io::Error::new(io::ErrorKind::StorageFull, "disk full"));
            }
            self.inner.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Seek for CappedFile {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    fn sink(limit: usize) -> WavSink<CappedFile> {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let file = CappedFile {
            inner: Cursor::new(Vec::new()),
            limit,
        };
        WavSink::new(WavWriter::new(file, spec).unwrap())
    }

    #[test]
    fn complete_clip_finalizes() {
        let mut s = sink(1 << 20);
        s.write([0.0, 0.5, -0.5, 2.0]);
        assert!(s.finalize().is_ok());
    }

    #[test]
    fn write_error_is_reported_on_finalize() {
        let mut s = sink(100);
        s.write(std::iter::repeat(0.25).take(200));
        assert!(s.error.is_some());

        // Later samples are ignored once the file is broken.
        s.write([0.1]);
        assert!(matches!(s.finalize(), Err(SoundboardError::RecordingLost(_))));
    }

    #[test]
    fn finish_without_begin_is_not_recording() {
        let mut capture = CpalCapture::new();
        assert!(matches!(capture.finish(), Err(SoundboardError::NotRecording)));
    }
}
