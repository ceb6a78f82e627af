//! Microphone capture backed by cpal
//!
//! Samples flow from the cpal callback over a crossbeam channel into an
//! accumulation buffer; `stop` drains the buffer into a WAV temp file.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Stream, StreamConfig};
use crossbeam_channel::bounded;
use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use super::{write_wav, AudioCapture};
use crate::{Result, VoxpadError};

pub struct CpalCapture {
    temp_dir: PathBuf,
    stream: Option<Stream>,
    accumulator: Option<std::thread::JoinHandle<()>>,
    samples: Arc<Mutex<Vec<f32>>>,
    sample_rate: u32,
    started_at: Option<Instant>,
}

impl CpalCapture {
    pub fn new(temp_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&temp_dir)?;
        Ok(Self {
            temp_dir,
            stream: None,
            accumulator: None,
            samples: Arc::new(Mutex::new(Vec::new())),
            sample_rate: 0,
            started_at: None,
        })
    }
}

impl AudioCapture for CpalCapture {
    fn start(&mut self) -> Result<()> {
        if self.stream.is_some() {
            warn!("Already capturing");
            return Ok(());
        }

        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| VoxpadError::CaptureUnavailable("no input device available".into()))?;

        info!(
            "Using input device: {}",
            device.name().unwrap_or_else(|_| "Unknown".to_string())
        );

        let config: StreamConfig = device
            .default_input_config()
            .map_err(|e| VoxpadError::CaptureUnavailable(format!("input config: {}", e)))?
            .into();

        let channels = config.channels as usize;
        self.sample_rate = config.sample_rate.0;
        self.samples.lock().clear();

        let (tx, rx) = bounded::<Vec<f32>>(64);

        let err_fn = |err| {
            error!("Audio input stream error: {}", err);
        };

        let stream = device
            .build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    // Downmix to mono by averaging channels
                    let mono = if channels == 1 {
                        data.to_vec()
                    } else {
                        data.chunks(channels)
                            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
                            .collect()
                    };

                    if let Err(e) = tx.try_send(mono) {
                        debug!("Dropping capture chunk: {}", e);
                    }
                },
                err_fn,
                None,
            )
            .map_err(|e| VoxpadError::CaptureUnavailable(format!("build input stream: {}", e)))?;

        stream
            .play()
            .map_err(|e| VoxpadError::CaptureUnavailable(format!("start input stream: {}", e)))?;

        // Drain the channel off the audio thread; exits when the stream (and
        // with it the sender) is dropped.
        let samples = Arc::clone(&self.samples);
        let accumulator = std::thread::spawn(move || {
            while let Ok(chunk) = rx.recv() {
                samples.lock().extend_from_slice(&chunk);
            }
        });

        self.stream = Some(stream);
        self.accumulator = Some(accumulator);
        self.started_at = Some(Instant::now());
        info!("Capture started at {} Hz", self.sample_rate);
        Ok(())
    }

    fn stop(&mut self) -> Result<PathBuf> {
        let Some(stream) = self.stream.take() else {
            return Err(VoxpadError::CaptureWriteError("capture not running".into()));
        };
        drop(stream);
        self.started_at = None;

        if let Some(handle) = self.accumulator.take() {
            if handle.join().is_err() {
                warn!("Capture accumulator thread panicked");
            }
        }

        let samples = std::mem::take(&mut *self.samples.lock());
        if samples.is_empty() {
            return Err(VoxpadError::CaptureWriteError("no samples captured".into()));
        }

        let path = self
            .temp_dir
            .join(format!("capture-{}.wav", uuid::Uuid::new_v4()));
        write_wav(&path, &samples, self.sample_rate, 1)?;

        info!(
            "Wrote {} samples to {}",
            samples.len(),
            path.display()
        );
        Ok(path)
    }

    fn elapsed(&self) -> Duration {
        self.started_at.map(|t| t.elapsed()).unwrap_or_default()
    }

    fn is_active(&self) -> bool {
        self.stream.is_some()
    }
}

impl Drop for CpalCapture {
    fn drop(&mut self) {
        if self.is_active() {
            if let Ok(path) = self.stop() {
                debug!("Discarding capture file on drop: {}", path.display());
                std::fs::remove_file(&path).ok();
            }
        }
    }
}
