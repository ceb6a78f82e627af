//! WAV playback backed by cpal
//!
//! One output stream runs for the player's lifetime; the callback reads from
//! a shared cursor and emits silence when paused or out of samples.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Stream, StreamConfig};
use parking_lot::Mutex;
use tracing::{error, info};

use super::{read_wav, Playback};
use crate::{Result, VoxpadError};

#[derive(Default)]
struct Cursor {
    samples: Arc<Vec<f32>>,
    position: usize,
    playing: bool,
}

pub struct WavPlayer {
    // Held for its side effect; dropping it stops the output stream.
    _stream: Stream,
    cursor: Arc<Mutex<Cursor>>,
    output_rate: u32,
}

impl WavPlayer {
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| VoxpadError::AudioDeviceError("no output device available".into()))?;

        info!(
            "Using output device: {}",
            device.name().unwrap_or_else(|_| "Unknown".to_string())
        );

        let config: StreamConfig = device
            .default_output_config()
            .map_err(|e| VoxpadError::AudioDeviceError(format!("output config: {}", e)))?
            .into();

        let channels = config.channels as usize;
        let output_rate = config.sample_rate.0;
        let cursor = Arc::new(Mutex::new(Cursor::default()));
        let cb_cursor = Arc::clone(&cursor);

        let err_fn = |err| {
            error!("Audio output stream error: {}", err);
        };

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let mut cur = cb_cursor.lock();
                    if !cur.playing {
                        data.fill(0.0);
                        return;
                    }

                    let frames = data.len() / channels;
                    for frame in 0..frames {
                        let sample = cur.samples.get(cur.position).copied().unwrap_or(0.0);
                        for c in 0..channels {
                            data[frame * channels + c] = sample;
                        }
                        if cur.position < cur.samples.len() {
                            cur.position += 1;
                        }
                    }

                    if cur.position >= cur.samples.len() {
                        cur.playing = false;
                    }
                },
                err_fn,
                None,
            )
            .map_err(|e| VoxpadError::AudioDeviceError(format!("build output stream: {}", e)))?;

        stream
            .play()
            .map_err(|e| VoxpadError::AudioDeviceError(format!("start output stream: {}", e)))?;

        Ok(Self {
            _stream: stream,
            cursor,
            output_rate,
        })
    }

    /// Linear-interpolation rate conversion. Fidelity is not a goal here; the
    /// review player only needs intelligible playback at the device rate.
    fn convert_rate(samples: &[f32], src_rate: u32, dst_rate: u32) -> Vec<f32> {
        if src_rate == dst_rate || samples.is_empty() {
            return samples.to_vec();
        }

        let ratio = src_rate as f64 / dst_rate as f64;
        let out_len = (samples.len() as f64 / ratio) as usize;
        (0..out_len)
            .map(|i| {
                let src = i as f64 * ratio;
                let idx = src as usize;
                let frac = (src - idx as f64) as f32;
                let a = samples[idx.min(samples.len() - 1)];
                let b = samples[(idx + 1).min(samples.len() - 1)];
                a + (b - a) * frac
            })
            .collect()
    }
}

impl Playback for WavPlayer {
    fn load(&mut self, path: &Path) -> Result<()> {
        let (samples, sample_rate, channels) = read_wav(path)?;

        // Downmix interleaved channels to mono before rate conversion.
        let mono: Vec<f32> = if channels <= 1 {
            samples
        } else {
            samples
                .chunks(channels as usize)
                .map(|frame| frame.iter().sum::<f32>() / channels as f32)
                .collect()
        };

        let converted = Self::convert_rate(&mono, sample_rate, self.output_rate);

        let mut cur = self.cursor.lock();
        cur.samples = Arc::new(converted);
        cur.position = 0;
        cur.playing = false;

        info!("Loaded {} for playback", path.display());
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let mut cur = self.cursor.lock();
        if cur.samples.is_empty() {
            return Err(VoxpadError::AudioDeviceError("nothing loaded".into()));
        }
        if cur.position >= cur.samples.len() {
            // Replay from the top once finished.
            cur.position = 0;
        }
        cur.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.cursor.lock().playing = false;
    }

    fn elapsed(&self) -> Duration {
        let cur = self.cursor.lock();
        Duration::from_secs_f64(cur.position as f64 / self.output_rate as f64)
    }

    fn is_playing(&self) -> bool {
        self.cursor.lock().playing
    }

    fn is_finished(&self) -> bool {
        let cur = self.cursor.lock();
        !cur.samples.is_empty() && cur.position >= cur.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_rate_identity() {
        let samples = vec![0.0, 0.5, 1.0];
        assert_eq!(WavPlayer::convert_rate(&samples, 16000, 16000), samples);
    }

    #[test]
    fn test_convert_rate_upsamples() {
        let samples: Vec<f32> = (0..1600).map(|i| (i as f32 * 0.01).sin()).collect();
        let out = WavPlayer::convert_rate(&samples, 16000, 48000);
        assert!(out.len() > samples.len() * 2);
    }

    #[test]
    fn test_convert_rate_downsamples() {
        let samples: Vec<f32> = (0..4800).map(|i| (i as f32 * 0.01).sin()).collect();
        let out = WavPlayer::convert_rate(&samples, 48000, 16000);
        assert!(out.len() < samples.len());
        assert!(!out.is_empty());
    }
}
