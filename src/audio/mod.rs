//! Audio capabilities: microphone capture and WAV playback
//!
//! The session controller and the UI consume these through the
//! [`AudioCapture`] and [`Playback`] traits; the cpal-backed implementations
//! live behind the `audio-io` feature.

#[cfg(feature = "audio-io")]
pub mod capture;
#[cfg(feature = "audio-io")]
pub mod playback;
pub mod wav;

#[cfg(feature = "audio-io")]
pub use capture::CpalCapture;
#[cfg(feature = "audio-io")]
pub use playback::WavPlayer;
pub use wav::{read_wav, write_wav};

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::Result;

/// Opaque microphone capture capability
pub trait AudioCapture {
    /// Start hardware capture. Fails with `CaptureUnavailable` when no input
    /// device can be acquired.
    fn start(&mut self) -> Result<()>;

    /// Stop capture and return the temp file holding the recording. Fails
    /// with `CaptureWriteError` when no file was produced.
    fn stop(&mut self) -> Result<PathBuf>;

    /// Elapsed capture time, monotonic while active
    fn elapsed(&self) -> Duration;

    /// Whether capture is currently running
    fn is_active(&self) -> bool;
}

impl AudioCapture for Box<dyn AudioCapture> {
    fn start(&mut self) -> Result<()> {
        (**self).start()
    }

    fn stop(&mut self) -> Result<PathBuf> {
        (**self).stop()
    }

    fn elapsed(&self) -> Duration {
        (**self).elapsed()
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}

/// Opaque playback capability for reviewing a recording
pub trait Playback {
    /// Load an audio file, resetting the play position
    fn load(&mut self, path: &Path) -> Result<()>;

    fn play(&mut self) -> Result<()>;

    fn pause(&mut self);

    /// Elapsed playback time within the loaded file
    fn elapsed(&self) -> Duration;

    fn is_playing(&self) -> bool;

    /// Whether playback has consumed the whole file
    fn is_finished(&self) -> bool;
}
