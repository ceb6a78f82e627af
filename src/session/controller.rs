//! Recording session lifecycle controller
//!
//! Orchestrates the record -> stop -> review -> (save | discard | re-record)
//! flow. Destructive transitions go through a confirmation guard: the
//! controller parks the requested action in a single pending slot and only
//! executes it when the user's answer arrives via [`SessionController::resolve_guard`].

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::audio::AudioCapture;
use crate::storage::RecordingStore;
use crate::Result;

/// Lifecycle state of the recording session
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// No capture and no artifact
    Idle,
    /// Actively recording from the microphone
    Recording,
    /// A temp file exists but has not been persisted
    ReviewingUnsaved,
    /// The artifact has been saved under a durable name
    ReviewingNamed,
}

impl SessionState {
    pub fn is_recording(&self) -> bool {
        matches!(self, SessionState::Recording)
    }

    pub fn is_reviewing(&self) -> bool {
        matches!(
            self,
            SessionState::ReviewingUnsaved | SessionState::ReviewingNamed
        )
    }
}

/// Destructive action parked behind the confirmation guard
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingAction {
    /// Discard the unsaved artifact and re-enter the screen empty
    Discard,
    /// Discard whatever is unsaved and leave the screen
    GoBack,
}

/// User's answer to the confirmation prompt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardChoice {
    Discard,
    Cancel,
}

/// Side effect requested from the UI layer
///
/// Navigation is an opaque capability of the caller; the controller only
/// describes what should happen next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEffect {
    /// Nothing to do
    None,
    /// Present the discard confirmation prompt
    ConfirmDiscard,
    /// Re-enter the recording screen, optionally bound to a saved name
    Reenter { name: Option<String> },
    /// Leave the recording screen
    NavigateBack,
}

/// Controller for one recording session
pub struct SessionController<C, S> {
    capture: C,
    store: S,
    temp_file: Option<PathBuf>,
    persisted_id: Option<String>,
    recording_active: bool,
    pending: Option<PendingAction>,
    frozen_elapsed: Option<Duration>,
}

impl<C: AudioCapture, S: RecordingStore> SessionController<C, S> {
    pub fn new(capture: C, store: S) -> Self {
        Self {
            capture,
            store,
            temp_file: None,
            persisted_id: None,
            recording_active: false,
            pending: None,
            frozen_elapsed: None,
        }
    }

    /// Current lifecycle state, derived from the session fields so the
    /// "at most one of recording / reviewing / idle" invariant holds by
    /// construction.
    pub fn state(&self) -> SessionState {
        if self.recording_active {
            SessionState::Recording
        } else if self.temp_file.is_some() {
            if self.persisted_id.is_some() {
                SessionState::ReviewingNamed
            } else {
                SessionState::ReviewingUnsaved
            }
        } else {
            SessionState::Idle
        }
    }

    pub fn temp_file(&self) -> Option<&PathBuf> {
        self.temp_file.as_ref()
    }

    pub fn persisted_id(&self) -> Option<&str> {
        self.persisted_id.as_deref()
    }

    /// Whether a confirmation prompt is awaiting an answer. Callers should
    /// disable the triggering controls while this is set.
    pub fn guard_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Elapsed recording time: live and monotonically non-decreasing while
    /// recording, frozen at its last value once capture stops.
    pub fn elapsed(&self) -> Duration {
        if let Some(frozen) = self.frozen_elapsed {
            frozen
        } else if self.recording_active {
            self.capture.elapsed()
        } else {
            Duration::ZERO
        }
    }

    /// Idle -> Recording. Fails with `CaptureUnavailable` when the microphone
    /// cannot be acquired; the session stays Idle in that case.
    pub fn start_capture(&mut self) -> Result<()> {
        if self.state() != SessionState::Idle {
            warn!("start_capture ignored in state {:?}", self.state());
            return Ok(());
        }

        self.capture.start()?;
        self.recording_active = true;
        self.frozen_elapsed = None;
        info!("Capture started");
        Ok(())
    }

    /// Recording -> ReviewingUnsaved. Fails with `CaptureWriteError` when no
    /// file was produced; the session state is left unchanged.
    pub fn stop_capture(&mut self) -> Result<()> {
        if !self.recording_active {
            warn!("stop_capture ignored while not recording");
            return Ok(());
        }

        let frozen = self.capture.elapsed();
        match self.capture.stop() {
            Ok(path) => {
                self.frozen_elapsed = Some(frozen);
                self.recording_active = false;
                info!("Capture stopped, temp file at {}", path.display());
                self.temp_file = Some(path);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Request discarding the current artifact. Always guarded while the
    /// artifact is unsaved; with a named artifact this is the unguarded
    /// "re-record" reset.
    pub fn request_reset(&mut self) -> SessionEffect {
        if self.pending.is_some() {
            warn!("reset requested while a guard is pending");
            return SessionEffect::None;
        }

        if self.persisted_id.is_some() {
            // Already durably saved, nothing to lose.
            self.clear_binding();
            SessionEffect::Reenter { name: None }
        } else {
            self.request_discard()
        }
    }

    /// Request discarding the unsaved artifact. Parks the action behind the
    /// confirmation guard.
    pub fn request_discard(&mut self) -> SessionEffect {
        if self.pending.is_some() {
            warn!("discard requested while a guard is pending");
            return SessionEffect::None;
        }
        if self.state() != SessionState::ReviewingUnsaved {
            warn!("discard requested in state {:?}", self.state());
            return SessionEffect::None;
        }

        self.pending = Some(PendingAction::Discard);
        SessionEffect::ConfirmDiscard
    }

    /// Request leaving the screen. Guarded only when unsaved content exists:
    /// a temp file with no persisted id, or an active capture. Going back
    /// with a named, saved recording never prompts.
    pub fn request_go_back(&mut self) -> SessionEffect {
        if self.pending.is_some() {
            warn!("go-back requested while a guard is pending");
            return SessionEffect::None;
        }

        let unsaved =
            (self.temp_file.is_some() && self.persisted_id.is_none()) || self.recording_active;

        if unsaved {
            self.pending = Some(PendingAction::GoBack);
            SessionEffect::ConfirmDiscard
        } else {
            self.on_leave();
            SessionEffect::NavigateBack
        }
    }

    /// Deliver the user's answer to the confirmation prompt. The pending
    /// action executes at most once; `Cancel` leaves the session exactly as
    /// if the guard had never been triggered.
    pub fn resolve_guard(&mut self, choice: GuardChoice) -> SessionEffect {
        let Some(action) = self.pending.take() else {
            debug!("guard resolved with nothing pending");
            return SessionEffect::None;
        };

        match choice {
            GuardChoice::Cancel => SessionEffect::None,
            GuardChoice::Discard => match action {
                PendingAction::Discard => {
                    self.discard_artifact();
                    SessionEffect::Reenter { name: None }
                }
                PendingAction::GoBack => {
                    self.on_leave();
                    SessionEffect::NavigateBack
                }
            },
        }
    }

    /// ReviewingUnsaved -> ReviewingNamed. Persists the temp file; on failure
    /// the session stays ReviewingUnsaved and the error is surfaced once.
    pub fn save(&mut self) -> Result<SessionEffect> {
        if self.state() != SessionState::ReviewingUnsaved {
            warn!("save requested in state {:?}", self.state());
            return Ok(SessionEffect::None);
        }

        let Some(temp) = self.temp_file.clone() else {
            return Ok(SessionEffect::None);
        };
        let name = self.store.save_new_recording(&temp)?;
        info!("Saved recording as {}", name);

        // The store took ownership of the file; the session now points at the
        // durable copy.
        self.temp_file = Some(self.store.path_for(&name));
        self.persisted_id = Some(name.clone());
        Ok(SessionEffect::Reenter { name: Some(name) })
    }

    /// Bind the session to an already-saved recording (screen entered with a
    /// recording name). Any unsaved temp artifact is released first.
    pub fn bind_saved(&mut self, name: &str) {
        if self.recording_active || (self.temp_file.is_some() && self.persisted_id.is_none()) {
            warn!("binding saved recording over unsaved content");
            self.on_leave();
        }

        self.temp_file = Some(self.store.path_for(name));
        self.persisted_id = Some(name.to_string());
    }

    /// Scoped-resource cleanup when the screen goes away: an active capture
    /// is stopped and its output discarded, an unsaved temp file is removed,
    /// a pending guard is dropped unanswered.
    pub fn on_leave(&mut self) {
        self.pending = None;

        if self.recording_active {
            self.recording_active = false;
            match self.capture.stop() {
                Ok(path) => {
                    debug!("discarding capture stopped on leave: {}", path.display());
                    std::fs::remove_file(&path).ok();
                }
                Err(e) => warn!("capture stop on leave failed: {}", e),
            }
        }

        if self.persisted_id.is_none() {
            if let Some(path) = self.temp_file.take() {
                std::fs::remove_file(&path).ok();
            }
        }

        self.clear_binding();
    }

    fn discard_artifact(&mut self) {
        if let Some(path) = self.temp_file.take() {
            info!("Discarding unsaved recording {}", path.display());
            std::fs::remove_file(&path).ok();
        }
        self.clear_binding();
    }

    fn clear_binding(&mut self) {
        self.temp_file = None;
        self.persisted_id = None;
        self.frozen_elapsed = None;
    }
}

/// Format an elapsed duration as a truncated `MM:SS` string. Sub-second and
/// hour components are dropped; minutes wrap at 60.
pub fn format_mmss(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", (secs / 60) % 60, secs % 60)
}
