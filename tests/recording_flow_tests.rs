//! End-to-end recording flow tests
//!
//! These tests drive the session controller against the real filesystem
//! store, checking that every lifecycle transition leaves the disk in the
//! right state: saves persist, discards remove temp files, and leaving the
//! screen never strands an unsaved artifact.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::TempDir;

use voxpad::audio::{write_wav, AudioCapture};
use voxpad::session::{GuardChoice, SessionController, SessionEffect, SessionState};
use voxpad::storage::{FsRecordingStore, RecordingStore};
use voxpad::Result;

/// Capture fake that produces a real WAV file on stop, so the store can read
/// its duration the same way it would for a microphone capture.
struct TempWavCapture {
    dir: PathBuf,
    active: bool,
    produced: u32,
}

impl TempWavCapture {
    fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            active: false,
            produced: 0,
        }
    }
}

impl AudioCapture for TempWavCapture {
    fn start(&mut self) -> Result<()> {
        self.active = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<PathBuf> {
        self.active = false;
        self.produced += 1;
        let path = self.dir.join(format!("capture-{}.wav", self.produced));
        let samples: Vec<f32> = (0..8000).map(|i| (i as f32 * 0.02).sin() * 0.4).collect();
        write_wav(&path, &samples, 16000, 1)?;
        Ok(path)
    }

    fn elapsed(&self) -> Duration {
        Duration::from_millis(500)
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

fn controller(root: &TempDir) -> SessionController<TempWavCapture, FsRecordingStore> {
    let store = FsRecordingStore::new(root.path().join("records")).unwrap();
    SessionController::new(TempWavCapture::new(root.path()), store)
}

#[test]
fn test_record_and_save_persists_to_store() {
    let root = TempDir::new().unwrap();
    let mut ctl = controller(&root);

    ctl.start_capture().unwrap();
    ctl.stop_capture().unwrap();
    let temp = ctl.temp_file().unwrap().clone();
    assert!(temp.exists(), "capture should produce a real temp file");

    let effect = ctl.save().unwrap();
    let name = ctl.persisted_id().unwrap().to_string();
    assert_eq!(
        effect,
        SessionEffect::Reenter {
            name: Some(name.clone())
        }
    );
    assert_eq!(ctl.state(), SessionState::ReviewingNamed);

    assert!(!temp.exists(), "store should take ownership of the temp file");
    assert!(ctl.store().path_for(&name).exists());

    let listed = ctl.store().list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, name);
    assert!(
        (listed[0].duration_secs - 0.5).abs() < 0.01,
        "duration should come from the WAV header"
    );
}

#[test]
fn test_confirmed_discard_removes_temp_file() {
    let root = TempDir::new().unwrap();
    let mut ctl = controller(&root);

    ctl.start_capture().unwrap();
    ctl.stop_capture().unwrap();
    let temp = ctl.temp_file().unwrap().clone();

    assert_eq!(ctl.request_discard(), SessionEffect::ConfirmDiscard);
    assert_eq!(
        ctl.resolve_guard(GuardChoice::Discard),
        SessionEffect::Reenter { name: None }
    );

    assert_eq!(ctl.state(), SessionState::Idle);
    assert!(!temp.exists(), "discard should delete the artifact from disk");
}

#[test]
fn test_cancelled_discard_keeps_artifact_on_disk() {
    let root = TempDir::new().unwrap();
    let mut ctl = controller(&root);

    ctl.start_capture().unwrap();
    ctl.stop_capture().unwrap();
    let temp = ctl.temp_file().unwrap().clone();

    ctl.request_discard();
    assert_eq!(ctl.resolve_guard(GuardChoice::Cancel), SessionEffect::None);

    assert_eq!(
        ctl.state(),
        SessionState::ReviewingUnsaved,
        "cancel should leave the session exactly as before"
    );
    assert!(temp.exists());
}

#[test]
fn test_go_back_cleanup_discards_unsaved_artifact() {
    let root = TempDir::new().unwrap();
    let mut ctl = controller(&root);

    ctl.start_capture().unwrap();
    ctl.stop_capture().unwrap();
    let temp = ctl.temp_file().unwrap().clone();

    assert_eq!(ctl.request_go_back(), SessionEffect::ConfirmDiscard);
    assert_eq!(
        ctl.resolve_guard(GuardChoice::Discard),
        SessionEffect::NavigateBack
    );

    assert!(!temp.exists());
    assert!(ctl.store().list().unwrap().is_empty());
}

#[test]
fn test_saved_recording_survives_reset() {
    let root = TempDir::new().unwrap();
    let mut ctl = controller(&root);

    ctl.start_capture().unwrap();
    ctl.stop_capture().unwrap();
    ctl.save().unwrap();
    let name = ctl.persisted_id().unwrap().to_string();

    // Re-record after save skips the guard and must not touch the saved file.
    assert_eq!(ctl.request_reset(), SessionEffect::Reenter { name: None });
    assert_eq!(ctl.state(), SessionState::Idle);

    assert!(ctl.store().path_for(&name).exists());
    assert_eq!(ctl.store().list().unwrap().len(), 1);
}

#[test]
fn test_bind_saved_points_at_store_artifact() {
    let root = TempDir::new().unwrap();
    let name = {
        let mut ctl = controller(&root);
        ctl.start_capture().unwrap();
        ctl.stop_capture().unwrap();
        ctl.save().unwrap();
        ctl.persisted_id().unwrap().to_string()
    };

    // A fresh session bound to the saved name reviews the durable copy.
    let mut ctl = controller(&root);
    ctl.bind_saved(&name);

    assert_eq!(ctl.state(), SessionState::ReviewingNamed);
    let bound = ctl.temp_file().unwrap();
    assert_eq!(bound, &ctl.store().path_for(&name));
    assert!(bound.exists());
}

#[test]
fn test_leaving_while_recording_discards_capture_output() {
    let root = TempDir::new().unwrap();
    let mut ctl = controller(&root);

    ctl.start_capture().unwrap();
    ctl.on_leave();

    assert_eq!(ctl.state(), SessionState::Idle);
    let stranded = std::fs::read_dir(root.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "wav"))
        .count();
    assert_eq!(stranded, 0, "cleanup should remove the stopped capture file");
}

#[test]
fn test_delete_removes_saved_artifact() {
    let root = TempDir::new().unwrap();
    let mut ctl = controller(&root);

    ctl.start_capture().unwrap();
    ctl.stop_capture().unwrap();
    ctl.save().unwrap();
    let name = ctl.persisted_id().unwrap().to_string();
    let path = ctl.store().path_for(&name);

    ctl.store_mut().delete(&name).unwrap();

    assert!(!path.exists());
    assert!(ctl.store().list().unwrap().is_empty());
}
