//! Persistence for saved recordings
//!
//! Saved recordings live as WAV files in a records directory, with an
//! `index.json` sidecar carrying display metadata.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{Result, VoxpadError};

/// Metadata for one durably saved recording
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedRecording {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub duration_secs: f32,
}

/// Opaque persistence capability consumed by the session controller
pub trait RecordingStore {
    /// Persist a temp capture file, returning its durable name. The store
    /// takes ownership of the file.
    fn save_new_recording(&mut self, temp: &Path) -> Result<String>;

    /// All saved recordings, newest first
    fn list(&self) -> Result<Vec<SavedRecording>>;

    /// Remove a saved recording and its metadata
    fn delete(&mut self, name: &str) -> Result<()>;

    /// Path of the playable artifact for a saved name
    fn path_for(&self, name: &str) -> PathBuf;
}

/// Filesystem-backed recording store
pub struct FsRecordingStore {
    records_dir: PathBuf,
}

impl FsRecordingStore {
    pub fn new(records_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&records_dir)
            .map_err(|e| VoxpadError::PersistenceError(format!("create records dir: {}", e)))?;
        Ok(Self { records_dir })
    }

    fn index_path(&self) -> PathBuf {
        self.records_dir.join("index.json")
    }

    fn load_index(&self) -> BTreeMap<String, SavedRecording> {
        let path = self.index_path();
        match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                warn!("Corrupt recording index, starting fresh: {}", e);
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        }
    }

    fn store_index(&self, index: &BTreeMap<String, SavedRecording>) -> Result<()> {
        let json = serde_json::to_string_pretty(index)
            .map_err(|e| VoxpadError::PersistenceError(format!("encode index: {}", e)))?;
        fs::write(self.index_path(), json)
            .map_err(|e| VoxpadError::PersistenceError(format!("write index: {}", e)))
    }

    fn wav_duration_secs(path: &Path) -> f32 {
        match hound::WavReader::open(path) {
            Ok(reader) => {
                let spec = reader.spec();
                let frames = reader.len() / spec.channels as u32;
                frames as f32 / spec.sample_rate as f32
            }
            Err(e) => {
                warn!("Could not read duration of {}: {}", path.display(), e);
                0.0
            }
        }
    }
}

impl RecordingStore for FsRecordingStore {
    fn save_new_recording(&mut self, temp: &Path) -> Result<String> {
        if !temp.exists() {
            return Err(VoxpadError::PersistenceError(format!(
                "temp file missing: {}",
                temp.display()
            )));
        }

        let created_at = Utc::now();
        let mut name = format!("rec-{}.wav", created_at.format("%Y%m%d-%H%M%S"));
        if self.path_for(&name).exists() {
            name = format!("rec-{}.wav", created_at.format("%Y%m%d-%H%M%S%.3f"));
        }

        let dest = self.path_for(&name);
        let duration_secs = Self::wav_duration_secs(temp);

        // Rename fails across filesystems; fall back to copy + remove.
        if fs::rename(temp, &dest).is_err() {
            fs::copy(temp, &dest)
                .map_err(|e| VoxpadError::PersistenceError(format!("copy recording: {}", e)))?;
            fs::remove_file(temp).ok();
        }

        let mut index = self.load_index();
        index.insert(
            name.clone(),
            SavedRecording {
                name: name.clone(),
                created_at,
                duration_secs,
            },
        );
        self.store_index(&index)?;

        info!("Persisted recording {} ({:.1}s)", name, duration_secs);
        Ok(name)
    }

    fn list(&self) -> Result<Vec<SavedRecording>> {
        let mut recordings: Vec<SavedRecording> = self
            .load_index()
            .into_values()
            .filter(|rec| {
                let present = self.path_for(&rec.name).exists();
                if !present {
                    warn!("Indexed recording {} is missing on disk", rec.name);
                }
                present
            })
            .collect();

        recordings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(recordings)
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        let path = self.path_for(name);
        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| VoxpadError::PersistenceError(format!("delete recording: {}", e)))?;
        }

        let mut index = self.load_index();
        if index.remove(name).is_some() {
            self.store_index(&index)?;
        }

        info!("Deleted recording {}", name);
        Ok(())
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.records_dir.join(name)
    }
}
