pub mod audio;
pub mod config;
pub mod session;
pub mod storage;
pub mod ui;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum VoxpadError {
    #[error("Capture unavailable: {0}")]
    CaptureUnavailable(String),

    #[error("Capture produced no file: {0}")]
    CaptureWriteError(String),

    #[error("Persistence error: {0}")]
    PersistenceError(String),

    #[error("Audio device error: {0}")]
    AudioDeviceError(String),

    #[error("IO error: {0}")]
    IOError(String),
}

impl From<std::io::Error> for VoxpadError {
    fn from(e: std::io::Error) -> Self {
        VoxpadError::IOError(e.to_string())
    }
}

impl VoxpadError {
    /// Get a user-friendly description for the blocking error notice
    pub fn user_message(&self) -> String {
        match self {
            VoxpadError::CaptureUnavailable(_) => {
                "Microphone unavailable. Please check your input device and permissions.".to_string()
            }
            VoxpadError::CaptureWriteError(_) => {
                "The recording could not be written. Please try again.".to_string()
            }
            VoxpadError::PersistenceError(_) => {
                "The recording could not be saved. Please try again.".to_string()
            }
            VoxpadError::AudioDeviceError(_) => {
                "Audio device error. Please check your speakers.".to_string()
            }
            VoxpadError::IOError(_) => "File system error occurred.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VoxpadError>;
