//! Application configuration

use std::path::PathBuf;

/// Configuration for the Voxpad application
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory where saved recordings live
    pub records_dir: PathBuf,

    /// Directory for unsaved capture temp files
    pub temp_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let records_dir = dirs::data_dir()
            .map(|d| d.join("voxpad").join("recordings"))
            .unwrap_or_else(|| PathBuf::from("recordings"));

        Self {
            records_dir,
            temp_dir: std::env::temp_dir().join("voxpad"),
        }
    }
}

impl Config {
    /// Create a configuration rooted at a specific directory (used by tests)
    pub fn rooted_at(root: &std::path::Path) -> Self {
        Self {
            records_dir: root.join("recordings"),
            temp_dir: root.join("tmp"),
        }
    }
}
