use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::photo::{INIT_FRAME_SIZE, MAX_FRAME_SIZE, MIN_FRAME_SIZE};

/// Photofine settings file structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Settings file version (currently 1)
    pub version: u32,
    /// Last opened photo folder
    pub folder: Option<PathBuf>,
    /// Number of photo columns shown when a folder is opened
    pub columns: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: 1,
            folder: None,
            columns: INIT_FRAME_SIZE,
        }
    }
}

impl Settings {
    /// Column count limited to what the photo frame supports
    pub fn clamped_columns(&self) -> usize {
        self.columns.clamp(MIN_FRAME_SIZE, MAX_FRAME_SIZE)
    }

    /// Last folder, if it still exists on disk
    pub fn existing_folder(&self) -> Option<&PathBuf> {
        self.folder.as_ref().filter(|f| f.is_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"columns": 5}"#).unwrap();
        assert_eq!(settings.version, 1);
        assert_eq!(settings.columns, 5);
        assert!(settings.folder.is_none());
    }

    #[test]
    fn test_clamped_columns() {
        let mut settings = Settings::default();
        assert_eq!(settings.clamped_columns(), INIT_FRAME_SIZE);
        settings.columns = 0;
        assert_eq!(settings.clamped_columns(), MIN_FRAME_SIZE);
        settings.columns = 42;
        assert_eq!(settings.clamped_columns(), MAX_FRAME_SIZE);
    }

    #[test]
    fn test_existing_folder() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings {
            folder: Some(dir.path().to_path_buf()),
            ..Settings::default()
        };
        assert!(settings.existing_folder().is_some());

        settings.folder = Some(dir.path().join("gone"));
        assert!(settings.existing_folder().is_none());
    }
}
