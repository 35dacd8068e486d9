use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::types::Settings;

const SETTINGS_FILE: &str = "settings.json";

/// Default location of the settings file in the user config directory.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(env!("CARGO_PKG_NAME")).join(SETTINGS_FILE))
}

/// Settings together with the file they were loaded from.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    /// The parsed settings
    pub settings: Settings,
    /// Where the settings live, used when saving them back
    pub path: Option<PathBuf>,
}

impl LoadedSettings {
    /// Load settings from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file: {}", path.display()))?;

        let settings: Settings = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse settings file: {}", path.display()))?;

        Ok(Self {
            settings,
            path: Some(path.to_path_buf()),
        })
    }

    /// Load settings from `path`, or from the default location.
    ///
    /// A missing file yields default settings. An explicitly given file
    /// must exist and parse.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let Some(path) = default_settings_path() else {
            return Ok(Self {
                settings: Settings::default(),
                path: None,
            });
        };

        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self {
                settings: Settings::default(),
                path: Some(path),
            })
        }
    }
}
