use std::path::Path;

use anyhow::{Context, Result};

use super::types::Settings;

/// Save settings to a JSON file with pretty formatting.
///
/// Missing parent directories are created.
pub fn save_settings(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create settings folder: {}", parent.display()))?;
    }

    let content = serde_json::to_string_pretty(settings)
        .with_context(|| "failed to serialize settings to JSON")?;

    std::fs::write(path, content)
        .with_context(|| format!("failed to write settings file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoadedSettings;
    use std::path::PathBuf;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            folder: Some(PathBuf::from("/photos/2024")),
            columns: 4,
            ..Settings::default()
        };

        save_settings(&settings, &path).unwrap();
        let loaded = LoadedSettings::load(&path).unwrap();

        assert_eq!(loaded.settings, settings);
    }
}
