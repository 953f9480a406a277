use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Per-user application settings.
///
/// Deliberately small: view mode and overlay choices are session state
/// and are not stored here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Schedule file reopened on launch.
    pub last_schedule: Option<PathBuf>,
}

impl Settings {
    /// Platform config directory for siteline, if one can be determined.
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "siteline").map(|dirs| dirs.config_dir().to_path_buf())
    }

    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.json"))
    }

    /// Load settings, falling back to defaults on any failure. A missing
    /// or unreadable file is a first-run condition, not an error.
    pub fn load() -> Settings {
        let Some(path) = Self::settings_path() else {
            return Settings::default();
        };
        Self::load_from(&path)
    }

    fn load_from(path: &Path) -> Settings {
        match std::fs::read_to_string(path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                debug!(path = %path.display(), error = %e, "settings file unreadable, using defaults");
                Settings::default()
            }),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no settings file, using defaults");
                Settings::default()
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::settings_path().context("no config directory on this platform")?;
        self.save_to(&path)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = Settings {
            last_schedule: Some(PathBuf::from("/jobs/tower-a.siteline.json")),
        };
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.last_schedule, settings.last_schedule);
    }

    #[test]
    fn corrupt_settings_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "][").unwrap();
        let loaded = Settings::load_from(&path);
        assert!(loaded.last_schedule.is_none());
    }
}
