//! Persistent player preferences
//!
//! A tiny key-value record that survives between runs: the high score, the
//! sound toggle and the last chosen level. [`JsonFileStore`] keeps it as
//! pretty-printed JSON under the platform data directory; [`MemoryStore`]
//! keeps it in memory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::game::Level;

/// Application directory name under the platform data directory
pub const APP_DIR: &str = "term_snake";

/// File name of the preferences record
pub const PREFERENCES_FILE: &str = "preferences.json";

/// Everything that is remembered between runs
///
/// Every field has a serde default, so a file written by an older version
/// with fewer fields still loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub high_score: u32,
    #[serde(default = "default_sound_enabled")]
    pub sound_enabled: bool,
    #[serde(default)]
    pub level: Level,
}

fn default_sound_enabled() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            high_score: 0,
            sound_enabled: default_sound_enabled(),
            level: Level::default(),
        }
    }
}

impl Preferences {
    /// Raise the high score if `score` beats it; returns true on a new record
    pub fn record_score(&mut self, score: u32) -> bool {
        if score > self.high_score {
            self.high_score = score;
            true
        } else {
            false
        }
    }
}

/// Where preferences live between runs
pub trait PreferenceStore {
    /// Read the stored preferences, falling back to defaults
    fn load(&self) -> Preferences;

    fn save(&mut self, prefs: &Preferences) -> Result<()>;
}

/// Default data directory, e.g. `~/.local/share/term_snake` on Linux
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR))
}

/// Preferences stored as a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<dir>/preferences.json`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(PREFERENCES_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for JsonFileStore {
    fn load(&self) -> Preferences {
        if !self.path.exists() {
            info!(path = ?self.path, "No preferences file, using defaults");
            return Preferences::default();
        }

        match std::fs::read_to_string(&self.path) {
            Ok(contents) => match serde_json::from_str::<Preferences>(&contents) {
                Ok(prefs) => {
                    info!(path = ?self.path, high_score = prefs.high_score, "Loaded preferences");
                    prefs
                }
                Err(e) => {
                    error!(path = ?self.path, error = %e, "Corrupt preferences file, using defaults");
                    Preferences::default()
                }
            },
            Err(e) => {
                error!(path = ?self.path, error = %e, "Failed to read preferences, using defaults");
                Preferences::default()
            }
        }
    }

    fn save(&mut self, prefs: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let json =
            serde_json::to_string_pretty(prefs).context("Failed to serialize preferences")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write preferences to {:?}", self.path))?;

        info!(path = ?self.path, "Saved preferences");
        Ok(())
    }
}

/// In-memory store; nothing outlives the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    saved: Option<Preferences>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that starts out holding `prefs`
    pub fn with(prefs: Preferences) -> Self {
        Self {
            saved: Some(prefs),
            saves: 0,
        }
    }

    /// Number of `save` calls so far
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Preferences {
        self.saved.clone().unwrap_or_default()
    }

    fn save(&mut self, prefs: &Preferences) -> Result<()> {
        self.saved = Some(prefs.clone());
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let prefs = Preferences::default();
        assert_eq!(prefs.high_score, 0);
        assert!(prefs.sound_enabled);
        assert_eq!(prefs.level, Level::Easy);
    }

    #[test]
    fn test_record_score() {
        let mut prefs = Preferences::default();
        assert!(prefs.record_score(30));
        assert!(!prefs.record_score(30));
        assert!(!prefs.record_score(10));
        assert!(prefs.record_score(40));
        assert_eq!(prefs.high_score, 40);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        assert_eq!(store.load(), Preferences::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::in_dir(&dir.path().join("nested"));
        let prefs = Preferences {
            high_score: 120,
            sound_enabled: false,
            level: Level::Hard,
        };

        store.save(&prefs).unwrap();

        assert!(store.path().exists());
        assert_eq!(JsonFileStore::in_dir(&dir.path().join("nested")).load(), prefs);
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        std::fs::write(store.path(), "{ not json").unwrap();

        assert_eq!(store.load(), Preferences::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        std::fs::write(store.path(), r#"{ "high_score": 70 }"#).unwrap();

        let prefs = store.load();
        assert_eq!(prefs.high_score, 70);
        assert!(prefs.sound_enabled);
        assert_eq!(prefs.level, Level::Easy);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load(), Preferences::default());

        let prefs = Preferences {
            high_score: 5,
            ..Default::default()
        };
        store.save(&prefs).unwrap();
        assert_eq!(store.load(), prefs);
        assert_eq!(store.saves(), 1);
    }
}
