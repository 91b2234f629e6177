//! Configuration management

use crate::domain::{EntryMode, TimeRange};
use crate::error::{MoodiaryError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

pub const DIARY_DIR: &str = ".moodiary";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub entry_mode: EntryMode,
    #[serde(default)]
    pub default_range: TimeRange,
    pub created: DateTime<Utc>,
}

impl Config {
    /// Create a new config with default values
    pub fn new(entry_mode: EntryMode) -> Self {
        Config {
            entry_mode,
            default_range: TimeRange::default(),
            created: Utc::now(),
        }
    }

    /// Load config from .moodiary/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(DIARY_DIR).join(CONFIG_FILE);

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MoodiaryError::NotDiaryDirectory(path.to_path_buf())
            } else {
                MoodiaryError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| MoodiaryError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .moodiary/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let diary_dir = path.join(DIARY_DIR);
        let config_path = diary_dir.join(CONFIG_FILE);

        if !diary_dir.exists() {
            fs::create_dir(&diary_dir)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Entry mode, with MOODIARY_ENTRY_MODE taking precedence over the file
    pub fn get_entry_mode(&self) -> Result<EntryMode> {
        match std::env::var("MOODIARY_ENTRY_MODE") {
            Ok(value) if !value.trim().is_empty() => {
                EntryMode::from_str(&value).map_err(MoodiaryError::Config)
            }
            _ => Ok(self.entry_mode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_config() {
        let config = Config::new(EntryMode::Multiple);
        assert_eq!(config.entry_mode, EntryMode::Multiple);
        assert_eq!(config.default_range, TimeRange::Month);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp = TempDir::new().unwrap();
        let config = Config::new(EntryMode::Single);

        config.save_to_dir(temp.path()).unwrap();

        assert!(temp.path().join(".moodiary/config.toml").exists());
        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();

        match Config::load_from_dir(temp.path()) {
            Err(MoodiaryError::NotDiaryDirectory(_)) => {}
            other => panic!("Expected NotDiaryDirectory error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_optional_keys_use_defaults() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".moodiary")).unwrap();
        fs::write(
            temp.path().join(".moodiary/config.toml"),
            "created = \"2024-03-10T00:00:00Z\"\n",
        )
        .unwrap();

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.entry_mode, EntryMode::Single);
        assert_eq!(loaded.default_range, TimeRange::Month);
    }

    #[test]
    fn test_malformed_config_is_config_error() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".moodiary")).unwrap();
        fs::write(temp.path().join(".moodiary/config.toml"), "entry_mode = [").unwrap();

        assert!(matches!(
            Config::load_from_dir(temp.path()),
            Err(MoodiaryError::Config(_))
        ));
    }
}
