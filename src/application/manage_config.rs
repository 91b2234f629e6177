//! Config management use case

use crate::application::entry_store::EntryStore;
use crate::domain::{EntryMode, TimeRange};
use crate::error::{MoodiaryError, Result};
use crate::infrastructure::{Config, DiaryRepository, FileSystemRepository};
use std::str::FromStr;

/// Service for managing diary configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "entry_mode" => Ok(config.entry_mode.as_str().to_string()),
            "default_range" => Ok(config.default_range.as_str().to_string()),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(MoodiaryError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: entry_mode, default_range, created",
                key
            ))),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "entry_mode" => {
                let mode = EntryMode::from_str(value).map_err(MoodiaryError::Config)?;
                self.ensure_entries_fit(mode)?;
                config.entry_mode = mode;
            }
            "default_range" => {
                config.default_range = TimeRange::from_str(value).map_err(MoodiaryError::Config)?;
            }
            "created" => {
                return Err(MoodiaryError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(MoodiaryError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: entry_mode, default_range",
                    key
                )));
            }
        }

        self.repository.save_config(&config)
    }

    /// Refuse a mode whose keys would make stored entries collide
    fn ensure_entries_fit(&self, mode: EntryMode) -> Result<()> {
        match EntryStore::open(self.repository.backend(), mode) {
            Ok(_) => Ok(()),
            Err(MoodiaryError::Storage(msg)) => Err(MoodiaryError::Config(format!(
                "Cannot switch entry_mode to {}: {}",
                mode.as_str(),
                msg
            ))),
            Err(e) => Err(e),
        }
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::init::init;
    use crate::domain::EntryDraft;
    use chrono::{NaiveDate, NaiveTime};
    use tempfile::TempDir;

    fn service(temp: &TempDir) -> ConfigService {
        ConfigService::new(init(temp.path(), EntryMode::Single).unwrap())
    }

    #[test]
    fn test_get_defaults() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);
        assert_eq!(service.get("entry_mode").unwrap(), "single");
        assert_eq!(service.get("default_range").unwrap(), "month");
    }

    #[test]
    fn test_set_and_get() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        service.set("entry_mode", "multiple").unwrap();
        service.set("default_range", "week").unwrap();

        assert_eq!(service.get("entry_mode").unwrap(), "multiple");
        assert_eq!(service.get("default_range").unwrap(), "week");
    }

    #[test]
    fn test_created_is_read_only() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);
        assert!(service.set("created", "2020-01-01T00:00:00Z").is_err());
        assert!(service.get("created").is_ok());
    }

    #[test]
    fn test_unknown_key_and_bad_value() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);
        assert!(service.get("theme").is_err());
        assert!(service.set("entry_mode", "several").is_err());
        assert!(service.set("default_range", "decade").is_err());
    }

    #[test]
    fn test_switch_to_single_refused_while_day_has_several_entries() {
        let temp = TempDir::new().unwrap();
        let service = ConfigService::new(init(temp.path(), EntryMode::Multiple).unwrap());
        let backend = service.repository.backend();
        let mut store = EntryStore::open(&backend, EntryMode::Multiple).unwrap();
        store
            .save(EntryDraft::new("2024-03-10", "sad", "morning").at("08:00"))
            .unwrap();
        store
            .save(EntryDraft::new("2024-03-10", "happy", "evening").at("20:00"))
            .unwrap();

        let result = service.set("entry_mode", "single");

        assert!(matches!(result, Err(MoodiaryError::Config(msg)) if msg.contains("entry_mode")));
        assert_eq!(service.get("entry_mode").unwrap(), "multiple");

        let morning = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        assert!(store.delete_at(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(), morning).unwrap());
        service.set("entry_mode", "single").unwrap();
        assert_eq!(service.get("entry_mode").unwrap(), "single");
    }
}
