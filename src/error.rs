//! Error types for moodiary

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for moodiary
#[derive(Debug, Error)]
pub enum MoodiaryError {
    #[error("Not a moodiary directory: {0}")]
    NotDiaryDirectory(PathBuf),

    /// Malformed input: bad date, unrecognised mood, bad time
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Backing store read/write or (de)serialization failure
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl MoodiaryError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            MoodiaryError::NotDiaryDirectory(_) => 2,
            MoodiaryError::Validation(_) => 3,
            MoodiaryError::Storage(_) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            MoodiaryError::NotDiaryDirectory(path) => {
                format!(
                    "Not a moodiary directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'moodiary init' in this directory to create a new diary\n\
                    • Navigate to an existing diary directory\n\
                    • Set MOODIARY_ROOT environment variable to your diary path",
                    path.display()
                )
            }
            MoodiaryError::Validation(msg) if msg.contains("mood") => {
                format!(
                    "Invalid input: {}\n\n\
                    Valid moods (or 1-5):\n\
                    • verysad, sad, neutral, happy, veryhappy\n\n\
                    Example:\n\
                    moodiary save today happy \"Nice walk\"",
                    msg
                )
            }
            MoodiaryError::Validation(msg) if msg.contains("date") => {
                format!(
                    "Invalid input: {}\n\n\
                    Valid days:\n\
                    • today, yesterday\n\
                    • N days ago (e.g., 3 days ago)\n\
                    • Specific dates: YYYY-MM-DD (e.g., 2024-03-10)",
                    msg
                )
            }
            MoodiaryError::Storage(msg) => {
                format!(
                    "Storage error: {}\n\n\
                    Suggestions:\n\
                    • Check that .moodiary/ is writable\n\
                    • Inspect .moodiary/mood-diary-entries.json for hand edits\n\
                    • Entries written with several per day need entry_mode = multiple",
                    msg
                )
            }
            MoodiaryError::Config(msg) if msg.contains("entry mode") => {
                format!(
                    "{}\n\n\
                    Valid entry modes: single, multiple\n\
                    Example: moodiary config entry_mode multiple",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }

    pub(crate) fn storage(context: &str, err: impl std::fmt::Display) -> Self {
        MoodiaryError::Storage(format!("{}: {}", context, err))
    }
}

/// Result type using MoodiaryError
pub type Result<T> = std::result::Result<T, MoodiaryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_diary_directory_suggestion() {
        let err = MoodiaryError::NotDiaryDirectory(PathBuf::from("/tmp/test"));
        let msg = err.display_with_suggestions();
        assert!(msg.contains("moodiary init"));
        assert!(msg.contains("MOODIARY_ROOT"));
    }

    #[test]
    fn test_invalid_mood_lists_moods() {
        let err = MoodiaryError::Validation("unrecognised mood: 'meh'".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("veryhappy"));
        assert!(msg.contains("moodiary save"));
    }

    #[test]
    fn test_invalid_date_lists_formats() {
        let err = MoodiaryError::Validation("invalid calendar date: '2024-02-30'".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("YYYY-MM-DD"));
        assert!(msg.contains("days ago"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(MoodiaryError::NotDiaryDirectory(PathBuf::new()).exit_code(), 2);
        assert_eq!(MoodiaryError::Validation(String::new()).exit_code(), 3);
        assert_eq!(MoodiaryError::Storage(String::new()).exit_code(), 4);
        assert_eq!(MoodiaryError::Config(String::new()).exit_code(), 1);
    }

    #[test]
    fn test_other_errors_fallback() {
        let err = MoodiaryError::Config("broken".to_string());
        assert_eq!(err.display_with_suggestions(), "Configuration error: broken");
    }
}
