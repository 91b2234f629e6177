//! Initialize diary use case

use crate::domain::EntryMode;
use crate::error::Result;
use crate::infrastructure::{Config, DiaryRepository, FileSystemRepository};
use std::fs;
use std::path::Path;
use tracing::info;

/// Initialize a new diary at the specified path.
pub fn init(path: &Path, entry_mode: EntryMode) -> Result<FileSystemRepository> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());
    repo.initialize()?;

    let config = Config::new(entry_mode);
    repo.save_config(&config)?;

    info!(root = %path.display(), entry_mode = entry_mode.as_str(), "initialized diary");
    Ok(repo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_config() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("diary");

        let repo = init(&target, EntryMode::Multiple).unwrap();

        assert!(repo.is_initialized());
        assert_eq!(repo.load_config().unwrap().entry_mode, EntryMode::Multiple);
    }

    #[test]
    fn test_init_twice_fails() {
        let temp = TempDir::new().unwrap();
        init(temp.path(), EntryMode::Single).unwrap();
        assert!(init(temp.path(), EntryMode::Single).is_err());
    }
}
