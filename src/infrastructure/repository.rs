//! File system repository

use crate::error::{MoodiaryError, Result};
use crate::infrastructure::config::DIARY_DIR;
use crate::infrastructure::{Config, FsBackend};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Abstract repository for diary-level operations
pub trait DiaryRepository {
    /// Get the root directory of this diary
    fn root(&self) -> &Path;

    /// Load configuration from .moodiary/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .moodiary/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .moodiary directory exists
    fn is_initialized(&self) -> bool;

    /// Create .moodiary directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of DiaryRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover the diary root.
    /// MOODIARY_ROOT wins when set; otherwise walk up from the current directory.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("MOODIARY_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_diary_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            }
            return Err(MoodiaryError::Config(format!(
                "MOODIARY_ROOT is set to '{}' but no .moodiary directory found. \
                Run 'moodiary init' in that directory or unset MOODIARY_ROOT.",
                path.display()
            )));
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover the diary root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_diary_dir(&current) {
                debug!(root = %current.display(), "found diary");
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(MoodiaryError::NotDiaryDirectory(start.to_path_buf())),
            }
        }
    }

    fn has_diary_dir(path: &Path) -> bool {
        path.join(DIARY_DIR).is_dir()
    }

    /// Storage backend rooted at .moodiary/
    pub fn backend(&self) -> FsBackend {
        FsBackend::new(self.root.join(DIARY_DIR))
    }
}

impl DiaryRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_diary_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let diary_dir = self.root.join(DIARY_DIR);

        if diary_dir.exists() {
            return Err(MoodiaryError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&diary_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_creates_diary_dir() {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());

        assert!(!repo.is_initialized());
        repo.initialize().unwrap();
        assert!(repo.is_initialized());
    }

    #[test]
    fn test_initialize_twice_fails() {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());

        repo.initialize().unwrap();
        assert!(matches!(repo.initialize(), Err(MoodiaryError::Config(_))));
    }

    #[test]
    fn test_discover_from_subdirectory() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".moodiary")).unwrap();
        let nested = temp.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();

        let repo = FileSystemRepository::discover_from(&nested).unwrap();
        assert_eq!(repo.root, temp.path());
    }

    #[test]
    fn test_discover_without_diary_fails() {
        let temp = TempDir::new().unwrap();

        match FileSystemRepository::discover_from(temp.path()) {
            Err(MoodiaryError::NotDiaryDirectory(path)) => assert_eq!(path, temp.path()),
            other => panic!("Expected NotDiaryDirectory, got {:?}", other),
        }
    }

    #[test]
    fn test_backend_lives_in_diary_dir() {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());

        let backend = repo.backend();
        assert_eq!(
            backend.path_for("mood-diary-entries"),
            temp.path().join(".moodiary/mood-diary-entries.json")
        );
    }
}
