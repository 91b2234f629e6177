use super::backend::StorageBackend;
use crate::error::{MoodiaryError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Filesystem backend: each key is a `<key>.json` file inside one directory.
#[derive(Debug, Clone)]
pub struct FsBackend {
    dir: PathBuf,
}

impl FsBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FsBackend { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StorageBackend for FsBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(MoodiaryError::storage(
                &format!("failed to read {}", path.display()),
                e,
            )),
        }
    }

    /// Write to a temp file in the same directory, then rename into place.
    fn write(&self, key: &str, contents: &str) -> Result<()> {
        let path = self.path_for(key);
        let fail = |e: std::io::Error| {
            MoodiaryError::storage(&format!("failed to write {}", path.display()), e)
        };

        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(fail)?;
        }

        let tmp_path = self
            .dir
            .join(format!("{}.json.moodiary-tmp-{}", key, std::process::id()));

        fs::write(&tmp_path, contents).map_err(fail)?;

        if let Err(e) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(fail(e));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_none() {
        let temp = TempDir::new().unwrap();
        let backend = FsBackend::new(temp.path());
        assert_eq!(backend.read("mood-diary-entries").unwrap(), None);
    }

    #[test]
    fn test_write_creates_directory_and_file() {
        let temp = TempDir::new().unwrap();
        let backend = FsBackend::new(temp.path().join("nested"));

        backend.write("slot", "[1]").unwrap();

        let path = temp.path().join("nested/slot.json");
        assert_eq!(fs::read_to_string(path).unwrap(), "[1]");
        assert_eq!(backend.read("slot").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_overwrite_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let backend = FsBackend::new(temp.path());

        backend.write("slot", "first").unwrap();
        backend.write("slot", "second").unwrap();

        assert_eq!(backend.read("slot").unwrap().as_deref(), Some("second"));
        let names: Vec<String> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["slot.json".to_string()]);
    }

    #[test]
    fn test_unreadable_slot_is_storage_error() {
        let temp = TempDir::new().unwrap();
        let backend = FsBackend::new(temp.path());
        // A directory where the file should be
        fs::create_dir(backend.path_for("slot")).unwrap();

        assert!(matches!(
            backend.read("slot"),
            Err(MoodiaryError::Storage(_))
        ));
    }

    #[test]
    fn test_failed_rename_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let backend = FsBackend::new(temp.path());
        let blocked = backend.path_for("mood-diary-entries");
        fs::create_dir(&blocked).unwrap();
        fs::write(blocked.join("occupied"), "x").unwrap();

        let result = backend.write("mood-diary-entries", "[]");

        assert!(matches!(result, Err(MoodiaryError::Storage(_))));
        let leftovers: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.contains("moodiary-tmp"))
            .collect();
        assert!(leftovers.is_empty(), "left behind: {:?}", leftovers);
    }
}
