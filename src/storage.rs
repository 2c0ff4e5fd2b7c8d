//! Durable key-value storage for user preferences
//!
//! `FileStorage` keeps a flat JSON object on disk and rewrites it atomically
//! on every `set`. `MemoryStorage` is the in-process equivalent.

use crate::error::{ExplorerError, Result};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fmt;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

const BACKUP_SUFFIX: &str = ".backup";

/// String values under string keys
pub trait KeyValueStorage: Send + Sync + fmt::Debug {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open the storage file at `path`, starting empty if it does not exist
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|e| {
                ExplorerError::StorageError(format!("Failed to read {}: {}", path.display(), e))
            })?;
            serde_json::from_str(&contents).map_err(|e| {
                ExplorerError::StorageError(format!("Failed to parse {}: {}", path.display(), e))
            })?
        } else {
            BTreeMap::new()
        };

        debug!(path = %path.display(), keys = entries.len(), "storage.open");

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file holding the contents from before the latest write
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(BACKUP_SUFFIX);
        self.path.with_file_name(name)
    }

    /// Stage `entries` in a temp file beside the storage file, then swap it
    /// into place. The file being replaced is copied to `backup_path` first.
    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(storage_error("create storage dir", dir))?;

        if self.path.exists() {
            let backup = self.backup_path();
            fs::copy(&self.path, &backup).map_err(storage_error("back up", &backup))?;
        }

        let mut staged =
            NamedTempFile::new_in(dir).map_err(storage_error("stage write in", dir))?;
        serde_json::to_writer_pretty(&mut staged, entries)
            .map_err(storage_error("serialize", &self.path))?;
        staged
            .as_file()
            .sync_all()
            .map_err(storage_error("sync", staged.path()))?;
        staged
            .persist(&self.path)
            .map_err(|e| storage_error("replace", &self.path)(e.error))?;

        debug!(path = %self.path.display(), keys = entries.len(), "storage.persist");
        Ok(())
    }
}

fn storage_error<E: fmt::Display>(
    action: &'static str,
    path: &Path,
) -> impl FnOnce(E) -> ExplorerError {
    let path = path.display().to_string();
    move |e| ExplorerError::StorageError(format!("Failed to {} {}: {}", action, path, e))
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write();
        let previous = entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist(&entries) {
            // keep memory and disk in agreement
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }
}

/// Default storage location under the user's home directory
pub fn default_storage_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".ledger-explorer")
        .join("storage.json")
}

/// Expand a leading `~/` against the home directory
pub fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(rest),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("theme").unwrap(), None);
        storage.set("theme", "dark").unwrap();
        assert_eq!(storage.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_file_storage_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::open(temp_dir.path().join("storage.json")).unwrap();
        assert_eq!(storage.get("theme").unwrap(), None);
    }

    #[test]
    fn test_file_storage_persists_across_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("storage.json");

        let storage = FileStorage::open(&path).unwrap();
        storage.set("theme", "dark").unwrap();
        assert!(path.exists());

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_file_storage_keeps_backup() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");

        let storage = FileStorage::open(&path).unwrap();
        storage.set("theme", "dark").unwrap();
        storage.set("theme", "light").unwrap();

        let backup = temp_dir.path().join("storage.json.backup");
        assert_eq!(storage.backup_path(), backup);
        let backup_contents = fs::read_to_string(backup).unwrap();
        assert!(backup_contents.contains("dark"));
    }

    #[test]
    fn test_backup_keeps_custom_file_name() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.dat");

        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.path(), path.as_path());
        storage.set("theme", "dark").unwrap();
        storage.set("theme", "light").unwrap();

        assert!(temp_dir.path().join("prefs.dat.backup").exists());
        assert!(!temp_dir.path().join("prefs.json.backup").exists());
    }

    #[test]
    fn test_writes_leave_no_staging_files() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");

        let storage = FileStorage::open(&path).unwrap();
        storage.set("theme", "dark").unwrap();
        storage.set("theme", "light").unwrap();

        let mut names: Vec<String> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["storage.json", "storage.json.backup"]);
    }

    #[test]
    fn test_failed_write_keeps_previous_value() {
        let temp_dir = TempDir::new().unwrap();
        // a directory sits where the storage file should be
        let path = temp_dir.path().join("occupied");
        fs::create_dir(&path).unwrap();
        let storage = FileStorage {
            path: path.clone(),
            entries: RwLock::new(BTreeMap::new()),
        };

        let result = storage.set("theme", "dark");
        assert!(matches!(result, Err(ExplorerError::StorageError(_))));
        assert_eq!(storage.get("theme").unwrap(), None);
    }

    #[test]
    fn test_file_storage_rejects_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();

        let result = FileStorage::open(&path);
        assert!(matches!(result, Err(ExplorerError::StorageError(_))));
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/tmp/x.json"), PathBuf::from("/tmp/x.json"));
        assert!(expand_home("~/x.json").ends_with("x.json"));
    }
}
