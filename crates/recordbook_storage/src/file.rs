//! File-based key-value store for persistent storage.

use crate::backend::KeyValueStore;
use crate::error::{StorageError, StorageResult};
use crate::key::validate_key;
use parking_lot::RwLock;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Options for a [`FileKeyValueStore`].
#[derive(Debug, Clone)]
pub struct FileOptions {
    /// Whether to create the data directory if it doesn't exist.
    pub create_if_missing: bool,

    /// Whether to `fsync` every blob before it is renamed into place.
    pub sync_on_write: bool,

    /// File extension appended to each key.
    pub extension: String,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            create_if_missing: true,
            sync_on_write: true,
            extension: "json".to_string(),
        }
    }
}

impl FileOptions {
    /// Creates options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to create the data directory if missing.
    #[must_use]
    pub fn create_if_missing(mut self, value: bool) -> Self {
        self.create_if_missing = value;
        self
    }

    /// Sets whether to sync each write to disk.
    #[must_use]
    pub fn sync_on_write(mut self, value: bool) -> Self {
        self.sync_on_write = value;
        self
    }

    /// Sets the file extension used for blobs.
    #[must_use]
    pub fn extension(mut self, value: impl Into<String>) -> Self {
        self.extension = value.into();
        self
    }
}

/// A key-value store that keeps one file per key in a directory.
///
/// Data survives process restarts. This is the native stand-in for a
/// browser's local storage: small blobs, one writer.
///
/// # Durability
///
/// Each `set` writes the blob to a temporary file in the same directory and
/// renames it over the target, so readers see either the old or the new
/// blob, never a partial one. With `sync_on_write` the temporary file is
/// synced before the rename.
///
/// # Thread Safety
///
/// Calls from one process are serialized by an internal lock. Separate
/// processes writing the same key can overwrite each other.
///
/// # Example
///
/// ```no_run
/// use recordbook_storage::{FileKeyValueStore, KeyValueStore};
/// use std::path::Path;
///
/// let store = FileKeyValueStore::open(Path::new("recordbook-data")).unwrap();
/// store.set("parks", r#"{"nextId":1,"records":[]}"#).unwrap();
/// ```
#[derive(Debug)]
pub struct FileKeyValueStore {
    dir: PathBuf,
    options: FileOptions,
    lock: RwLock<()>,
}

impl FileKeyValueStore {
    /// Opens a store rooted at `dir` with default options.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or is not a
    /// directory.
    pub fn open(dir: &Path) -> StorageResult<Self> {
        Self::open_with_options(dir, FileOptions::default())
    }

    /// Opens a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory is missing and `create_if_missing`
    /// is off, if it cannot be created, or if the path is not a directory.
    pub fn open_with_options(dir: &Path, options: FileOptions) -> StorageResult<Self> {
        if !dir.exists() {
            if !options.create_if_missing {
                return Err(StorageError::Io(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("data directory {} does not exist", dir.display()),
                )));
            }
            fs::create_dir_all(dir)?;
        }
        if !dir.is_dir() {
            return Err(StorageError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a directory", dir.display()),
            )));
        }

        Ok(Self {
            dir: dir.to_path_buf(),
            options,
            lock: RwLock::new(()),
        })
    }

    /// Returns the data directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Returns the options this store was opened with.
    #[must_use]
    pub fn options(&self) -> &FileOptions {
        &self.options
    }

    /// Returns the file that holds the blob for `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid.
    pub fn blob_path(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.file_for(key, &self.options.extension))
    }

    /// Scratch file for writes to `key`. The leading `.` keeps it out of
    /// reach of any valid key.
    fn temp_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!(".{key}.tmp"))
    }

    fn file_for(&self, key: &str, extension: &str) -> PathBuf {
        if extension.is_empty() {
            self.dir.join(key)
        } else {
            self.dir.join(format!("{key}.{extension}"))
        }
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.blob_path(key)?;
        let _guard = self.lock.read();

        match fs::read(&path) {
            Ok(bytes) => {
                debug!(key, bytes = bytes.len(), "read blob");
                String::from_utf8(bytes)
                    .map(Some)
                    .map_err(|_| StorageError::NotUtf8 {
                        key: key.to_string(),
                    })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.blob_path(key)?;
        let tmp = self.temp_path(key);
        let _guard = self.lock.write();

        {
            let mut file = File::create(&tmp)?;
            file.write_all(value.as_bytes())?;
            if self.options.sync_on_write {
                file.sync_all()?;
            }
        }
        fs::rename(&tmp, &path)?;

        debug!(key, bytes = value.len(), "wrote blob");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_open_creates_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("data");

        let store = FileKeyValueStore::open(&path).unwrap();
        assert!(path.is_dir());
        assert_eq!(store.path(), path);
    }

    #[test]
    fn file_open_without_create_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing");

        let result =
            FileKeyValueStore::open_with_options(&path, FileOptions::new().create_if_missing(false));
        assert!(matches!(result, Err(StorageError::Io(_))));
    }

    #[test]
    fn file_open_on_regular_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plain.txt");
        fs::write(&path, b"x").unwrap();

        assert!(FileKeyValueStore::open(&path).is_err());
    }

    #[test]
    fn file_missing_key_is_none() {
        let dir = tempdir().unwrap();
        let store = FileKeyValueStore::open(dir.path()).unwrap();
        assert_eq!(store.get("parks").unwrap(), None);
    }

    #[test]
    fn file_set_and_get() {
        let dir = tempdir().unwrap();
        let store = FileKeyValueStore::open(dir.path()).unwrap();

        store.set("parks", r#"{"nextId":1,"records":[]}"#).unwrap();
        assert_eq!(
            store.get("parks").unwrap().as_deref(),
            Some(r#"{"nextId":1,"records":[]}"#)
        );
        assert!(dir.path().join("parks.json").exists());
        assert!(!dir.path().join("parks.tmp").exists());
    }

    #[test]
    fn file_persistence() {
        let dir = tempdir().unwrap();

        {
            let store = FileKeyValueStore::open(dir.path()).unwrap();
            store.set("schools", "persistent data").unwrap();
        }

        {
            let store = FileKeyValueStore::open(dir.path()).unwrap();
            assert_eq!(
                store.get("schools").unwrap().as_deref(),
                Some("persistent data")
            );
        }
    }

    #[test]
    fn file_overwrite_shrinks_blob() {
        let dir = tempdir().unwrap();
        let store =
            FileKeyValueStore::open_with_options(dir.path(), FileOptions::new().sync_on_write(false))
                .unwrap();

        store.set("todos", "a much longer first value").unwrap();
        store.set("todos", "short").unwrap();
        assert_eq!(store.get("todos").unwrap().as_deref(), Some("short"));
    }

    #[test]
    fn file_custom_extension() {
        let dir = tempdir().unwrap();
        let store =
            FileKeyValueStore::open_with_options(dir.path(), FileOptions::new().extension(""))
                .unwrap();

        store.set("parks", "1").unwrap();
        assert!(dir.path().join("parks").exists());
    }

    #[test]
    fn file_rejects_invalid_key() {
        let dir = tempdir().unwrap();
        let store = FileKeyValueStore::open(dir.path()).unwrap();

        assert!(matches!(
            store.set("../escape", "x"),
            Err(StorageError::InvalidKey { .. })
        ));
        assert!(matches!(
            store.get("a/b"),
            Err(StorageError::InvalidKey { .. })
        ));
    }

    #[test]
    fn file_non_utf8_blob_is_reported() {
        let dir = tempdir().unwrap();
        let store = FileKeyValueStore::open(dir.path()).unwrap();
        fs::write(dir.path().join("parks.json"), [0xff, 0xfe, 0x00]).unwrap();

        assert!(matches!(
            store.get("parks"),
            Err(StorageError::NotUtf8 { .. })
        ));
    }

    #[test]
    fn file_temp_files_never_collide_with_keys() {
        for extension in ["", "tmp"] {
            let dir = tempdir().unwrap();
            let store = FileKeyValueStore::open_with_options(
                dir.path(),
                FileOptions::default().extension(extension),
            )
            .unwrap();

            store.set("parks", "parks blob").unwrap();
            store.set("parks.tmp", "other blob").unwrap();
            store.set("parks", "parks blob v2").unwrap();

            assert_eq!(store.get("parks").unwrap().as_deref(), Some("parks blob v2"));
            assert_eq!(store.get("parks.tmp").unwrap().as_deref(), Some("other blob"));
            assert!(!dir.path().join(".parks.tmp").exists());
        }
    }
}
