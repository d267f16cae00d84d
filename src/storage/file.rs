//! File storage

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::debug;

use super::{CartStorage, StorageError};

/// Slot storage backed by one JSON file per key in a directory.
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the slot, so a reader never sees a half-written value.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the slot files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] for keys that are empty, start with a
    /// dot, or contain anything other than ASCII alphanumerics, `-` and `_`.
    pub fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');

        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn io_error(key: &str) -> impl FnOnce(io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        key: key.to_string(),
        source,
    }
}

impl CartStorage for FileStorage {
    #[tracing::instrument(name = "cart.storage.file.read", skip(self), err)]
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key)?;

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "storage slot not found");

                Ok(None)
            }
            Err(err) => Err(io_error(key)(err)),
        }
    }

    #[tracing::instrument(
        name = "cart.storage.file.write",
        skip(self, value),
        fields(bytes = value.len()),
        err
    )]
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;

        fs::create_dir_all(&self.dir).map_err(io_error(key))?;

        let mut file = NamedTempFile::new_in(&self.dir).map_err(io_error(key))?;

        file.write_all(value.as_bytes()).map_err(io_error(key))?;
        file.as_file().sync_all().map_err(io_error(key))?;
        file.persist(&path)
            .map_err(|err| io_error(key)(err.error))?;

        debug!(path = %path.display(), "storage slot written");

        Ok(())
    }

    #[tracing::instrument(name = "cart.storage.file.remove", skip(self), err)]
    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(key)(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn missing_slot_reads_none() -> TestResult {
        let dir = TempDir::new()?;
        let storage = FileStorage::new(dir.path().join("nested"));

        assert_eq!(storage.read("catalyst_cart")?, None);

        Ok(())
    }

    #[test]
    fn write_creates_directory_and_round_trips() -> TestResult {
        let dir = TempDir::new()?;
        let storage = FileStorage::new(dir.path().join("nested"));

        storage.write("catalyst_cart", r#"{"version":1,"items":[]}"#)?;
        storage.write("catalyst_cart", r#"{"version":1,"items":[1]}"#)?;

        assert_eq!(
            storage.read("catalyst_cart")?.as_deref(),
            Some(r#"{"version":1,"items":[1]}"#)
        );
        assert!(dir.path().join("nested/catalyst_cart.json").is_file());

        Ok(())
    }

    #[test]
    fn remove_deletes_slot_and_tolerates_absence() -> TestResult {
        let dir = TempDir::new()?;
        let storage = FileStorage::new(dir.path());

        storage.write("cart", "[]")?;
        storage.remove("cart")?;
        storage.remove("cart")?;

        assert_eq!(storage.read("cart")?, None);

        Ok(())
    }

    #[test]
    fn rejects_keys_that_escape_the_directory() {
        let storage = FileStorage::new("/tmp/unused");

        for key in ["", ".hidden", "../cart", "a/b", "cart.json"] {
            assert!(
                matches!(storage.slot_path(key), Err(StorageError::InvalidKey(_))),
                "{key:?} should be rejected"
            );
        }
    }

    #[test]
    fn unreadable_slot_reports_io_error() -> TestResult {
        let dir = TempDir::new()?;
        let storage = FileStorage::new(dir.path());

        fs::create_dir(dir.path().join("cart.json"))?;

        assert!(matches!(
            storage.read("cart"),
            Err(StorageError::Io { .. })
        ));

        Ok(())
    }
}
