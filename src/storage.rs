//! Storage layer for td
//!
//! A `Store` is exactly one backing file holding the JSON array of todos.
//!
//! # Location
//!
//! ```text
//! --db / TODO_DB_PATH = /home/me/todo.json   -> /home/me/todo.json
//! --db / TODO_DB_PATH = /home/me/sync/       -> /home/me/sync/.todos
//! (unset)                                    -> <cwd>/.todos
//! ```
//!
//! The file is not locked. Two invocations racing through load-mutate-save
//! lose one update (last write wins).

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Conventional name of the backing file
pub const DEFAULT_FILE_NAME: &str = ".todos";

/// Environment variable naming the backing file or its directory
pub const DB_PATH_ENV: &str = "TODO_DB_PATH";

/// Resolved backing file of a todo collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Use `path` as the backing file verbatim
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolve the backing file against the current working directory
    ///
    /// # Errors
    /// * `StoreUnavailable` - If no override is given and the working
    ///   directory cannot be determined
    pub fn resolve(override_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = non_empty(override_path) {
            return Ok(Self::resolve_in(Some(path), Path::new(".")));
        }

        let cwd = std::env::current_dir().map_err(|err| {
            Error::StoreUnavailable(format!("cannot determine working directory: {err}"))
        })?;
        Ok(Self::resolve_in(None, &cwd))
    }

    /// Resolve the backing file with an explicit working directory
    pub fn resolve_in(override_path: Option<&Path>, cwd: &Path) -> Self {
        let store = match non_empty(override_path) {
            Some(path) => Self::from_override(path),
            None => Self::new(cwd.join(DEFAULT_FILE_NAME)),
        };
        tracing::debug!(path = %store.path.display(), "resolved store");
        store
    }

    fn from_override(path: &Path) -> Self {
        let raw = path.to_string_lossy();
        if raw.ends_with('/') || raw.ends_with(MAIN_SEPARATOR) || path.is_dir() {
            Self::new(path.join(DEFAULT_FILE_NAME))
        } else {
            Self::new(path)
        }
    }

    /// Path to the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Fail with `StoreUnavailable` when the backing file is absent
    pub fn check(&self) -> Result<()> {
        if self.exists() {
            Ok(())
        } else {
            Err(Error::StoreUnavailable(format!(
                "The database file \"{}\" doesn't exist",
                self.path.display()
            )))
        }
    }

    /// Create the backing file holding an empty list (`[]`)
    ///
    /// # Errors
    /// * `MissingParentDirectory` - If the containing directory is absent
    /// * `AlreadyInitialized` - If the file already exists
    /// * `Io` - If the file cannot be written or flushed
    pub fn initialize(&self) -> Result<()> {
        if let Some(parent) = self.parent_dir() {
            if !parent.is_dir() {
                return Err(Error::MissingParentDirectory(parent.to_path_buf()));
            }
        }

        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                return Err(Error::AlreadyInitialized(self.path.clone()));
            }
            Err(err) => return Err(Error::Io(err)),
        };

        file.write_all(b"[]")?;
        file.sync_all()?;
        tracing::debug!(path = %self.path.display(), "initialized store");
        Ok(())
    }

    /// Read and deserialize the backing file
    ///
    /// # Errors
    /// * `StoreUnavailable` - If the file does not exist
    /// * `MalformedData` - If the content does not decode
    /// * `Io` - If the file cannot be read
    pub fn read_json<T: DeserializeOwned>(&self) -> Result<T> {
        let content = fs::read_to_string(&self.path).map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                Error::StoreUnavailable(format!(
                    "The database file \"{}\" doesn't exist",
                    self.path.display()
                ))
            } else {
                Error::Io(err)
            }
        })?;

        serde_json::from_str(&content).map_err(|err| Error::MalformedData {
            path: self.path.clone(),
            message: err.to_string(),
        })
    }

    /// Serialize `data` with 2-space indentation and replace the backing file
    pub fn write_json<T: Serialize>(&self, data: &T) -> Result<()> {
        let mut json = serde_json::to_string_pretty(data)?;
        json.push('\n');
        write_atomic(&self.path, json.as_bytes())
    }

    fn parent_dir(&self) -> Option<&Path> {
        self.path.parent().filter(|p| !p.as_os_str().is_empty())
    }
}

fn non_empty(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| !p.as_os_str().is_empty())
}

/// Write data atomically using a temp file in the target directory + rename
///
/// Readers see either the previous content or the new content, never a
/// partial write.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => parent.to_path_buf(),
        None => PathBuf::from("."),
    };

    let mut temp = NamedTempFile::new_in(&dir)?;
    temp.write_all(data)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|err| Error::Io(err.error))?;

    tracing::debug!(path = %path.display(), bytes = data.len(), "wrote store");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn resolve_defaults_to_cwd() {
        let temp = TempDir::new().unwrap();
        let store = Store::resolve_in(None, temp.path());
        assert_eq!(store.path(), temp.path().join(".todos"));
    }

    #[test]
    fn resolve_appends_file_name_to_directory_override() {
        let temp = TempDir::new().unwrap();
        let store = Store::resolve_in(Some(temp.path()), Path::new("/unused"));
        assert_eq!(store.path(), temp.path().join(".todos"));
    }

    #[test]
    fn resolve_appends_file_name_to_trailing_separator() {
        let store = Store::resolve_in(Some(Path::new("/no/such/dir/")), Path::new("/unused"));
        assert_eq!(store.path(), Path::new("/no/such/dir/.todos"));
    }

    #[test]
    fn resolve_keeps_file_override() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("todo.json");
        let store = Store::resolve_in(Some(&file), Path::new("/unused"));
        assert_eq!(store.path(), file);
    }

    #[test]
    fn empty_override_is_ignored() {
        let temp = TempDir::new().unwrap();
        let store = Store::resolve_in(Some(Path::new("")), temp.path());
        assert_eq!(store.path(), temp.path().join(".todos"));
    }

    #[test]
    fn initialize_writes_empty_list() {
        let temp = TempDir::new().unwrap();
        let store = Store::new(temp.path().join(".todos"));

        store.initialize().unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]");
        assert!(store.check().is_ok());
    }

    #[test]
    fn initialize_twice_fails() {
        let temp = TempDir::new().unwrap();
        let store = Store::new(temp.path().join(".todos"));

        store.initialize().unwrap();
        let err = store.initialize().unwrap_err();
        assert!(matches!(err, Error::AlreadyInitialized(_)));
    }

    #[test]
    fn initialize_requires_parent() {
        let temp = TempDir::new().unwrap();
        let store = Store::new(temp.path().join("missing").join(".todos"));

        let err = store.initialize().unwrap_err();
        assert!(matches!(err, Error::MissingParentDirectory(_)));
        assert!(!store.exists());
    }

    #[test]
    fn check_reports_missing_file() {
        let temp = TempDir::new().unwrap();
        let store = Store::new(temp.path().join(".todos"));
        assert!(matches!(store.check(), Err(Error::StoreUnavailable(_))));
    }

    #[test]
    fn read_json_rejects_garbage() {
        let temp = TempDir::new().unwrap();
        let store = Store::new(temp.path().join(".todos"));
        fs::write(store.path(), "not json {").unwrap();

        let result: Result<Vec<crate::todo::Todo>> = store.read_json();
        assert!(matches!(result, Err(Error::MalformedData { .. })));
    }

    #[test]
    fn write_json_replaces_content() {
        let temp = TempDir::new().unwrap();
        let store = Store::new(temp.path().join(".todos"));
        store.initialize().unwrap();

        store.write_json(&vec![1, 2, 3]).unwrap();
        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "[\n  1,\n  2,\n  3\n]\n");

        let leftovers: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }
}
