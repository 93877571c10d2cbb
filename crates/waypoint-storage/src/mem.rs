//! In-memory storage implementation for testing.
//!
//! Provides [`MemStorage`] for unit testing the writer pipeline without
//! filesystem access. It enforces the same contract as [`FsStorage`]:
//! writes require an existing parent directory, and directories cannot be
//! created over files.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::storage::{Storage, StorageError, StorageErrorKind};

const BACKEND: &str = "Mem";

/// Insert `path` and every ancestor into the directory set.
fn insert_dir_chain(dirs: &mut HashSet<PathBuf>, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        dirs.insert(current.clone());
    }
}

/// In-memory storage for testing.
///
/// Stores files and directories in memory and records every successful
/// `write_file` in order, so tests can assert on write sequencing as well
/// as final contents. Use the builder methods to seed test state.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use waypoint_storage::{MemStorage, Storage};
///
/// let storage = MemStorage::new().with_dir("out");
/// storage.write_file(Path::new("out/index.html"), b"<html>").await?;
/// assert_eq!(storage.write_log(), vec![PathBuf::from("out/index.html")]);
/// ```
#[derive(Debug, Default)]
pub struct MemStorage {
    files: RwLock<HashMap<PathBuf, Vec<u8>>>,
    dirs: RwLock<HashSet<PathBuf>>,
    write_log: RwLock<Vec<PathBuf>>,
}

impl MemStorage {
    /// Create a new empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a directory (and its ancestors) as existing.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        insert_dir_chain(&mut self.dirs.write().unwrap(), &path.into());
        self
    }

    /// Seed a file without recording it in the write log.
    ///
    /// Parent directories are not created; add them with
    /// [`with_dir`](Self::with_dir) if the test needs them.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.files
            .write()
            .unwrap()
            .insert(path.into(), contents.into());
        self
    }

    /// True if a file exists at `path`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn file_exists(&self, path: impl AsRef<Path>) -> bool {
        self.files.read().unwrap().contains_key(path.as_ref())
    }

    /// True if a directory exists at `path`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn dir_exists(&self, path: impl AsRef<Path>) -> bool {
        self.dirs.read().unwrap().contains(path.as_ref())
    }

    /// Contents of the file at `path`, if present.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.files.read().unwrap().get(path.as_ref()).cloned()
    }

    /// Contents of the file at `path` as UTF-8, if present and valid.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn contents_utf8(&self, path: impl AsRef<Path>) -> Option<String> {
        self.contents(path)
            .and_then(|bytes| String::from_utf8(bytes).ok())
    }

    /// Paths of every successful write, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn write_log(&self) -> Vec<PathBuf> {
        self.write_log.read().unwrap().clone()
    }

    fn parent_exists(&self, path: &Path) -> bool {
        match path.parent() {
            // Relative single-segment paths live in the implicit root.
            None => true,
            Some(parent) if parent.as_os_str().is_empty() => true,
            Some(parent) => self.dirs.read().unwrap().contains(parent),
        }
    }
}

#[async_trait]
impl Storage for MemStorage {
    fn read_to_string(&self, path: &Path) -> Result<String, StorageError> {
        let files = self.files.read().unwrap();
        let bytes = files
            .get(path)
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))?;
        String::from_utf8(bytes.clone()).map_err(|err| {
            StorageError::new(StorageErrorKind::Other)
                .with_path(path)
                .with_backend(BACKEND)
                .with_source(err)
        })
    }

    async fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), StorageError> {
        if !self.parent_exists(path) {
            return Err(StorageError::not_found(path).with_backend(BACKEND));
        }
        if self.dirs.read().unwrap().contains(path) {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }

        self.files
            .write()
            .unwrap()
            .insert(path.to_path_buf(), contents.to_vec());
        self.write_log.write().unwrap().push(path.to_path_buf());
        Ok(())
    }

    async fn create_dir_all(&self, path: &Path) -> Result<(), StorageError> {
        let files = self.files.read().unwrap();
        let mut dirs = self.dirs.write().unwrap();

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if files.contains_key(&current) {
                // Same kinds as the real filesystem: a file at the target
                // itself is AlreadyExists, a file in the middle of the
                // chain is NotADirectory, which maps to Other.
                let kind = if current.as_path() == path {
                    StorageErrorKind::AlreadyExists
                } else {
                    StorageErrorKind::Other
                };
                return Err(StorageError::new(kind)
                    .with_path(current)
                    .with_backend(BACKEND));
            }
            dirs.insert(current.clone());
        }
        Ok(())
    }
}
