//! Filesystem storage implementation.

use std::path::Path;

use async_trait::async_trait;

use crate::storage::{Storage, StorageError};

const BACKEND: &str = "Fs";

/// Local filesystem implementation of [`Storage`].
///
/// Stateless: paths are used as given, absolute or relative to the process
/// working directory. Writes go through tokio so concurrent page writes do
/// not block the runtime.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsStorage;

impl FsStorage {
    /// Create a new filesystem storage.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Storage for FsStorage {
    fn read_to_string(&self, path: &Path) -> Result<String, StorageError> {
        std::fs::read_to_string(path)
            .map_err(|err| StorageError::io(err, Some(path.to_path_buf())).with_backend(BACKEND))
    }

    async fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), StorageError> {
        tokio::fs::write(path, contents)
            .await
            .map_err(|err| StorageError::io(err, Some(path.to_path_buf())).with_backend(BACKEND))
    }

    async fn create_dir_all(&self, path: &Path) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(path)
            .await
            .map_err(|err| StorageError::io(err, Some(path.to_path_buf())).with_backend(BACKEND))
    }
}
