//! Implementations of [`FileSystem`].
//!
//! [`RealFileSystem`] delegates to `std::fs`. [`MemoryFileSystem`] keeps files
//! in a map and is what the tests run generation against.

use crate::errors::GenError;
use crate::io::traits::FileSystem;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Production file system implementation.
#[derive(Debug, Default, Clone)]
pub struct RealFileSystem;

impl RealFileSystem {
    /// Create a new real file system instance.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, GenError> {
        fs::read_to_string(path)
            .map_err(|e| GenError::io_with_path(format!("Failed to read file: {}", e), path))
    }

    fn write(&self, path: &Path, content: &str) -> Result<(), GenError> {
        fs::write(path, content)
            .map_err(|e| GenError::io_with_path(format!("Failed to write file: {}", e), path))
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), GenError> {
        fs::create_dir_all(path).map_err(|e| {
            GenError::io_with_path(format!("Failed to create directory: {}", e), path)
        })
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// In-memory file system. Directories are implicit.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: RwLock<BTreeMap<PathBuf, String>>,
}

impl MemoryFileSystem {
    /// Create a new empty in-memory file system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a file system pre-populated with one file.
    pub fn with_file(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let fs = Self::new();
        if let Ok(mut files) = fs.files.write() {
            files.insert(path.into(), content.into());
        }
        fs
    }

    /// Paths of every stored file, in sorted order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files
            .read()
            .map(|files| files.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, GenError> {
        self.files
            .read()
            .map_err(|e| GenError::io(format!("File map read lock failed: {}", e)))?
            .get(path)
            .cloned()
            .ok_or_else(|| GenError::io_with_path("Failed to read file: not found", path))
    }

    fn write(&self, path: &Path, content: &str) -> Result<(), GenError> {
        self.files
            .write()
            .map_err(|e| GenError::io(format!("File map write lock failed: {}", e)))?
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn create_dir_all(&self, _path: &Path) -> Result<(), GenError> {
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files
            .read()
            .map(|files| files.contains_key(path))
            .unwrap_or(false)
    }
}
