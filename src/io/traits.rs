//! I/O trait definitions for generation runs.
//!
//! The classifier and renderer are pure; the schema read and the generated
//! file writes go through [`FileSystem`] so the whole run can be driven
//! against an in-memory implementation in tests.
//!
//! # Example
//!
//! ```rust
//! use nativegen::io::{FileSystem, MemoryFileSystem};
//! use std::path::Path;
//!
//! let fs = MemoryFileSystem::new();
//! fs.write(Path::new("out/torch_functions.hpp"), "#pragma once\n").unwrap();
//! assert_eq!(
//!     fs.read_to_string(Path::new("out/torch_functions.hpp")).unwrap(),
//!     "#pragma once\n"
//! );
//! ```

use crate::errors::GenError;
use std::path::Path;

/// File system operations trait.
pub trait FileSystem: Send + Sync {
    /// Read a file's contents as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns `GenError::IoError` if:
    /// - The file doesn't exist
    /// - Permission is denied
    /// - The file isn't valid UTF-8
    fn read_to_string(&self, path: &Path) -> Result<String, GenError>;

    /// Write content to a file, creating it or replacing its contents.
    ///
    /// # Errors
    ///
    /// Returns `GenError::IoError` if:
    /// - Permission is denied
    /// - Parent directory doesn't exist
    /// - Disk is full
    fn write(&self, path: &Path, content: &str) -> Result<(), GenError>;

    /// Create a directory and any missing parents.
    fn create_dir_all(&self, path: &Path) -> Result<(), GenError>;

    /// Check if a path exists (file or directory).
    fn exists(&self, path: &Path) -> bool;
}
