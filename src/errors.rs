//! Error types for generation runs.
//!
//! A run either completes and rewrites every output file, or fails with a
//! [`GenError`]. Entries with unsupported argument types are never errors:
//! the classifier defers them and they simply produce no output.
//!
//! # Example
//!
//! ```rust
//! use nativegen::errors::GenError;
//!
//! let err = GenError::schema_at_record("missing ') ->' return marker", 12);
//! assert_eq!(err.category(), "Schema");
//! assert!(err.to_string().contains("record 12"));
//! ```

use std::fmt;
use std::path::PathBuf;

/// Categorized failure of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    /// File system I/O errors (read, write, permissions)
    IoError {
        message: String,
        path: Option<PathBuf>,
    },
    /// The schema file is malformed or one of its records cannot be decoded
    SchemaError {
        message: String,
        path: Option<PathBuf>,
        record: Option<usize>,
    },
    /// Configuration file errors
    ConfigError {
        message: String,
        path: Option<PathBuf>,
    },
    /// Check mode found output files that differ from a fresh generation
    StaleOutput { paths: Vec<PathBuf> },
}

impl GenError {
    /// Create an I/O error with a message.
    pub fn io(message: impl Into<String>) -> Self {
        Self::IoError {
            message: message.into(),
            path: None,
        }
    }

    /// Create an I/O error with a message and path context.
    pub fn io_with_path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::IoError {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Create a schema error with a message.
    pub fn schema(message: impl Into<String>) -> Self {
        Self::SchemaError {
            message: message.into(),
            path: None,
            record: None,
        }
    }

    /// Create a schema error pointing at a record (zero-based) of the schema.
    pub fn schema_at_record(message: impl Into<String>, record: usize) -> Self {
        Self::SchemaError {
            message: message.into(),
            path: None,
            record: Some(record),
        }
    }

    /// Attach the schema file path to a schema error. Other variants are returned unchanged.
    pub fn in_schema_file(self, schema_path: impl Into<PathBuf>) -> Self {
        match self {
            Self::SchemaError {
                message, record, ..
            } => Self::SchemaError {
                message,
                path: Some(schema_path.into()),
                record,
            },
            other => other,
        }
    }

    /// Create a configuration error with path context.
    pub fn config_with_path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::ConfigError {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Create a stale-output error listing the files that would change.
    pub fn stale(paths: Vec<PathBuf>) -> Self {
        Self::StaleOutput { paths }
    }

    /// Get the error message without context details.
    pub fn message(&self) -> String {
        match self {
            Self::IoError { message, .. }
            | Self::SchemaError { message, .. }
            | Self::ConfigError { message, .. } => message.clone(),
            Self::StaleOutput { paths } => format!("{} generated file(s) out of date", paths.len()),
        }
    }

    /// Get the associated path, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::IoError { path, .. }
            | Self::SchemaError { path, .. }
            | Self::ConfigError { path, .. } => path.as_ref(),
            Self::StaleOutput { paths } => paths.first(),
        }
    }

    /// Get the error category name.
    pub fn category(&self) -> &'static str {
        match self {
            Self::IoError { .. } => "I/O",
            Self::SchemaError { .. } => "Schema",
            Self::ConfigError { .. } => "Config",
            Self::StaleOutput { .. } => "Stale",
        }
    }
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoError { message, path } => {
                write!(f, "I/O error: {}", message)?;
                if let Some(p) = path {
                    write!(f, " (path: {})", p.display())?;
                }
                Ok(())
            }
            Self::SchemaError {
                message,
                path,
                record,
            } => {
                write!(f, "Schema error: {}", message)?;
                if let Some(p) = path {
                    write!(f, " in {}", p.display())?;
                }
                if let Some(r) = record {
                    write!(f, " at record {}", r)?;
                }
                Ok(())
            }
            Self::ConfigError { message, path } => {
                write!(f, "Config error: {}", message)?;
                if let Some(p) = path {
                    write!(f, " (file: {})", p.display())?;
                }
                Ok(())
            }
            Self::StaleOutput { paths } => {
                write!(f, "Generated files are out of date:")?;
                for p in paths {
                    write!(f, "\n  {}", p.display())?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for GenError {}
